//! Lens distortion and field-of-view parameters for stereo panorama viewers.
//!
//! This crate turns the physical description of a Cardboard-style viewer
//! (lens spacing, lens height, maximum FOV, radial distortion coefficients)
//! and of the phone screen it holds into the numbers a stereo distortion
//! shader needs for one eye:
//!
//! - the eye offset in tangent-angle units,
//! - the FOV truncated by that offset,
//! - the texture scale obtained by inverting the lens distortion,
//! - the viewport offset and fixed vignette parameters.
//!
//! Computation is pure and stateless. The only side effect is pushing the
//! resulting uniforms into a caller-owned [`TechniqueParameters`] sink.
//!
//! # Modules
//!
//! - [`math`]: scalar and vector aliases.
//! - [`screen`], [`viewer`], [`fov`]: input value types.
//! - [`distortion`]: radial polynomial distortion and its numeric inverse.
//! - [`calibrator`]: eye offset, FOV truncation, parameter derivation.
//! - [`technique`]: named uniform bag and the stateful program wrapper.
//! - [`profile`]: JSON device profiles.
//!
//! # Example
//!
//! ```
//! use viewer_distortion::{compute_parameters, CardboardParams, Eye, ScreenParams};
//!
//! let viewer = CardboardParams::default();
//! let screen = ScreenParams::new(0.110, 0.062).unwrap();
//! let left = compute_parameters(&viewer, &screen, Eye::Left).unwrap();
//! let right = compute_parameters(&viewer, &screen, Eye::Right).unwrap();
//! assert_eq!(left.eye_offset.y, -right.eye_offset.y);
//! ```

/// Eye offset, FOV truncation and parameter derivation.
pub mod calibrator;
/// Radial lens distortion.
pub mod distortion;
/// Error types.
pub mod error;
/// Per-eye field of view.
pub mod fov;
/// Scalar and vector aliases.
pub mod math;
/// JSON device profiles (viewer + screen).
pub mod profile;
/// Physical screen geometry.
pub mod screen;
/// Uniform sinks for the rendering technique.
pub mod technique;
/// Viewer hardware parameters and eye selection.
pub mod viewer;

pub use calibrator::*;
pub use distortion::*;
pub use error::*;
pub use fov::*;
pub use math::*;
pub use profile::*;
pub use screen::*;
pub use technique::*;
pub use viewer::*;
