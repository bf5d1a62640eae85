//! Per-eye rendering parameters for a stereo distortion pass.
//!
//! Offsets are expressed in screen-relative tangent-angle units. The
//! horizontal offset is derived from the viewer's *y* eye offset and the
//! vertical one from the inter-lens distance. This axis crossing comes from
//! the viewer calibration convention and is kept as is.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{CalibrationError, CardboardParams, Eye, FieldOfView, Real, ScreenParams, Vec2};

/// Horizontal vignette width sent with every parameter set.
pub const VIGNETTE_X: Real = 0.05;
/// Vertical vignette width sent with every parameter set.
pub const VIGNETTE_Y: Real = 0.02;

/// Narrow `angle` (degrees) by the eye `offset` (tangent-angle units).
///
/// Non-positive offsets leave the angle unchanged: truncation never widens.
/// Offsets outside `[0, 1)` are not clamped and can yield negative angles.
pub fn truncate_fov(angle: Real, offset: Real) -> Real {
    if offset <= 0.0 {
        return angle;
    }
    let rad = angle.to_radians();
    (rad - (rad.tan() * offset).atan()).to_degrees()
}

/// Eye offset in tangent-angle units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeOffset {
    pub x: Real,
    pub y: Real,
}

impl EyeOffset {
    /// Offset of `eye` for a viewer holding `screen`.
    ///
    /// `screen` must already be validated.
    pub fn compute(params: &CardboardParams, screen: &ScreenParams, eye: Eye) -> Self {
        let x = (params.y_eye_offset_meters(screen) - screen.width_meters / 2.0)
            / screen.width_meters;
        let y = (screen.height_meters / 4.0 - params.inter_lens_distance / 2.0)
            / screen.height_meters
            * eye.sign();

        Self {
            x: x * 2.0,
            y: y * -4.0,
        }
    }

    /// Each of the raw angles narrowed by the offset facing it.
    pub fn truncate(&self, max_fov: &FieldOfView) -> FieldOfView {
        FieldOfView::from_angles([
            truncate_fov(max_fov.left, -self.x),
            truncate_fov(max_fov.right, self.x),
            truncate_fov(max_fov.top, self.y),
            truncate_fov(max_fov.bottom, -self.y),
        ])
    }
}

/// Everything the distortion technique needs for one eye.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistortionResult {
    /// Viewer distortion coefficients, unchanged.
    pub coefficients: Vec<Real>,
    pub eye_offset: Vec2,
    pub viewport_offset: Vec2,
    /// Inverse-distorted radius at the far screen edge.
    pub texture_scale: Real,
    pub vignette_x: Real,
    pub vignette_y: Real,
    /// FOV after truncation by the eye offset.
    pub fov: FieldOfView,
}

/// Derive the rendering parameters of `eye`.
///
/// Fails fast on degenerate screens, malformed viewer data, or distortion
/// coefficients that cannot be inverted out to the far screen edge, instead
/// of producing NaN or negative uniforms.
pub fn compute_parameters(
    params: &CardboardParams,
    screen: &ScreenParams,
    eye: Eye,
) -> Result<DistortionResult, CalibrationError> {
    screen.validate()?;
    params.validate()?;
    let distortion = params.distortion()?;

    let offset = EyeOffset::compute(params, screen, eye);
    let fov = offset.truncate(&params.left_eye_max_fov);
    if let Some(angle) = fov.angles().into_iter().find(|a| *a < 0.0) {
        warn!(
            "{eye:?} eye offset ({:.4}, {:.4}) truncates FOV to {angle:.3} deg",
            offset.x, offset.y
        );
    }

    let texture_scale = distortion.checked_inverse(1.0 - offset.x / 2.0)?;
    debug!("{eye:?} eye texture scale {texture_scale}");

    Ok(DistortionResult {
        coefficients: distortion.into(),
        eye_offset: Vec2::new(offset.x, offset.y),
        viewport_offset: Vec2::new(offset.x / 2.0, offset.y / 2.0),
        texture_scale,
        vignette_x: VIGNETTE_X,
        vignette_y: VIGNETTE_Y,
        fov,
    })
}
