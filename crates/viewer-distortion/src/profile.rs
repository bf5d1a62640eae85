//! Device profiles: a viewer and the screen it holds, stored as JSON.
//!
//! ```json
//! {
//!   "viewer": { "model": "Cardboard v1", "distortion_coefficients": [0.441, 0.156] },
//!   "screen": { "width_meters": 0.110, "height_meters": 0.062 }
//! }
//! ```
//!
//! Missing fields fall back to the Cardboard v1 viewer and a default 5.5"
//! screen.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    compute_parameters, CalibrationError, CardboardParams, DistortionResult, Eye, ScreenParams,
};

/// Viewer hardware plus screen geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub viewer: CardboardParams,
    pub screen: ScreenParams,
}

impl DeviceProfile {
    /// Parse and validate a profile.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: Self =
            serde_json::from_str(json).context("failed to parse device profile")?;
        profile.validate().context("invalid device profile")?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&data).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        self.screen.validate()?;
        self.viewer.validate()
    }

    pub fn compute_parameters(&self, eye: Eye) -> Result<DistortionResult, CalibrationError> {
        compute_parameters(&self.viewer, &self.screen, eye)
    }

    /// Parameters for `[left, right]`.
    pub fn stereo_parameters(&self) -> Result<[DistortionResult; 2], CalibrationError> {
        Ok([
            self.compute_parameters(Eye::Left)?,
            self.compute_parameters(Eye::Right)?,
        ])
    }
}
