use serde::{Deserialize, Serialize};

use crate::{CalibrationError, Distortion, FieldOfView, Real, ScreenParams};

/// Which half of the stereo pair is being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Both eyes in render order.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// `+1` for the left eye, `-1` for the right eye.
    pub fn sign(self) -> Real {
        match self {
            Eye::Left => 1.0,
            Eye::Right => -1.0,
        }
    }
}

/// Edge of the phone the viewer measures its lens height from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    #[default]
    Bottom,
    Center,
    Top,
}

/// Calibration record of a Cardboard-style viewer.
///
/// Distances are in meters, angles in degrees. Defaults describe the
/// first-generation Cardboard viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardboardParams {
    pub vendor: String,
    pub model: String,
    /// Distance between the two lens centers.
    pub inter_lens_distance: Real,
    pub vertical_alignment: VerticalAlignment,
    /// Lens center height above the aligned edge of the tray.
    pub vertical_distance_to_lens_center: Real,
    pub screen_to_lens_distance: Real,
    /// Maximum FOV of the left eye; the right eye mirrors it.
    pub left_eye_max_fov: FieldOfView,
    /// Radial distortion coefficients `[k1, k2, ...]`.
    pub distortion_coefficients: Vec<Real>,
}

impl Default for CardboardParams {
    fn default() -> Self {
        Self {
            vendor: "Google, Inc.".to_string(),
            model: "Cardboard v1".to_string(),
            inter_lens_distance: 0.06,
            vertical_alignment: VerticalAlignment::Bottom,
            vertical_distance_to_lens_center: 0.035,
            screen_to_lens_distance: 0.042,
            left_eye_max_fov: FieldOfView::default(),
            distortion_coefficients: vec![0.441, 0.156],
        }
    }
}

impl CardboardParams {
    /// Lens center offset from the screen edge, in meters.
    pub fn y_eye_offset_meters(&self, screen: &ScreenParams) -> Real {
        match self.vertical_alignment {
            VerticalAlignment::Bottom => {
                self.vertical_distance_to_lens_center - screen.border_size_meters
            }
            VerticalAlignment::Center => screen.height_meters / 2.0,
            VerticalAlignment::Top => {
                screen.height_meters
                    - (self.vertical_distance_to_lens_center - screen.border_size_meters)
            }
        }
    }

    /// Distortion model built from [`distortion_coefficients`](Self::distortion_coefficients).
    pub fn distortion(&self) -> Result<Distortion, CalibrationError> {
        Distortion::new(self.distortion_coefficients.clone())
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        let lengths = [
            ("inter_lens_distance", self.inter_lens_distance),
            (
                "vertical_distance_to_lens_center",
                self.vertical_distance_to_lens_center,
            ),
            ("screen_to_lens_distance", self.screen_to_lens_distance),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(CalibrationError::InvalidViewerParams(format!(
                    "{name} = {value}"
                )));
            }
        }
        if let Some(angle) = self
            .left_eye_max_fov
            .angles()
            .into_iter()
            .find(|a| !a.is_finite() || *a < 0.0 || *a >= 90.0)
        {
            return Err(CalibrationError::InvalidViewerParams(format!(
                "left_eye_max_fov angle {angle} outside [0, 90)"
            )));
        }
        self.distortion().map(|_| ())
    }
}
