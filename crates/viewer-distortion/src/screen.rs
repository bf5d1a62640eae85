use serde::{Deserialize, Serialize};

use crate::{CalibrationError, Real};

/// Smallest screen dimension accepted, in meters.
pub const MIN_SCREEN_DIMENSION_METERS: Real = 1e-6;

/// Default bezel between the screen edge and the viewer tray, in meters.
pub const DEFAULT_BORDER_SIZE_METERS: Real = 0.003;

/// Physical screen geometry of the device inside the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenParams {
    /// Screen width in meters.
    pub width_meters: Real,
    /// Screen height in meters.
    pub height_meters: Real,
    /// Bezel size in meters.
    pub border_size_meters: Real,
}

impl Default for ScreenParams {
    /// A 5.5" 16:9 panel in landscape orientation.
    fn default() -> Self {
        Self {
            width_meters: 0.1218,
            height_meters: 0.0685,
            border_size_meters: DEFAULT_BORDER_SIZE_METERS,
        }
    }
}

impl ScreenParams {
    /// Build validated screen parameters with the default border size.
    pub fn new(width_meters: Real, height_meters: Real) -> Result<Self, CalibrationError> {
        let screen = Self {
            width_meters,
            height_meters,
            border_size_meters: DEFAULT_BORDER_SIZE_METERS,
        };
        screen.validate()?;
        Ok(screen)
    }

    /// Replace the border size.
    pub fn with_border(mut self, border_size_meters: Real) -> Self {
        self.border_size_meters = border_size_meters;
        self
    }

    /// Check that the geometry can be divided by.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let usable = |v: Real| v.is_finite() && v >= MIN_SCREEN_DIMENSION_METERS;
        if !usable(self.width_meters) || !usable(self.height_meters) {
            return Err(CalibrationError::InvalidScreenParams {
                width: self.width_meters,
                height: self.height_meters,
            });
        }
        if !self.border_size_meters.is_finite() || self.border_size_meters < 0.0 {
            return Err(CalibrationError::InvalidBorder(self.border_size_meters));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_border() {
        let screen = ScreenParams::new(0.1, 0.06).unwrap();
        assert_eq!(screen.border_size_meters, DEFAULT_BORDER_SIZE_METERS);
        assert_eq!(screen.with_border(0.0).border_size_meters, 0.0);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        for (w, h) in [
            (0.0, 0.06),
            (0.1, 0.0),
            (-0.1, 0.06),
            (1e-9, 0.06),
            (Real::NAN, 0.06),
            (0.1, Real::INFINITY),
        ] {
            let err = ScreenParams::new(w, h).unwrap_err();
            assert!(
                matches!(err, CalibrationError::InvalidScreenParams { .. }),
                "({w}, {h}) gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_negative_border() {
        let screen = ScreenParams::new(0.1, 0.06).unwrap().with_border(-0.001);
        assert_eq!(
            screen.validate(),
            Err(CalibrationError::InvalidBorder(-0.001))
        );
    }
}
