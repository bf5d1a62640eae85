use serde::{Deserialize, Serialize};

use crate::{CalibrationError, Real, Vec2};

/// Convergence threshold of [`Distortion::distort_inverse`] on the radius.
const INVERSE_TOLERANCE: Real = 1e-9;
/// Iteration cap of [`Distortion::distort_inverse`].
const INVERSE_MAX_ITERS: usize = 64;
/// Largest accepted `|distort(r) - radius|` for [`Distortion::checked_inverse`].
const INVERSE_RESIDUAL: Real = 1e-6;
/// Slope samples taken by [`Distortion::is_monotone_up_to`].
const MONOTONE_SAMPLES: usize = 256;

/// Lens model acting on points in tangent-angle space.
///
/// Parameter derivation only needs radial values; this trait is the
/// point-level entry for CPU-side consumers such as mesh generators or
/// touch picking through the lens.
pub trait DistortionModel {
    /// Map an undistorted point to where the lens shows it.
    fn distort_point(&self, p: &Vec2) -> Vec2;
    /// Map a distorted point back to its undistorted position.
    fn undistort_point(&self, p: &Vec2) -> Vec2;
}

/// Radial polynomial distortion `r' = r * (1 + k1 r² + k2 r⁴ + ...)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Real>", into = "Vec<Real>")]
pub struct Distortion {
    coefficients: Vec<Real>,
}

impl Distortion {
    /// Build a model from `[k1, k2, ...]`.
    ///
    /// Fails if there are no coefficients or one of them is not finite.
    pub fn new(coefficients: Vec<Real>) -> Result<Self, CalibrationError> {
        if coefficients.is_empty() {
            return Err(CalibrationError::InvalidDistortion(
                "no coefficients".to_string(),
            ));
        }
        if let Some(i) = coefficients.iter().position(|k| !k.is_finite()) {
            return Err(CalibrationError::InvalidDistortion(format!(
                "coefficient {i} is {}",
                coefficients[i]
            )));
        }
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// Radial scale `1 + k1 r² + k2 r⁴ + ...` at `radius`.
    pub fn distortion_factor(&self, radius: Real) -> Real {
        let r2 = radius * radius;
        let mut r_factor = 1.0;
        let mut result = 1.0;
        for k in &self.coefficients {
            r_factor *= r2;
            result += k * r_factor;
        }
        result
    }

    /// Distorted radius for an undistorted `radius`.
    pub fn distort(&self, radius: Real) -> Real {
        radius * self.distortion_factor(radius)
    }

    /// Undistorted radius that [`distort`](Self::distort) maps onto `radius`.
    ///
    /// Solved with the secant method seeded on both sides of `radius`. The
    /// result is only meaningful where the polynomial is monotone.
    pub fn distort_inverse(&self, radius: Real) -> Real {
        let mut r0 = radius / 0.9;
        let mut r1 = radius * 0.9;
        let mut dr0 = radius - self.distort(r0);

        for _ in 0..INVERSE_MAX_ITERS {
            if (r1 - r0).abs() <= INVERSE_TOLERANCE {
                break;
            }
            let dr1 = radius - self.distort(r1);
            let slope = dr1 - dr0;
            if slope == 0.0 {
                break;
            }
            let r2 = r1 - dr1 * ((r1 - r0) / slope);
            r0 = r1;
            r1 = r2;
            dr0 = dr1;
        }
        r1
    }

    /// Slope `d distort / d r` at `radius`.
    pub fn distort_derivative(&self, radius: Real) -> Real {
        let r2 = radius * radius;
        let mut r_factor = 1.0;
        let mut result = 1.0;
        for (i, k) in self.coefficients.iter().enumerate() {
            r_factor *= r2;
            result += (2 * i + 3) as Real * k * r_factor;
        }
        result
    }

    /// Whether `distort` is strictly increasing on `[0, max_radius]`.
    ///
    /// Checked on evenly spaced slope samples.
    pub fn is_monotone_up_to(&self, max_radius: Real) -> bool {
        (0..=MONOTONE_SAMPLES).all(|i| {
            let r = max_radius * i as Real / MONOTONE_SAMPLES as Real;
            self.distort_derivative(r) > 0.0
        })
    }

    /// [`distort_inverse`](Self::distort_inverse) restricted to the
    /// monotone branch through the origin.
    ///
    /// Fails when the iteration lands on a negative or spurious root, or
    /// when the polynomial folds back before reaching `radius`.
    pub fn checked_inverse(&self, radius: Real) -> Result<Real, CalibrationError> {
        let r = self.distort_inverse(radius);
        let valid = r.is_finite()
            && r >= 0.0
            && (self.distort(r) - radius).abs() <= INVERSE_RESIDUAL
            && self.is_monotone_up_to(r);
        if !valid {
            return Err(CalibrationError::InvalidDistortion(format!(
                "coefficients {:?} have no monotone inverse at radius {radius} (got {r})",
                self.coefficients
            )));
        }
        Ok(r)
    }
}

impl TryFrom<Vec<Real>> for Distortion {
    type Error = CalibrationError;

    fn try_from(coefficients: Vec<Real>) -> Result<Self, Self::Error> {
        Self::new(coefficients)
    }
}

impl From<Distortion> for Vec<Real> {
    fn from(d: Distortion) -> Self {
        d.coefficients
    }
}

impl DistortionModel for Distortion {
    fn distort_point(&self, p: &Vec2) -> Vec2 {
        p * self.distortion_factor(p.norm())
    }

    fn undistort_point(&self, p: &Vec2) -> Vec2 {
        let r = p.norm();
        if r == 0.0 {
            return *p;
        }
        p * (self.distort_inverse(r) / r)
    }
}
