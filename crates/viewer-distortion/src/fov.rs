use serde::{Deserialize, Serialize};

use crate::{Mat4, Real};

/// Angular extent of one eye's frustum, in degrees from the optical axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub left: Real,
    pub right: Real,
    pub top: Real,
    pub bottom: Real,
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self::from_angles([40.0; 4])
    }
}

impl FieldOfView {
    /// Build from `[left, right, top, bottom]`.
    pub fn from_angles(angles: [Real; 4]) -> Self {
        let [left, right, top, bottom] = angles;
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Angles as `[left, right, top, bottom]`.
    pub fn angles(&self) -> [Real; 4] {
        [self.left, self.right, self.top, self.bottom]
    }

    /// Off-axis perspective projection for this frustum.
    ///
    /// Maps camera space (looking down `-z`) to OpenGL clip space. The
    /// caller must pass `0 < near < far`.
    pub fn to_perspective_matrix(&self, near: Real, far: Real) -> Mat4 {
        let l = -self.left.to_radians().tan() * near;
        let r = self.right.to_radians().tan() * near;
        let b = -self.bottom.to_radians().tan() * near;
        let t = self.top.to_radians().tan() * near;

        let x = 2.0 * near / (r - l);
        let y = 2.0 * near / (t - b);
        let a = (r + l) / (r - l);
        let c = (t + b) / (t - b);
        let d = -(far + near) / (far - near);
        let e = -2.0 * far * near / (far - near);

        Mat4::new(
            x, 0.0, a, 0.0, //
            0.0, y, c, 0.0, //
            0.0, 0.0, d, e, //
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn angles_keep_order() {
        let fov = FieldOfView::from_angles([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(fov.left, 1.0);
        assert_eq!(fov.bottom, 4.0);
        assert_eq!(fov.angles(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn symmetric_frustum_has_no_skew() {
        let m = FieldOfView::default().to_perspective_matrix(0.1, 100.0);
        assert!(m[(0, 2)].abs() < 1e-12);
        assert!(m[(1, 2)].abs() < 1e-12);
        let expected = 1.0 / 40.0_f64.to_radians().tan();
        assert!((m[(0, 0)] - expected).abs() < 1e-12);
    }

    #[test]
    fn frustum_edges_land_on_clip_boundary() {
        let fov = FieldOfView::from_angles([20.0, 40.0, 35.0, 10.0]);
        let (near, far) = (0.1, 100.0);
        let m = fov.to_perspective_matrix(near, far);

        // A point on the right edge at depth 1.
        let p = Vector4::new(40.0_f64.to_radians().tan(), 0.0, -1.0, 1.0);
        let clip = m * p;
        assert!((clip.x / clip.w - 1.0).abs() < 1e-9);

        // A point on the bottom edge at depth 1.
        let p = Vector4::new(0.0, -10.0_f64.to_radians().tan(), -1.0, 1.0);
        let clip = m * p;
        assert!((clip.y / clip.w + 1.0).abs() < 1e-9);

        let on_near = m * Vector4::new(0.0, 0.0, -near, 1.0);
        assert!((on_near.z / on_near.w + 1.0).abs() < 1e-9);
    }
}
