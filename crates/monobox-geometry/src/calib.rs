/// Camera calibration for one scene, following the KITTI convention.
///
/// `P2` is the 3x4 projection matrix of the left color camera and `R0_rect`
/// the 3x3 rectification rotation. Both are taken verbatim from a KITTI
/// calibration record; parsing the calibration files is the caller's concern.
///
/// Validity (e.g. non-singular `P2`) is not checked; a degenerate calibration
/// degrades the solved pose instead of raising an error.
#[derive(Debug, Clone, PartialEq)]
pub struct KittiCalibration {
    /// 3x4 camera projection matrix (`P2`).
    pub p2: [[f64; 4]; 3],
    /// 3x3 rectification rotation (`R0_rect`).
    pub r0_rect: [[f64; 3]; 3],
}

impl KittiCalibration {
    /// Identity calibration: `P2 = [I | 0]`, `R0_rect = I`.
    ///
    /// Useful for synthetic scenes in normalized image coordinates.
    pub fn identity() -> Self {
        Self {
            p2: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
            r0_rect: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Combined 3x4 projection `K = P2 * R0_rect`, with `R0_rect` lifted to a
    /// 4x4 homogeneous matrix.
    ///
    /// All corner projections of one detection go through this single matrix.
    pub fn full_projection(&self) -> [[f64; 4]; 3] {
        let mut k = [[0.0; 4]; 3];
        for (k_row, p2_row) in k.iter_mut().zip(self.p2.iter()) {
            for (j, k_val) in k_row.iter_mut().take(3).enumerate() {
                *k_val = (0..3).map(|m| p2_row[m] * self.r0_rect[m][j]).sum();
            }
            // last homogeneous column of R0_rect is (0, 0, 0, 1)
            k_row[3] = p2_row[3];
        }
        k
    }

    /// Angle of the viewing ray through a horizontal image coordinate.
    ///
    /// Computed as `atan2(fx, u - cx)` with `fx` and `cx` read from `P2`.
    /// Evaluated at the center of a 2D box it estimates, from calibration and
    /// box position alone, the direction from the camera to the object.
    pub fn ray_angle(&self, u: f64) -> f64 {
        self.p2[0][0].atan2(u - self.p2[0][2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_projection() {
        let calib = KittiCalibration::identity();
        let k = calib.full_projection();
        assert_eq!(
            k,
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_full_projection_applies_rectification() {
        // rectification swapping the x and z axes
        let calib = KittiCalibration {
            p2: [
                [700.0, 0.0, 600.0, 10.0],
                [0.0, 700.0, 170.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
            r0_rect: [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        };
        let k = calib.full_projection();
        let expected = [
            [600.0, 0.0, 700.0, 10.0],
            [170.0, 700.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ];
        for (k_row, e_row) in k.iter().zip(expected.iter()) {
            for (k_val, e_val) in k_row.iter().zip(e_row.iter()) {
                assert_relative_eq!(*k_val, *e_val);
            }
        }
    }

    #[test]
    fn test_ray_angle_at_principal_point() {
        let calib = KittiCalibration {
            p2: [
                [700.0, 0.0, 600.0, 0.0],
                [0.0, 700.0, 170.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
            r0_rect: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        };
        // looking straight down the optical axis
        assert_relative_eq!(calib.ray_angle(600.0), std::f64::consts::FRAC_PI_2);
        // rays left of the principal point have larger angles
        assert!(calib.ray_angle(300.0) > calib.ray_angle(600.0));
        assert!(calib.ray_angle(900.0) < calib.ray_angle(600.0));
    }
}
