use thiserror::Error;

use crate::calib::KittiCalibration;
use crate::linalg::{
    project_homogeneous, solve_lstsq_4x3, transform_points, yaw_to_rotation_matrix,
};

/// Singular values below this magnitude are truncated in the pseudoinverse.
const SVD_TOL: f64 = 1e-12;

/// Errors produced by the 3D box solver.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The 2D box has non-positive extent along one of its axes.
    #[error("invalid 2d box: expected x1 < x2 and y1 < y2, got ({x1}, {y1}, {x2}, {y2})")]
    InvalidBox {
        /// Left edge of the offending box.
        x1: f64,
        /// Top edge of the offending box.
        y1: f64,
        /// Right edge of the offending box.
        x2: f64,
        /// Bottom edge of the offending box.
        y2: f64,
    },
}

/// Axis-aligned 2D detection box in pixel coordinates.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2D {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl Box2D {
    /// Horizontal center of the box.
    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) * 0.5
    }
}

/// Recovered 3D pose for one detection.
///
/// Together with the object dimensions this fully specifies the 3D box:
/// canonical corners rotated by `rotation_y` and shifted by `translation`.
#[derive(Debug, Clone)]
pub struct Box3dEstimate {
    /// Translation of the box origin (bottom-face center) in camera coordinates.
    pub translation: [f64; 3],
    /// Global yaw of the box about the vertical axis.
    pub rotation_y: f64,
    /// l2 residual of the winning linear system.
    pub residual: f64,
}

impl Box3dEstimate {
    /// Canonical corners moved into the camera frame under this pose.
    pub fn corners_in_camera(&self, corners: &[[f64; 3]; 8]) -> [[f64; 3]; 8] {
        let rotation = yaw_to_rotation_matrix(self.rotation_y);
        let mut out = [[0.0; 3]; 8];
        transform_points(corners, &rotation, &self.translation, &mut out);
        out
    }
}

/// Admissible corner indices per image edge for one correspondence
/// hypothesis.
///
/// Which 3D corners touch the 2D box edges depends on the viewing octant,
/// unknown a priori. Each hypothesis corresponds to one vertical box edge
/// facing the camera; the left/right/top edges are served by roof corners
/// (indices 4-7, at y = -h) and the bottom edge by base corners (0-3).
struct EdgeCorners {
    left: [usize; 2],
    right: usize,
    top: [usize; 2],
    bottom: usize,
}

/// Fixed lookup table; the four entries are images of each other under
/// quarter turns of the box, one per candidate facing edge.
const EDGE_HYPOTHESES: [EdgeCorners; 4] = [
    EdgeCorners {
        left: [6, 7],
        right: 4,
        top: [5, 7],
        bottom: 3,
    },
    EdgeCorners {
        left: [5, 6],
        right: 7,
        top: [4, 6],
        bottom: 2,
    },
    EdgeCorners {
        left: [4, 5],
        right: 6,
        top: [7, 5],
        bottom: 1,
    },
    EdgeCorners {
        left: [7, 4],
        right: 5,
        top: [6, 4],
        bottom: 0,
    },
];

// One scalar constraint `a . t = b` tying the projection of a corner to an
// image-edge value; `hom` is the homogeneous projection of the rotated corner
// and `row` selects the pixel axis (0 for x1/x2, 1 for y1/y2).
fn edge_constraint(
    k: &[[f64; 4]; 3],
    hom: &[f64; 3],
    edge: f64,
    row: usize,
) -> ([f64; 3], f64) {
    let mut a = [0.0; 3];
    for (j, a_j) in a.iter_mut().enumerate() {
        *a_j = k[row][j] - edge * k[2][j];
    }
    (a, edge * hom[2] - hom[row])
}

// Solve every admissible 4-equation system (up to 16: 4 hypotheses with
// 2 x 1 x 2 x 1 corner choices each) and return all candidate translations
// with their residuals, in enumeration order.
fn enumerate_candidates(
    k: &[[f64; 4]; 3],
    hom: &[[f64; 3]; 8],
    bbox: &Box2D,
) -> Vec<([f64; 3], f64)> {
    let mut candidates = Vec::with_capacity(16);

    for hyp in EDGE_HYPOTHESES.iter() {
        let (a1, b1) = edge_constraint(k, &hom[hyp.right], bbox.x2, 0);
        let (a3, b3) = edge_constraint(k, &hom[hyp.bottom], bbox.y2, 1);

        for &left in hyp.left.iter() {
            let (a0, b0) = edge_constraint(k, &hom[left], bbox.x1, 0);
            for &top in hyp.top.iter() {
                let (a2, b2) = edge_constraint(k, &hom[top], bbox.y1, 1);

                let a = [a0, a1, a2, a3];
                let b = [b0, b1, b2, b3];
                let (translation, residual) = solve_lstsq_4x3(&a, &b, SVD_TOL);

                log::debug!(
                    "corners (l, r, t, b): ({}, {}, {}, {}) -> residual {}",
                    left,
                    hyp.right,
                    top,
                    hyp.bottom,
                    residual
                );
                candidates.push((translation, residual));
            }
        }
    }
    candidates
}

/// Solve the 3D pose of a detected object from its 2D box, canonical corners,
/// ray-relative orientation and calibration.
///
/// The four edges of the 2D box constrain the projections of four of the 3D
/// box corners, but which corner touches which edge depends on the viewing
/// direction. The solver enumerates the admissible corner-to-edge
/// correspondences, solves each resulting 4-equation linear system for the
/// translation by least squares, and keeps the solution with the smallest
/// residual.
///
/// # Arguments
///
/// * `bbox` - The detection's 2D box in pixel coordinates.
/// * `corners` - Canonical box corners from
///   [`dimensions_to_corners`](crate::corners::dimensions_to_corners).
/// * `theta_l` - Estimated angle between the object heading and the viewing
///   ray, in radians in `[-pi, pi]`. Values outside the range are accepted
///   but not wrapped.
/// * `calib` - KITTI-convention calibration of the scene.
///
/// # Returns
///
/// The translation of the box origin in camera coordinates, the global yaw
/// and the winning residual. A large residual signals an inconsistent input
/// (e.g. degenerate calibration) rather than an error; the solve itself is
/// always well-defined for a valid 2D box.
pub fn solve_box3d(
    bbox: &Box2D,
    corners: &[[f64; 3]; 8],
    theta_l: f64,
    calib: &KittiCalibration,
) -> Result<Box3dEstimate, SolveError> {
    if bbox.x1 >= bbox.x2 || bbox.y1 >= bbox.y2 {
        return Err(SolveError::InvalidBox {
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        });
    }

    let k = calib.full_projection();

    // global yaw from the viewing ray implied by the box center and the
    // model-estimated ray-relative angle
    let theta_ray = calib.ray_angle(bbox.center_x());
    let rotation_y = std::f64::consts::PI - theta_ray - theta_l;

    let rotation = yaw_to_rotation_matrix(rotation_y);
    let mut rotated = [[0.0; 3]; 8];
    transform_points(corners, &rotation, &[0.0; 3], &mut rotated);

    // homogeneous projection of each rotated corner, shared by every
    // constraint that references it
    let mut hom = [[0.0; 3]; 8];
    for (h, corner) in hom.iter_mut().zip(rotated.iter()) {
        *h = project_homogeneous(&k, corner);
    }

    let mut best_translation = [0.0; 3];
    let mut best_residual = f64::INFINITY;
    for (translation, residual) in enumerate_candidates(&k, &hom, bbox) {
        if residual < best_residual {
            best_residual = residual;
            best_translation = translation;
        }
    }

    Ok(Box3dEstimate {
        translation: best_translation,
        rotation_y,
        residual: best_residual,
    })
}
