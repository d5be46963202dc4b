#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Monobox geometry
//!
//! Recovers a full 3D bounding box (translation and yaw) for a detected
//! object from a single image, given the detection's 2D box, estimated
//! metric dimensions, an estimated ray-relative orientation angle and
//! KITTI-convention camera calibration. Dimension and orientation estimates
//! come from an upstream model; this crate only performs the deterministic
//! geometric back-projection solve.
//!
//! ## Example
//!
//! ```
//! use monobox_geometry::{
//!     dimensions_to_corners, solve_box3d, Box2D, BoxDimensions, KittiCalibration,
//! };
//!
//! // KITTI-style calibration of the scene
//! let calib = KittiCalibration {
//!     p2: [
//!         [721.5377, 0.0, 609.5593, 44.85728],
//!         [0.0, 721.5377, 172.854, 0.2163791],
//!         [0.0, 0.0, 1.0, 0.002745884],
//!     ],
//!     r0_rect: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
//! };
//!
//! // upstream estimates for one detection
//! let dims = BoxDimensions { height: 1.5, width: 1.6, length: 3.9 };
//! let bbox = Box2D { x1: 500.0, y1: 150.0, x2: 700.0, y2: 300.0 };
//! let theta_l = 0.3;
//!
//! let corners = dimensions_to_corners(&dims);
//! let estimate = solve_box3d(&bbox, &corners, theta_l, &calib)?;
//!
//! println!("translation: {:?}", estimate.translation);
//! println!("yaw: {}", estimate.rotation_y);
//! # Ok::<(), monobox_geometry::SolveError>(())
//! ```

/// KITTI-convention camera calibration.
pub mod calib;

/// Canonical 3D box corner generation.
pub mod corners;

/// Small dense linear-algebra helpers.
pub mod linalg;

/// The 2D-edge to 3D-corner correspondence solver.
pub mod solver;

pub use calib::KittiCalibration;
pub use corners::{dimensions_to_corners, dimensions_to_corners_batch, BoxDimensions};
pub use solver::{solve_box3d, Box2D, Box3dEstimate, SolveError};
