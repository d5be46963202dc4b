/// Estimated metric dimensions of a detected object.
///
/// Follows the KITTI label order (height, width, length).
///
/// PRECONDITION: all three extents are positive. Degenerate dimensions are
/// not validated here; the solver still returns a finite (if meaningless)
/// pose for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDimensions {
    /// Extent along the vertical axis.
    pub height: f64,
    /// Lateral extent, perpendicular to the heading.
    pub width: f64,
    /// Extent along the heading axis.
    pub length: f64,
}

/// Generate the 8 canonical corners of a 3D box in its object-local frame.
///
/// The box origin is the center of the bottom face, not the geometric center
/// of the box, following KITTI's definition. The camera y axis points down,
/// so corners 0-3 lie in the y = 0 plane (the face the box rests on) and
/// corners 4-7 in y = -h (the roof). Corner order:
///
/// ```text
/// idx:  0     1     2     3     4     5     6     7
/// x:   l/2  -l/2  -l/2   l/2   l/2  -l/2  -l/2   l/2
/// y:    0     0     0     0    -h    -h    -h    -h
/// z:   w/2   w/2  -w/2  -w/2   w/2   w/2  -w/2  -w/2
/// ```
///
/// The solver indexes corners by position in this array, so the order is part
/// of the contract.
///
/// Example:
///
/// ```
/// use monobox_geometry::corners::{dimensions_to_corners, BoxDimensions};
///
/// let dims = BoxDimensions { height: 2.0, width: 2.0, length: 4.0 };
/// let corners = dimensions_to_corners(&dims);
/// assert_eq!(corners[0], [2.0, 0.0, 1.0]);
/// assert_eq!(corners[6], [-2.0, -2.0, -1.0]);
/// ```
pub fn dimensions_to_corners(dims: &BoxDimensions) -> [[f64; 3]; 8] {
    let BoxDimensions {
        height: h,
        width: w,
        length: l,
    } = *dims;
    [
        [l / 2.0, 0.0, w / 2.0],
        [-l / 2.0, 0.0, w / 2.0],
        [-l / 2.0, 0.0, -w / 2.0],
        [l / 2.0, 0.0, -w / 2.0],
        [l / 2.0, -h, w / 2.0],
        [-l / 2.0, -h, w / 2.0],
        [-l / 2.0, -h, -w / 2.0],
        [l / 2.0, -h, -w / 2.0],
    ]
}

/// Generate canonical corners for a batch of dimension estimates.
///
/// Equivalent to calling [`dimensions_to_corners`] once per element and
/// stacking the results.
pub fn dimensions_to_corners_batch(dims: &[BoxDimensions]) -> Vec<[[f64; 3]; 8]> {
    dims.iter().map(dimensions_to_corners).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_sign_table() {
        let dims = BoxDimensions {
            height: 1.5,
            width: 1.6,
            length: 3.9,
        };
        let corners = dimensions_to_corners(&dims);

        let x_signs = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0];
        let z_signs = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
        for (i, corner) in corners.iter().enumerate() {
            assert_eq!(corner[0], x_signs[i] * dims.length / 2.0);
            assert_eq!(corner[2], z_signs[i] * dims.width / 2.0);
            if i < 4 {
                assert_eq!(corner[1], 0.0);
            } else {
                assert_eq!(corner[1], -dims.height);
            }
        }
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let dims = vec![
            BoxDimensions {
                height: 1.5,
                width: 1.6,
                length: 3.9,
            },
            BoxDimensions {
                height: 1.8,
                width: 0.6,
                length: 0.8,
            },
            BoxDimensions {
                height: 3.2,
                width: 2.5,
                length: 10.0,
            },
        ];
        let batch = dimensions_to_corners_batch(&dims);

        assert_eq!(batch.len(), dims.len());
        for (corners, d) in batch.iter().zip(dims.iter()) {
            assert_eq!(*corners, dimensions_to_corners(d));
        }
    }
}
