/// Rotation matrix about the vertical (y) axis.
///
/// # Arguments
///
/// * `ry` - The yaw angle in radians.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```
/// use monobox_geometry::linalg::yaw_to_rotation_matrix;
///
/// let rotation = yaw_to_rotation_matrix(0.0);
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn yaw_to_rotation_matrix(ry: f64) -> [[f64; 3]; 3] {
    let (s, c) = ry.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `rotation` - A rotation matrix.
/// * `translation` - A translation vector.
/// * `dst_points` - A pre-allocated slice to store the transformed points.
///
/// PRECONDITION: dst_points has the same length as src_points.
pub fn transform_points(
    src_points: &[[f64; 3]],
    rotation: &[[f64; 3]; 3],
    translation: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());

    for (dst, src) in dst_points.iter_mut().zip(src_points.iter()) {
        for (i, (row, t)) in rotation.iter().zip(translation.iter()).enumerate() {
            dst[i] = row[0] * src[0] + row[1] * src[1] + row[2] * src[2] + t;
        }
    }
}

/// Product of a 3x4 projection matrix with a homogeneous 3D point (w = 1).
///
/// Returns the un-normalized homogeneous pixel coordinates (u', v', w).
pub fn project_homogeneous(k: &[[f64; 4]; 3], point: &[f64; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (o, row) in out.iter_mut().zip(k.iter()) {
        *o = row[0] * point[0] + row[1] * point[1] + row[2] * point[2] + row[3];
    }
    out
}

/// Project camera-frame points to pixel coordinates through a 3x4 projection.
///
/// Points at (numerically) zero depth project to infinity.
///
/// PRECONDITION: dst_points has the same length as points.
pub fn project_points(k: &[[f64; 4]; 3], points: &[[f64; 3]], dst_points: &mut [[f64; 2]]) {
    assert_eq!(points.len(), dst_points.len());

    for (dst, point) in dst_points.iter_mut().zip(points.iter()) {
        let h = project_homogeneous(k, point);
        if h[2].abs() < 1e-12 {
            *dst = [f64::INFINITY, f64::INFINITY];
        } else {
            *dst = [h[0] / h[2], h[1] / h[2]];
        }
    }
}

/// Minimum-norm least-squares solution of a 4-equation, 3-unknown system.
///
/// Solves `A x = b` through the SVD-based Moore-Penrose pseudoinverse.
/// Singular values with magnitude at most `tol` are dropped, so near-singular
/// systems still yield a finite solution.
///
/// # Returns
///
/// The solution `x` and the l2 residual `||A x - b||`.
pub fn solve_lstsq_4x3(a: &[[f64; 3]; 4], b: &[f64; 4], tol: f64) -> ([f64; 3], f64) {
    let mat_a = faer::Mat::<f64>::from_fn(4, 3, |i, j| a[i][j]);
    let svd = mat_a.svd();
    let u = svd.u();
    let s = svd.s_diagonal();
    let v = svd.v();

    // x = V * S^+ * U^T * b, truncating singular values below tol
    let mut x = [0.0; 3];
    for k in 0..3 {
        let sigma = s.read(k);
        if sigma.abs() <= tol {
            continue;
        }
        let mut ub = 0.0;
        for (i, b_i) in b.iter().enumerate() {
            ub += u.read(i, k) * b_i;
        }
        let scale = ub / sigma;
        for (j, x_j) in x.iter_mut().enumerate() {
            *x_j += v.read(j, k) * scale;
        }
    }

    let mut residual = 0.0;
    for (a_row, b_i) in a.iter().zip(b.iter()) {
        let r = a_row[0] * x[0] + a_row[1] * x[1] + a_row[2] * x[2] - b_i;
        residual += r * r;
    }
    (x, residual.sqrt())
}
