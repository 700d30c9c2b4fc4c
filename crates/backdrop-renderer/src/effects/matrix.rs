//! 3×3 rotation math and perspective projection for the wireframe cubes.
//!
//! Column-major layout, same convention as the rest of the renderer.

/// 3×3 column-major matrix stored as `[f64; 9]`.
pub type Mat3 = [f64; 9];

pub type Vec3 = [f64; 3];

pub const IDENTITY: Mat3 = [
    1.0, 0.0, 0.0, // col 0
    0.0, 1.0, 0.0, // col 1
    0.0, 0.0, 1.0, // col 2
];

/// Rotation around the X axis.
pub fn rotate_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c]
}

/// Rotation around the Y axis.
pub fn rotate_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c]
}

/// Rotation around the Z axis.
pub fn rotate_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0]
}

/// Combined rotation `Rx × Ry × Rz`.
pub fn rotate_xyz(ax: f64, ay: f64, az: f64) -> Mat3 {
    mul(&mul(&rotate_x(ax), &rotate_y(ay)), &rotate_z(az))
}

/// result = a × b.
pub fn mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [0.0; 9];
    for col in 0..3 {
        for row in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += a[k * 3 + row] * b[col * 3 + k];
            }
            out[col * 3 + row] = sum;
        }
    }
    out
}

pub fn transform(m: &Mat3, v: Vec3) -> Vec3 {
    [
        m[0] * v[0] + m[3] * v[1] + m[6] * v[2],
        m[1] * v[0] + m[4] * v[1] + m[7] * v[2],
        m[2] * v[0] + m[5] * v[1] + m[8] * v[2],
    ]
}

/// Perspective divide: `scale = focal / (focal + z + z_offset)`.
///
/// Returns the projected offset from the projection center and the scale,
/// or `None` when the point is at or behind the eye.
pub fn project(v: Vec3, focal: f64, z_offset: f64) -> Option<(f64, f64, f64)> {
    let depth = focal + v[2] + z_offset;
    if depth <= f64::EPSILON {
        return None;
    }
    let scale = focal / depth;
    Some((v[0] * scale, v[1] * scale, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx_eq(a: &[f64], b: &[f64], eps: f64) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn identity_mul_identity() {
        assert!(approx_eq(&mul(&IDENTITY, &IDENTITY), &IDENTITY, 1e-12));
    }

    #[test]
    fn zero_angles_are_identity() {
        assert!(approx_eq(&rotate_xyz(0.0, 0.0, 0.0), &IDENTITY, 1e-12));
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let v = transform(&rotate_z(FRAC_PI_2), [1.0, 0.0, 0.0]);
        assert!(approx_eq(&v, &[0.0, 1.0, 0.0], 1e-12));
    }

    #[test]
    fn rotate_x_quarter_turn() {
        let v = transform(&rotate_x(FRAC_PI_2), [0.0, 1.0, 0.0]);
        assert!(approx_eq(&v, &[0.0, 0.0, 1.0], 1e-12));
    }

    #[test]
    fn rotation_preserves_length() {
        let m = rotate_xyz(0.3, 1.1, -2.0);
        let v = transform(&m, [1.0, -1.0, 1.0]);
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn projection_shrinks_with_depth() {
        let (x_near, _, near) = project([10.0, 0.0, -50.0], 300.0, 200.0).unwrap();
        let (x_far, _, far) = project([10.0, 0.0, 50.0], 300.0, 200.0).unwrap();
        assert!(near > far);
        assert!(x_near > x_far);
    }

    #[test]
    fn projection_behind_eye_is_none() {
        assert!(project([0.0, 0.0, -600.0], 300.0, 200.0).is_none());
    }
}
