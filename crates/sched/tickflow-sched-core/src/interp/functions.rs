//! Interpolation formulas, one per value kind:
//! - componentwise linear for vectors and colors
//! - quaternion NLERP with shortest-arc normalization
//! - round-to-nearest for integers
//! - step (hold `from` until t reaches 1) as the universal fallback

use tickflow_api_core::Value;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Integer interpolation: linear in f32, rounded to the nearest whole value.
#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    lerp_f32(a as f32, b as f32, t).round() as i32
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3];
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    let d = dot4(a, b);
    if d < 0.0 {
        b[0] = -b[0];
        b[1] = -b[1];
        b[2] = -b[2];
        b[3] = -b[3];
    }
    let q = [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ];
    normalize4(q)
}

/// Componentwise lerp of equal-length vectors; None on length mismatch.
pub fn lerp_slice(a: &[f32], b: &[f32], t: f32) -> Option<Vec<f32>> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| lerp_f32(*x, *y, t))
            .collect(),
    )
}

/// Step interpolation: hold `from`, switch to `to` once t reaches 1.
#[inline]
pub fn step_value(from: &Value, to: &Value, t: f32) -> Value {
    if t >= 1.0 {
        to.clone()
    } else {
        from.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    fn norm4(q: [f32; 4]) -> f32 {
        (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt()
    }

    /// it should round integers to the nearest whole value
    #[test]
    fn int_rounds_to_nearest() {
        assert_eq!(lerp_i32(0, 10, 0.0), 0);
        assert_eq!(lerp_i32(0, 10, 0.26), 3);
        assert_eq!(lerp_i32(0, 10, 1.0), 10);
        assert_eq!(lerp_i32(-10, 0, 0.26), -7);
    }

    /// it should keep unit norm through nlerp midpoints
    #[test]
    fn quat_nlerp_unit_norm() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = [0.0, 1.0, 0.0, 0.0]; // 180 deg around Y
        let q = nlerp_quat(a, b, 0.5);
        approx(norm4(q), 1.0, 1e-4);
    }

    /// it should take the shortest arc when quaternion signs disagree
    #[test]
    fn quat_nlerp_shortest_arc() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = [0.0, 0.0, 0.0, -1.0]; // same orientation, opposite sign
        let q = nlerp_quat(a, b, 0.5);
        // Shortest arc flips b; the blend stays at identity.
        approx(q[3].abs(), 1.0, 1e-4);
    }

    /// it should refuse mismatched slice lengths
    #[test]
    fn slice_length_mismatch() {
        assert!(lerp_slice(&[0.0, 1.0], &[1.0], 0.5).is_none());
        let v = lerp_slice(&[0.0, 2.0], &[2.0, 4.0], 0.5).unwrap();
        approx(v[0], 1.0, 1e-6);
        approx(v[1], 3.0, 1e-6);
    }

    /// it should hold the from-value until t reaches 1
    #[test]
    fn step_holds_then_switches() {
        let a = Value::Text("a".into());
        let b = Value::Text("b".into());
        assert_eq!(step_value(&a, &b, 0.99), a);
        assert_eq!(step_value(&a, &b, 1.0), b);
    }
}
