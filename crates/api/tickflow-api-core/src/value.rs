//! Value: runtime instances of the interpolable kinds.
//! All numeric components are f32 except `Int`, which rounds when blended.

use serde::{Deserialize, Serialize};

/// Coarse kind tag for a [`Value`]. Used as the dispatch key when resolving
/// an interpolation function; resolution happens once per kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Int,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Quat,
    ColorRgba,
    Vector,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Integer; blends round to the nearest whole value
    Int(i32),

    /// Boolean (step-only)
    Bool(bool),

    /// 2D vector
    Vec2([f32; 2]),

    /// 3D vector
    Vec3([f32; 3]),

    /// 4D vector
    Vec4([f32; 4]),

    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),

    /// RGBA color (linear by convention)
    ColorRgba([f32; 4]),

    /// Generic, variable-length numeric vector
    Vector(Vec<f32>),

    /// Text / string; step-only for interpolation
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Vector(_) => ValueKind::Vector,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn i(v: i32) -> Self {
        Value::Int(v)
    }

    pub fn vec2(x: f32, y: f32) -> Self {
        Value::Vec2([x, y])
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Value::Vec3([x, y, z])
    }

    pub fn quat(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value::Quat([x, y, z, w])
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Value::ColorRgba([r, g, b, a])
    }

    /// Scalar accessor, handy in tests and host glue.
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should map every variant to its kind tag
    #[test]
    fn kind_mapping() {
        assert_eq!(Value::f(1.0).kind(), ValueKind::Float);
        assert_eq!(Value::i(3).kind(), ValueKind::Int);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::vec2(0.0, 1.0).kind(), ValueKind::Vec2);
        assert_eq!(Value::vec3(0.0, 1.0, 2.0).kind(), ValueKind::Vec3);
        assert_eq!(Value::Vec4([0.0; 4]).kind(), ValueKind::Vec4);
        assert_eq!(Value::quat(0.0, 0.0, 0.0, 1.0).kind(), ValueKind::Quat);
        assert_eq!(Value::rgba(1.0, 1.0, 1.0, 1.0).kind(), ValueKind::ColorRgba);
        assert_eq!(Value::Vector(vec![1.0, 2.0]).kind(), ValueKind::Vector);
        assert_eq!(Value::Text("x".into()).kind(), ValueKind::Text);
    }

    /// it should round-trip representative variants through serde_json
    #[test]
    fn serde_roundtrip() {
        for v in [
            Value::f(2.5),
            Value::i(-4),
            Value::quat(0.0, 0.0, 0.0, 1.0),
            Value::Vector(vec![0.5, 1.5, 2.5]),
            Value::Text("hello".into()),
        ] {
            let s = serde_json::to_string(&v).unwrap();
            let back: Value = serde_json::from_str(&s).unwrap();
            assert_eq!(v, back);
        }
    }
}
