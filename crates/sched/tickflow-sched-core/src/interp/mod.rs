//! Kind-dispatched value interpolation.
//!
//! The table maps each [`ValueKind`] to its interpolation function and is
//! populated lazily — one resolution per distinct kind, not per call. Kinds
//! with no meaningful blend (and mismatched operand kinds) fall back to step
//! semantics; interpolation never fails.

pub mod functions;

use hashbrown::HashMap;
use tickflow_api_core::{Value, ValueKind};

use self::functions::{
    lerp_f32, lerp_i32, lerp_slice, lerp_vec2, lerp_vec3, lerp_vec4, nlerp_quat, step_value,
};

pub type LerpFn = fn(&Value, &Value, f32) -> Value;

/// Memoized kind -> interpolation-function dispatch.
#[derive(Default)]
pub struct LerpTable {
    table: HashMap<ValueKind, LerpFn>,
}

impl LerpTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolate between two values at normalized progress `t`.
    /// Mismatched kinds step on the `from` side rather than erroring.
    pub fn lerp(&mut self, from: &Value, to: &Value, t: f32) -> Value {
        if from.kind() != to.kind() {
            return step_value(from, to, t);
        }
        let f = self.resolved(from.kind());
        f(from, to, t)
    }

    fn resolved(&mut self, kind: ValueKind) -> LerpFn {
        *self.table.entry(kind).or_insert_with(|| resolve(kind))
    }

    /// Number of kinds resolved so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Closed, exhaustive mapping from kind to formula. Kinds with no blend
/// (Bool, Text) take the step arm.
fn resolve(kind: ValueKind) -> LerpFn {
    match kind {
        ValueKind::Float => lerp_value_float,
        ValueKind::Int => lerp_value_int,
        ValueKind::Vec2 => lerp_value_vec2,
        ValueKind::Vec3 => lerp_value_vec3,
        ValueKind::Vec4 => lerp_value_vec4,
        ValueKind::Quat => lerp_value_quat,
        ValueKind::ColorRgba => lerp_value_color,
        ValueKind::Vector => lerp_value_vector,
        ValueKind::Bool | ValueKind::Text => step_value,
    }
}

fn lerp_value_float(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => Value::Float(lerp_f32(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_int(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Value::Int(lerp_i32(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_vec2(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Vec2(x), Value::Vec2(y)) => Value::Vec2(lerp_vec2(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_vec3(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Vec3(x), Value::Vec3(y)) => Value::Vec3(lerp_vec3(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_vec4(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Vec4(x), Value::Vec4(y)) => Value::Vec4(lerp_vec4(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_quat(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Quat(x), Value::Quat(y)) => Value::Quat(nlerp_quat(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_color(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::ColorRgba(x), Value::ColorRgba(y)) => Value::ColorRgba(lerp_vec4(*x, *y, t)),
        _ => step_value(a, b, t),
    }
}

fn lerp_value_vector(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Vector(x), Value::Vector(y)) => match lerp_slice(x, y, t) {
            Some(v) => Value::Vector(v),
            // Length mismatch has no componentwise blend; hold then switch.
            None => step_value(a, b, t),
        },
        _ => step_value(a, b, t),
    }
}
