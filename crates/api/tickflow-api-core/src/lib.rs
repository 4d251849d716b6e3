//! tickflow-api-core
//!
//! The value contract shared by tickflow crates: the closed set of
//! interpolable runtime values and their kind tags. Kept dependency-light so
//! hosts can speak `Value` without pulling in the scheduler.

mod value;

pub use value::{Value, ValueKind};
