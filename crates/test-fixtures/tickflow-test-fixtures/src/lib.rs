//! Embedded test fixtures: named tick scripts.
//!
//! A tick script is a per-frame dt sequence (seconds). Integration tests
//! replay them against a scheduler so timing-sensitive behavior is exercised
//! with realistic, repeatable frame pacing.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static SCRIPTS: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/tick_scripts.json");
    serde_json::from_str(raw).expect("tick script manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scripts: HashMap<String, Vec<f32>>,
}

/// Load a named dt sequence.
pub fn tick_script(name: &str) -> Result<Vec<f32>> {
    SCRIPTS
        .scripts
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow!("unknown tick script `{name}`"))
}

/// Names of every embedded script, sorted.
pub fn script_names() -> Vec<String> {
    let mut names: Vec<String> = SCRIPTS.scripts.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_resolve() {
        assert!(!script_names().is_empty());
        let dts = tick_script("fixed_quarter").unwrap();
        assert_eq!(dts.len(), 16);
        assert!(dts.iter().all(|dt| *dt > 0.0));
        assert!(tick_script("nope").is_err());
    }
}
