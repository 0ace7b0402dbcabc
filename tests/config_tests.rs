// Host-side tests for page configuration parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}

use config::*;
use sketch_core::SketchKind;

#[test]
fn missing_attributes_use_defaults() {
    let cfg = PageConfig::from_attributes(None, None).unwrap();
    assert_eq!(cfg, PageConfig::default());
    assert_eq!(cfg.sketch, SketchKind::Ouroboros);
    assert_eq!(cfg.seed, None);
}

#[test]
fn blank_attributes_use_defaults() {
    let cfg = PageConfig::from_attributes(Some("  "), Some("")).unwrap();
    assert_eq!(cfg, PageConfig::default());
}

#[test]
fn sketch_and_seed_are_parsed() {
    let cfg = PageConfig::from_attributes(Some(" cave "), Some("42")).unwrap();
    assert_eq!(cfg.sketch, SketchKind::Cave);
    assert_eq!(cfg.seed, Some(42));
}

#[test]
fn unknown_sketch_is_rejected() {
    let err = PageConfig::from_attributes(Some("spiral"), None).unwrap_err();
    assert!(err.to_string().contains("spiral"), "{err}");
}

#[test]
fn malformed_seed_is_rejected() {
    let err = PageConfig::from_attributes(None, Some("-3")).unwrap_err();
    assert!(err.to_string().contains(SEED_ATTR), "{err}");
}

#[test]
fn attribute_names_match_the_page_contract() {
    assert_eq!(CANVAS_ID, "app-canvas");
    assert_eq!(SKETCH_ATTR, "data-sketch");
    assert_eq!(SEED_ATTR, "data-seed");
    assert!(STATS_EVERY_FRAMES > 0);
}
