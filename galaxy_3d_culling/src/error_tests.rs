//! Unit tests for error.rs
//!
//! Tests all Error variants, their trait implementations and the error macros.

use crate::error::{Error, Result};
use serial_test::serial;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_parameter_display() {
    let err = Error::InvalidParameter("shadow distance must be positive".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid parameter"));
    assert!(display.contains("shadow distance must be positive"));
}

#[test]
fn test_precondition_violated_display() {
    let err = Error::PreconditionViolated("3 nodes but 2 bounds".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Precondition violated"));
    assert!(display.contains("3 nodes but 2 bounds"));
}

#[test]
fn test_incompatible_oracle_display() {
    let err = Error::IncompatibleOracle("version 7".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Incompatible occlusion oracle"));
    assert!(display.contains("version 7"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidParameter("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_and_clone() {
    let err = Error::PreconditionViolated("mismatch".to_string());
    let cloned = err.clone();
    assert_eq!(err, cloned);
    assert!(format!("{:?}", cloned).contains("PreconditionViolated"));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

fn bail_if_zero(value: u32) -> Result<u32> {
    if value == 0 {
        crate::engine_bail!("galaxy3d::test", "value must be non-zero (got {})", value);
    }
    Ok(value)
}

#[test]
#[serial]
fn test_engine_err_builds_invalid_parameter() {
    let err = crate::engine_err!("galaxy3d::test", "bad value {}", 42);
    assert_eq!(err, Error::InvalidParameter("bad value 42".to_string()));
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    assert_eq!(bail_if_zero(3), Ok(3));
    match bail_if_zero(0) {
        Err(Error::InvalidParameter(msg)) => assert!(msg.contains("non-zero")),
        other => panic!("unexpected result: {:?}", other),
    }
}
