use serial_test::serial;
use super::*;
use crate::error::Error;

#[test]
fn test_default_settings_are_valid() {
    let settings = QualitySettings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.pixel_light_count, 4);
    assert_eq!(settings.shadow_cascades.count(), 4);
    assert_eq!(settings.shadow_projection, ShadowProjection::StableFit);
}

#[test]
fn test_cascade_counts() {
    assert_eq!(ShadowCascades::One.count(), 1);
    assert_eq!(ShadowCascades::Two.count(), 2);
    assert_eq!(ShadowCascades::Four.count(), 4);
}

// ============================================================================
// Validation failures (log through the global logger)
// ============================================================================

#[test]
#[serial]
fn test_too_many_vertex_lights_rejected() {
    let settings = QualitySettings { max_vertex_lights: 8, ..Default::default() };
    assert!(matches!(settings.validate(), Err(Error::InvalidParameter(_))));
}

#[test]
#[serial]
fn test_negative_shadow_distance_rejected() {
    let settings = QualitySettings { shadow_distance: -1.0, ..Default::default() };
    assert!(settings.validate().is_err());
}

#[test]
#[serial]
fn test_shadow_resolution_must_be_power_of_two() {
    let settings = QualitySettings { shadow_resolution: 1000, ..Default::default() };
    assert!(settings.validate().is_err());

    let settings = QualitySettings { shadow_resolution: 8, ..Default::default() };
    assert!(settings.validate().is_err());

    let settings = QualitySettings { shadow_resolution: 4096, ..Default::default() };
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_lod_bias_must_be_positive() {
    let settings = QualitySettings { lod_bias: 0.0, ..Default::default() };
    assert!(settings.validate().is_err());
}
