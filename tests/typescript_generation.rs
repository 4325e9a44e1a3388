//! TypeScript Generation Tests
//!
//! Validates that checkered types can be exported to TypeScript when the
//! tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all types are properly configured for TypeScript export
    fn assert_type<T: Type>() {}

    assert_type::<checkered::RaceEvent>();
    assert_type::<checkered::RaceInput>();
    assert_type::<checkered::RaceSnapshot>();
    assert_type::<checkered::LapRecord>();
    assert_type::<checkered::UpdateRate>();
    assert_type::<checkered::RespawnTarget>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = checkered::UpdateRate::Native;
}
