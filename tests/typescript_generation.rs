//! TypeScript Generation Tests
//!
//! Validates that season records can be exported to TypeScript when the tauri
//! feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all records are properly configured for TypeScript export.
    fn assert_type<T: Type>() {}

    assert_type::<paddock::Driver>();
    assert_type::<paddock::Constructor>();
    assert_type::<paddock::Race>();
    assert_type::<paddock::RaceResult>();
    assert_type::<paddock::SeasonStats>();
    assert_type::<paddock::FastestLap>();
    assert_type::<paddock::TelemetryData>();
    assert_type::<paddock::LapTime>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Records still serialize without specta::Type
    let stats = paddock::FallbackDataset::bundled().season_stats;
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["completedRaces"], 5);
}
