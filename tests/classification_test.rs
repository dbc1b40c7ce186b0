// tests/classification_test.rs
//
// Category inference through the public API.

use tidy_rename::core::{infer_category_with_confidence, RuleEngine};
use tidy_rename::record::{AudioRecord, Metadata};

fn meta(duration_secs: f64, channels: u16) -> Metadata {
    Metadata {
        duration_secs,
        channels,
        ..Default::default()
    }
}

#[test]
fn test_weapon_keywords() {
    let rules = RuleEngine::default();
    for name in ["gun_shot", "bullet_whiz", "sword_slash", "rifle_gunfire", "big_fire_gun"] {
        assert_eq!(rules.match_best_category(name), "SFX_Weapon", "{}", name);
    }
}

#[test]
fn test_standalone_fire_is_ambient() {
    let rules = RuleEngine::default();
    assert_eq!(rules.match_best_category("fire"), "Ambient");
    assert_eq!(rules.match_best_category("camp fire"), "Ambient");
}

#[test]
fn test_end_to_end_voice_and_weapon() {
    let rules = RuleEngine::default();

    let voice = infer_category_with_confidence(&rules, "scream_male_123.wav", Some(&meta(2.0, 1)));
    assert_eq!(voice.category, "SFX_Voice");
    assert!(voice.confidence >= 0.5);

    let weapon = infer_category_with_confidence(&rules, "gun_shot.wav", Some(&meta(1.0, 1)));
    assert_eq!(weapon.category, "SFX_Weapon");
    assert!(weapon.confidence >= 0.5);
}

#[test]
fn test_empty_evidence_defaults() {
    let result = infer_category_with_confidence(&RuleEngine::default(), "", None);
    assert_eq!(result.category, "SFX");
    assert_eq!(result.confidence, 0.3);
}

#[test]
fn test_scoring_is_pure() {
    let rules = RuleEngine::default();
    let a: Vec<_> = rules
        .score_all_categories("thunder_storm_rain")
        .iter()
        .map(|(c, s)| (c.to_string(), s))
        .collect();
    let b: Vec<_> = rules
        .score_all_categories("thunder_storm_rain")
        .iter()
        .map(|(c, s)| (c.to_string(), s))
        .collect();
    assert_eq!(a, b);
    assert!(!a.is_empty());
}

#[test]
fn test_record_from_library_name() {
    let record = AudioRecord::from_path("/lib/PE-Horror_BW.28968.wav", &RuleEngine::default());
    assert_eq!(record.id.as_deref(), Some("28968"));
    assert_eq!(record.source.as_deref(), Some("BW"));
    assert_eq!(record.category, "SFX_Percussion");
    assert!(record.has_tag("src:BW"));
}
