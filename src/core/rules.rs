// src/core/rules.rs
//
// Filename keyword matching over the category rule table.

use crate::config::{
    synonym, CategoryRule, FireHandling, CATEGORY_RULES, DEFAULT_CATEGORY, WEAPON_CONTEXT,
};

use super::scoring::CategoryScores;

/// Matches lowercased names against an ordered rule table
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    rules: &'a [CategoryRule],
}

impl Default for RuleEngine<'static> {
    fn default() -> Self {
        Self::new(CATEGORY_RULES)
    }
}

impl<'a> RuleEngine<'a> {
    pub fn new(rules: &'a [CategoryRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a [CategoryRule] {
        self.rules
    }

    /// First matching rule in declaration order, or the default category
    pub fn match_best_category(&self, name: &str) -> &'a str {
        let name_lower = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule_matches(&name_lower, rule))
            .map(|rule| rule.category)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Sum of rule confidences per category for every matching rule
    pub fn score_all_categories(&self, name: &str) -> CategoryScores {
        let name_lower = name.to_lowercase();
        let mut scores = CategoryScores::new();
        for rule in self.rules.iter().filter(|r| rule_matches(&name_lower, r)) {
            scores.add(rule.category, rule.confidence);
        }
        scores
    }

    /// Map a free-form category label onto a canonical one
    pub fn normalize_category(&self, label: &str) -> String {
        normalize_category(label)
    }
}

/// Synonym lookup, then `SFX_` auto-prefix for bare labels
pub fn normalize_category(label: &str) -> String {
    let upper = label.to_uppercase();

    if let Some(canonical) = synonym(&upper) {
        return canonical.to_string();
    }

    if !upper.contains('_') && !upper.contains("MUSIC") && !upper.contains("AMBIENT") {
        return format!("SFX_{}", upper);
    }

    label.to_string()
}

/// Whether a lowercased name mentions any weapon token
pub fn has_weapon_context(name_lower: &str) -> bool {
    WEAPON_CONTEXT.iter().any(|w| name_lower.contains(w))
}

fn rule_matches(name_lower: &str, rule: &CategoryRule) -> bool {
    if rule.exclusions.iter().any(|ex| name_lower.contains(ex)) {
        return false;
    }

    let keyword_hit = rule.keywords.iter().any(|kw| {
        name_lower.contains(kw)
            && (*kw != "fire"
                || rule.fire != FireHandling::WeaponCompound
                || is_weapon_fire(name_lower))
    });
    if keyword_hit {
        return true;
    }

    rule.fire == FireHandling::Standalone
        && is_standalone_fire(name_lower)
        && !has_weapon_context(name_lower)
}

/// "fire" used as gunfire: next to a weapon token or as a fire_ / _fire compound
fn is_weapon_fire(name_lower: &str) -> bool {
    has_weapon_context(name_lower) || name_lower.contains("fire_") || name_lower.contains("_fire")
}

fn is_standalone_fire(name_lower: &str) -> bool {
    let stem = match name_lower.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name_lower,
    };
    stem == "fire" || stem.starts_with("fire ") || stem.ends_with(" fire")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_best_category() {
        let engine = RuleEngine::default();
        let cases = [
            ("scream_male", "SFX_Voice"),
            ("voice_dialogue", "SFX_Voice"),
            ("creature_roar", "SFX_Creature"),
            ("monster_growl", "SFX_Creature"),
            ("gun_shot", "SFX_Weapon"),
            ("weapon_fire", "SFX_Weapon"),
            ("explosion_impact", "SFX_Impact"),
            ("footstep_walk", "SFX_Footstep"),
            ("car_engine", "SFX_Vehicle"),
            ("door_creak", "SFX_Object"),
            ("button_click", "SFX_UI"),
            ("wind_ambient", "Ambient"),
            ("music_track", "Music"),
            ("siren_alarm", "SFX_Alarm"),
            ("random_sound", "SFX"),
            ("", "SFX"),
            ("drone_sustained", "SFX_Drone"),
            ("loop_music", "Music"),
            ("riser_tension", "SFX_Riser"),
            ("whoosh_wind", "SFX_Whoosh"),
        ];
        for (input, expected) in cases {
            assert_eq!(engine.match_best_category(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_fire_routing() {
        let engine = RuleEngine::default();
        assert_eq!(engine.match_best_category("fire"), "Ambient");
        assert_eq!(engine.match_best_category("Fire.wav"), "Ambient");
        assert_eq!(engine.match_best_category("big fire"), "Ambient");
        assert_eq!(engine.match_best_category("fire_burst"), "SFX_Weapon");
        assert_eq!(engine.match_best_category("rifle_fire"), "SFX_Weapon");
        assert_eq!(engine.match_best_category("fire gun"), "SFX_Weapon");
        // bare "fire" inside a word is neither
        assert_eq!(engine.match_best_category("firefly"), "SFX");
    }

    #[test]
    fn test_exclusions_beat_keywords() {
        let engine = RuleEngine::default();
        let scores = engine.score_all_categories("car_atmos");
        assert!(scores.get("SFX_Vehicle").is_none());
        assert!(scores.get("Ambient").is_some());
    }

    #[test]
    fn test_score_all_categories_accumulates() {
        let engine = RuleEngine::default();
        // "loop" and "music" both feed Music
        let scores = engine.score_all_categories("music_loop");
        assert!((scores.get("Music").unwrap() - 1.6).abs() < 1e-9);
        assert!(scores.get("SFX_Weapon").is_none());
    }

    #[test]
    fn test_scoring_is_pure() {
        let engine = RuleEngine::default();
        let a = engine.score_all_categories("gun_shot_explosion.wav");
        let b = engine.score_all_categories("gun_shot_explosion.wav");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_category() {
        let cases = [
            ("SFX_Voice", "SFX_Voice"),
            ("SFX_UI", "SFX_UI"),
            ("UI", "UI"),
            ("Ambient", "Ambient"),
            ("Music", "Music"),
            ("SFX", "SFX"),
            ("PE", "SFX_Percussion"),
            ("DRONE", "SFX_Drone"),
            ("LOOP", "Music"),
            ("unknown", "SFX_UNKNOWN"),
            ("", "SFX_"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_category(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_custom_rule_table() {
        static RULES: &[CategoryRule] = &[CategoryRule {
            category: "SFX_Test",
            keywords: &["beep"],
            exclusions: &["quiet"],
            priority: 1,
            confidence: 0.5,
            fire: FireHandling::None,
        }];
        let engine = RuleEngine::new(RULES);
        assert_eq!(engine.match_best_category("beep_01"), "SFX_Test");
        assert_eq!(engine.match_best_category("quiet_beep"), "SFX");
    }
}
