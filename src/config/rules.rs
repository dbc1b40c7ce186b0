// src/config/rules.rs
//
// Built-in filename rule table and category synonym table.
// Both are read-only for the life of the process.

use serde::Serialize;

/// Fallback category for anything the rules cannot place
pub const DEFAULT_CATEGORY: &str = "SFX";

/// Tokens that mark a name as weapon-related
pub const WEAPON_CONTEXT: &[&str] = &["gun", "weapon", "shot", "gunfire", "firearm"];

/// How a rule treats the ambiguous token "fire"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FireHandling {
    /// No special treatment
    None,
    /// The keyword "fire" only counts next to weapon context or as a fire compound
    WeaponCompound,
    /// A standalone "fire" matches when no weapon context is present
    Standalone,
}

/// One filename matching rule
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    /// Any of these disqualifies the rule regardless of keyword hits
    pub exclusions: &'static [&'static str],
    /// Informational; declaration order is what the engine honours
    pub priority: u8,
    /// Score contributed to the category when the rule matches
    pub confidence: f64,
    pub fire: FireHandling,
}

impl CategoryRule {
    const fn new(category: &'static str, keywords: &'static [&'static str], priority: u8) -> Self {
        Self {
            category,
            keywords,
            exclusions: &[],
            priority,
            confidence: 0.8,
            fire: FireHandling::None,
        }
    }

    const fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    const fn excluding(mut self, exclusions: &'static [&'static str]) -> Self {
        self.exclusions = exclusions;
        self
    }

    const fn fire(mut self, fire: FireHandling) -> Self {
        self.fire = fire;
        self
    }
}

/// Rules in priority order: specific rules are declared first
pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule::new("SFX_Drone", &["drone"], 10),
    CategoryRule::new("Music", &["loop"], 10),
    CategoryRule::new("SFX_Riser", &["riser"], 10),
    CategoryRule::new(
        "SFX_Time",
        &[
            "slowmotion",
            "slow motion",
            "slow-motion",
            "timelapse",
            "time lapse",
            "time-lapse",
        ],
        10,
    ),
    CategoryRule::new("SFX_Transition", &["transition"], 10).confidence(0.7),
    CategoryRule::new("SFX_Whoosh", &["whoosh"], 10),
    CategoryRule::new(
        "SFX_Voice",
        &[
            "scream", "voice", "dialogue", "speech", "male", "female", "grunt", "groan",
        ],
        8,
    ),
    CategoryRule::new(
        "SFX_Creature",
        &[
            "creature", "monster", "animal", "beast", "roar", "growl", "howl", "moan", "cat",
            "dog", "cow", "rooster", "monkey", "meow", "bark", "moo", "pur",
        ],
        8,
    ),
    // before vehicles so "atmos" style names land here
    CategoryRule::new(
        "Ambient",
        &[
            "wind", "rain", "thunder", "storm", "water", "ocean", "forest", "nature", "atmos",
            "atmosphere", "ambient", "ambience", "flame", "flames", "burning", "ember",
            "campfire", "bonfire", "jungle", "rainforest", "insect", "cicada", "cricket", "frog",
            "waterfall", "river", "stream", "wave", "beach", "underwater", "monsoon", "downpour",
            "raindrop", "lightning", "wind chime", "windchime", "city", "urban", "traffic",
            "crowd", "market", "construction", "airport", "station", "restaurant", "kitchen",
            "street", "highway", "freeway", "intersection", "walla", "room tone", "roomtone",
        ],
        9,
    )
    .fire(FireHandling::Standalone),
    CategoryRule::new(
        "SFX_Weapon",
        &[
            "gun", "weapon", "shot", "bullet", "sword", "slash", "punch", "combat", "gunfire",
            "firearm", "samurai", "kung fu", "karate", "fire",
        ],
        7,
    )
    .fire(FireHandling::WeaponCompound),
    CategoryRule::new(
        "SFX_Impact",
        &[
            "explosion", "explode", "impact", "crash", "slam", "thud", "bang", "boom", "gong",
            "hit",
        ],
        7,
    ),
    CategoryRule::new(
        "SFX_Footstep",
        &["footstep", "step", "walk", "run", "jump", "land"],
        7,
    ),
    CategoryRule::new(
        "SFX_Vehicle",
        &[
            "vehicle", "car", "engine", "motor", "tire", "wheel", "drive", "bus", "train",
            "truck", "motorbike", "motorcycle", "tuktuk", "aeroplane", "airplane", "ferry",
            "boat", "driveby", "drive-by", "pass by", "passby", "hoot", "honk", "horn",
        ],
        6,
    )
    .excluding(&[
        "atmos",
        "atmosphere",
        "ambient",
        "ambience",
        "room tone",
        "roomtone",
    ]),
    CategoryRule::new(
        "SFX_UI",
        &[
            "ui", "interface", "button", "click", "select", "hover", "menu", "notification",
        ],
        7,
    )
    .confidence(0.9),
    CategoryRule::new(
        "SFX_Alarm",
        &["alarm", "alert", "siren", "warning", "beep", "buzz"],
        7,
    ),
    CategoryRule::new(
        "SFX_Mechanical",
        &["mechanical", "machine", "gear", "whir", "clank", "robot"],
        6,
    ),
    CategoryRule::new(
        "SFX_Object",
        &[
            "door", "open", "close", "creak", "squeak", "hinge", "object", "item", "pickup",
            "drop",
        ],
        6,
    ),
    CategoryRule::new(
        "SFX_Percussion",
        &[
            "drum",
            "percussion",
            "beat",
            "kick",
            "snare",
            "cymbal",
            "gong",
            "tambourine",
            "bell",
            "clap",
        ],
        7,
    ),
    CategoryRule::new(
        "SFX_Traditional",
        &[
            "traditional",
            "ceremony",
            "ceremonial",
            "temple",
            "chant",
            "chanting",
            "pray",
            "praying",
            "royal",
            "emperor",
            "ancient",
        ],
        7,
    ),
    CategoryRule::new(
        "SFX_String",
        &["pluck", "string", "guitar", "harp", "sitar", "pipa"],
        7,
    ),
    CategoryRule::new(
        "Music",
        &["music", "song", "track", "score", "melody", "theme"],
        6,
    ),
];

/// Uppercase label -> canonical category
pub static CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    ("PE", "SFX_Percussion"),
    ("PERCUSSION", "SFX_Percussion"),
    ("SFX", "SFX"),
    ("VOICE", "SFX_Voice"),
    ("CREATURE", "SFX_Creature"),
    ("WEAPON", "SFX_Weapon"),
    ("IMPACT", "SFX_Impact"),
    ("FOOTSTEP", "SFX_Footstep"),
    ("VEHICLE", "SFX_Vehicle"),
    ("ALARM", "SFX_Alarm"),
    ("MECHANICAL", "SFX_Mechanical"),
    ("OBJECT", "SFX_Object"),
    ("AMBIENT", "Ambient"),
    ("MUSIC", "Music"),
    ("UI", "UI"),
    ("DIALOGUE", "Dialogue"),
    ("DRONE", "SFX_Drone"),
    ("LOOP", "Music"),
    ("RISER", "SFX_Riser"),
    ("SLOWMOTION", "SFX_Time"),
    ("SLOW_MOTION", "SFX_Time"),
    ("TIMELAPSE", "SFX_Time"),
    ("TIME_LAPSE", "SFX_Time"),
    ("TRANSITION", "SFX_Transition"),
    ("WHOOSH", "SFX_Whoosh"),
    ("TRADITIONAL", "SFX_Traditional"),
    ("CEREMONIAL", "SFX_Traditional"),
    ("STRING", "SFX_String"),
    ("CITY", "Ambient"),
    ("URBAN", "Ambient"),
];

/// Look up a synonym for an already-uppercased label
pub fn synonym(label_upper: &str) -> Option<&'static str> {
    CATEGORY_SYNONYMS
        .iter()
        .find(|(from, _)| *from == label_upper)
        .map(|(_, to)| *to)
}
