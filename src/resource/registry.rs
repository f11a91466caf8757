//! Resource Registry - static table of API endpoints
//!
//! Every collection the reference API serves is listed here once, in the
//! order the API index reports them. The pattern lookup used by the link
//! resolver is built from this table on first access.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Path of the API index
pub const API_PREFIX: &str = "/api";

/// Placeholder segment for item patterns
pub const WILDCARD: &str = "*";

/// A collection served by the reference API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    AbilityScores,
    Alignments,
    Backgrounds,
    Classes,
    Conditions,
    DamageTypes,
    EquipmentCategories,
    Equipment,
    Feats,
    Features,
    Languages,
    MagicItems,
    MagicSchools,
    Monsters,
    Proficiencies,
    Races,
    RuleSections,
    Rules,
    Skills,
    Spells,
    Subclasses,
    Subraces,
    Traits,
    WeaponProperties,
}

/// Static description of one endpoint
#[derive(Debug, Clone, Copy)]
pub struct EndpointDef {
    pub endpoint: Endpoint,
    /// Path segment under `/api`
    pub segment: &'static str,
    pub display_name: &'static str,
    /// Name of a single item
    pub item_name: &'static str,
    /// An item index known to exist upstream
    pub sample_index: &'static str,
}

/// Endpoint table, indexed by `Endpoint as usize`
pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        endpoint: Endpoint::AbilityScores,
        segment: "ability-scores",
        display_name: "Ability Scores",
        item_name: "Ability Score",
        sample_index: "cha",
    },
    EndpointDef {
        endpoint: Endpoint::Alignments,
        segment: "alignments",
        display_name: "Alignments",
        item_name: "Alignment",
        sample_index: "chaotic-evil",
    },
    EndpointDef {
        endpoint: Endpoint::Backgrounds,
        segment: "backgrounds",
        display_name: "Backgrounds",
        item_name: "Background",
        sample_index: "acolyte",
    },
    EndpointDef {
        endpoint: Endpoint::Classes,
        segment: "classes",
        display_name: "Classes",
        item_name: "Class",
        sample_index: "barbarian",
    },
    EndpointDef {
        endpoint: Endpoint::Conditions,
        segment: "conditions",
        display_name: "Conditions",
        item_name: "Condition",
        sample_index: "blinded",
    },
    EndpointDef {
        endpoint: Endpoint::DamageTypes,
        segment: "damage-types",
        display_name: "Damage Types",
        item_name: "Damage Type",
        sample_index: "acid",
    },
    EndpointDef {
        endpoint: Endpoint::EquipmentCategories,
        segment: "equipment-categories",
        display_name: "Equipment Categories",
        item_name: "Equipment Category",
        sample_index: "adventuring-gear",
    },
    EndpointDef {
        endpoint: Endpoint::Equipment,
        segment: "equipment",
        display_name: "Equipment",
        item_name: "Equipment Item",
        sample_index: "abacus",
    },
    EndpointDef {
        endpoint: Endpoint::Feats,
        segment: "feats",
        display_name: "Feats",
        item_name: "Feat",
        sample_index: "grappler",
    },
    EndpointDef {
        endpoint: Endpoint::Features,
        segment: "features",
        display_name: "Features",
        item_name: "Feature",
        sample_index: "action-surge-1-use",
    },
    EndpointDef {
        endpoint: Endpoint::Languages,
        segment: "languages",
        display_name: "Languages",
        item_name: "Language",
        sample_index: "abyssal",
    },
    EndpointDef {
        endpoint: Endpoint::MagicItems,
        segment: "magic-items",
        display_name: "Magic Items",
        item_name: "Magic Item",
        sample_index: "adamantine-armor",
    },
    EndpointDef {
        endpoint: Endpoint::MagicSchools,
        segment: "magic-schools",
        display_name: "Magic Schools",
        item_name: "Magic School",
        sample_index: "abjuration",
    },
    EndpointDef {
        endpoint: Endpoint::Monsters,
        segment: "monsters",
        display_name: "Monsters",
        item_name: "Monster",
        sample_index: "aboleth",
    },
    EndpointDef {
        endpoint: Endpoint::Proficiencies,
        segment: "proficiencies",
        display_name: "Proficiencies",
        item_name: "Proficiency",
        sample_index: "alchemists-supplies",
    },
    EndpointDef {
        endpoint: Endpoint::Races,
        segment: "races",
        display_name: "Races",
        item_name: "Race",
        sample_index: "dragonborn",
    },
    EndpointDef {
        endpoint: Endpoint::RuleSections,
        segment: "rule-sections",
        display_name: "Rule Sections",
        item_name: "Rule Section",
        sample_index: "ability-checks",
    },
    EndpointDef {
        endpoint: Endpoint::Rules,
        segment: "rules",
        display_name: "Rules",
        item_name: "Rule",
        sample_index: "adventuring",
    },
    EndpointDef {
        endpoint: Endpoint::Skills,
        segment: "skills",
        display_name: "Skills",
        item_name: "Skill",
        sample_index: "acrobatics",
    },
    EndpointDef {
        endpoint: Endpoint::Spells,
        segment: "spells",
        display_name: "Spells",
        item_name: "Spell",
        sample_index: "acid-arrow",
    },
    EndpointDef {
        endpoint: Endpoint::Subclasses,
        segment: "subclasses",
        display_name: "Subclasses",
        item_name: "Subclass",
        sample_index: "berserker",
    },
    EndpointDef {
        endpoint: Endpoint::Subraces,
        segment: "subraces",
        display_name: "Subraces",
        item_name: "Subrace",
        sample_index: "high-elf",
    },
    EndpointDef {
        endpoint: Endpoint::Traits,
        segment: "traits",
        display_name: "Traits",
        item_name: "Trait",
        sample_index: "artificers-lore",
    },
    EndpointDef {
        endpoint: Endpoint::WeaponProperties,
        segment: "weapon-properties",
        display_name: "Weapon Properties",
        item_name: "Weapon Property",
        sample_index: "ammunition",
    },
];

impl Endpoint {
    /// Static description of this endpoint
    pub fn def(self) -> &'static EndpointDef {
        &ENDPOINTS[self as usize]
    }

    /// All endpoints in API index order
    pub fn all() -> impl Iterator<Item = Endpoint> {
        ENDPOINTS.iter().map(|def| def.endpoint)
    }

    /// Look up an endpoint by its path segment
    pub fn from_segment(segment: &str) -> Option<Endpoint> {
        ENDPOINTS
            .iter()
            .find(|def| def.segment == segment)
            .map(|def| def.endpoint)
    }

    pub fn segment(self) -> &'static str {
        self.def().segment
    }

    pub fn display_name(self) -> &'static str {
        self.def().display_name
    }

    pub fn item_name(self) -> &'static str {
        self.def().item_name
    }

    /// Collection path, e.g. `/api/ability-scores`
    pub fn path(self) -> String {
        format!("{}/{}", API_PREFIX, self.segment())
    }

    /// Path of one item; the index is percent-encoded
    pub fn item_path(self, index: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(index))
    }

    /// Path of the sample item
    pub fn sample_path(self) -> String {
        self.item_path(self.def().sample_index)
    }
}

/// What a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The API index at `/api`
    Index,
    Collection(Endpoint),
    Item(Endpoint),
    /// Anything no registered pattern covers
    Generic,
}

impl ResourceKind {
    /// Registered pattern for this kind; `Generic` has none
    pub fn pattern(self) -> Option<String> {
        match self {
            ResourceKind::Index => Some(API_PREFIX.to_string()),
            ResourceKind::Collection(endpoint) => Some(endpoint.path()),
            ResourceKind::Item(endpoint) => Some(format!("{}/{}", endpoint.path(), WILDCARD)),
            ResourceKind::Generic => None,
        }
    }

    /// Map an item kind to the collection it belongs to
    pub fn collection(self) -> ResourceKind {
        match self {
            ResourceKind::Item(endpoint) => ResourceKind::Collection(endpoint),
            other => other,
        }
    }

    pub fn endpoint(self) -> Option<Endpoint> {
        match self {
            ResourceKind::Collection(endpoint) | ResourceKind::Item(endpoint) => Some(endpoint),
            ResourceKind::Index | ResourceKind::Generic => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Index => "API Index",
            ResourceKind::Collection(endpoint) => endpoint.display_name(),
            ResourceKind::Item(endpoint) => endpoint.item_name(),
            ResourceKind::Generic => "Resource",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Index => write!(f, "index"),
            ResourceKind::Collection(endpoint) => write!(f, "collection({})", endpoint.segment()),
            ResourceKind::Item(endpoint) => write!(f, "item({})", endpoint.segment()),
            ResourceKind::Generic => write!(f, "generic"),
        }
    }
}

/// Global pattern map built from [`ENDPOINTS`]
static REGISTRY: OnceLock<HashMap<String, ResourceKind>> = OnceLock::new();

/// Get the pattern registry (built on first access)
pub fn get_registry() -> &'static HashMap<String, ResourceKind> {
    REGISTRY.get_or_init(|| {
        let mut registry = HashMap::with_capacity(ENDPOINTS.len() * 2 + 1);
        registry.insert(API_PREFIX.to_string(), ResourceKind::Index);

        for endpoint in Endpoint::all() {
            for kind in [ResourceKind::Collection(endpoint), ResourceKind::Item(endpoint)] {
                if let Some(pattern) = kind.pattern() {
                    registry.insert(pattern, kind);
                }
            }
        }

        registry
    })
}

/// Get the kind registered for an exact pattern
pub fn get_kind(pattern: &str) -> Option<ResourceKind> {
    get_registry().get(pattern).copied()
}

/// Get all registered patterns, sorted
pub fn get_all_patterns() -> Vec<&'static str> {
    let mut patterns: Vec<&'static str> = get_registry().keys().map(|s| s.as_str()).collect();
    patterns.sort_unstable();
    patterns
}
