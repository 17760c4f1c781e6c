//! Device categorization: maps a device name to a visualization layer
//! and icon using an ordered list of configurable pattern rules.
//!
//! Rule evaluation order:
//! 1. Special rules (`even_odd_suffix`): if the trigger pattern matches,
//!    the trailing `-N` numeric suffix routes even N and odd N to two
//!    different layers with one shared icon. An unparsable suffix falls
//!    through to the ordered rule list rather than erroring.
//! 2. The ordered `device_categories` list, first match wins.
//! 3. A fixed default.
//!
//! Patterns are tested against the lowercased device name. A pattern
//! that fails to compile as a regex degrades to a literal substring
//! test (explicit two-tier matcher, not exception control flow).

use fabricmon_types::NodeIcon;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

/// One ordered categorization rule from `topology_config.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    /// Regex (or, on compile failure, substring) tested against the
    /// lowercased device name.
    pub pattern: String,
    /// Layer assigned on match.
    pub layer: u32,
    /// Icon assigned on match.
    pub icon: NodeIcon,
}

/// A special rule evaluated before the ordered list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialRule {
    /// Routes devices with a trailing `-N` suffix to one of two layers
    /// by N's parity, sharing a single icon. Used for paired units
    /// (e.g. MLAG peers) drawn on alternating rows.
    EvenOddSuffix {
        /// Trigger pattern, same two-tier matching as ordered rules.
        pattern: String,
        /// Layer for even N.
        even_layer: u32,
        /// Layer for odd N.
        odd_layer: u32,
        /// Shared icon.
        icon: NodeIcon,
    },
}

/// Fallback category when no rule matches.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefault {
    pub layer: u32,
    pub icon: NodeIcon,
}

/// Full categorizer configuration (`topology_config.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Ordered rule list, first match wins.
    #[serde(default)]
    pub device_categories: Vec<CategoryRule>,
    /// Special rules evaluated before the ordered list.
    #[serde(default)]
    pub special_rules: Vec<SpecialRule>,
    /// Category when nothing matches.
    pub default: CategoryDefault,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            device_categories: Vec::new(),
            special_rules: Vec::new(),
            default: CategoryDefault {
                layer: 2,
                icon: NodeIcon::Unknown,
            },
        }
    }
}

/// Two-tier matcher: compiled regex, or substring containment when the
/// pattern does not compile.
#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    Substring(String),
}

impl Matcher {
    fn compile(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => Matcher::Pattern(re),
            Err(e) => {
                warn!(
                    "Category pattern '{}' is not a valid regex ({}), using substring match",
                    pattern, e
                );
                Matcher::Substring(pattern.to_string())
            }
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(name),
            Matcher::Substring(s) => name.contains(s.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
enum CompiledRule {
    Ordered {
        matcher: Matcher,
        layer: u32,
        icon: NodeIcon,
    },
    EvenOddSuffix {
        matcher: Matcher,
        even_layer: u32,
        odd_layer: u32,
        icon: NodeIcon,
    },
}

/// Categorizer with all rule patterns compiled once up front.
#[derive(Debug, Clone)]
pub struct Categorizer {
    special: Vec<CompiledRule>,
    ordered: Vec<CompiledRule>,
    default_layer: u32,
    default_icon: NodeIcon,
}

impl Categorizer {
    /// Builds a categorizer from a parsed configuration.
    pub fn new(config: &CategoryConfig) -> Self {
        let special = config
            .special_rules
            .iter()
            .map(|rule| match rule {
                SpecialRule::EvenOddSuffix {
                    pattern,
                    even_layer,
                    odd_layer,
                    icon,
                } => CompiledRule::EvenOddSuffix {
                    matcher: Matcher::compile(pattern),
                    even_layer: *even_layer,
                    odd_layer: *odd_layer,
                    icon: *icon,
                },
            })
            .collect();

        let ordered = config
            .device_categories
            .iter()
            .map(|rule| CompiledRule::Ordered {
                matcher: Matcher::compile(&rule.pattern),
                layer: rule.layer,
                icon: rule.icon,
            })
            .collect();

        Self {
            special,
            ordered,
            default_layer: config.default.layer,
            default_icon: config.default.icon,
        }
    }

    /// Parses configuration text, degrading to the built-in default
    /// config on a YAML error.
    pub fn from_yaml(text: &str) -> Self {
        match serde_yaml::from_str::<CategoryConfig>(text) {
            Ok(config) => Self::new(&config),
            Err(e) => {
                warn!("Failed to parse category config: {}, using defaults", e);
                Self::new(&CategoryConfig::default())
            }
        }
    }

    /// Maps a device name to its `(layer, icon)`.
    pub fn categorize(&self, name: &str) -> (u32, NodeIcon) {
        let lower = name.to_lowercase();

        for rule in &self.special {
            if let CompiledRule::EvenOddSuffix {
                matcher,
                even_layer,
                odd_layer,
                icon,
            } = rule
            {
                if !matcher.is_match(&lower) {
                    continue;
                }
                // Trailing "-N": even and odd N land on different layers.
                // Unparsable suffix falls through to the ordered rules.
                match lower.rsplit_once('-').and_then(|(_, n)| n.parse::<u64>().ok()) {
                    Some(n) if n % 2 == 0 => return (*even_layer, *icon),
                    Some(_) => return (*odd_layer, *icon),
                    None => {
                        debug!(
                            "Device '{}' matched even/odd rule but has no numeric suffix",
                            name
                        );
                    }
                }
            }
        }

        for rule in &self.ordered {
            if let CompiledRule::Ordered {
                matcher,
                layer,
                icon,
            } = rule
            {
                if matcher.is_match(&lower) {
                    return (*layer, *icon);
                }
            }
        }

        (self.default_layer, self.default_icon)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&CategoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CategoryConfig {
        serde_yaml::from_str(
            r#"
special_rules:
  - type: even_odd_suffix
    pattern: "^mlag-"
    even_layer: 1
    odd_layer: 2
    icon: switch
device_categories:
  - { pattern: "^spine", layer: 0, icon: switch }
  - { pattern: "spine|leaf", layer: 1, icon: switch }
  - { pattern: "fw", layer: 3, icon: firewall }
  - { pattern: "[invalid", layer: 4, icon: server }
default:
  layer: 5
  icon: host
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let cat = Categorizer::new(&test_config());
        // "spine-1" matches both the ^spine rule and the spine|leaf rule;
        // the first one must win.
        assert_eq!(cat.categorize("spine-1"), (0, NodeIcon::Switch));
        assert_eq!(cat.categorize("leaf-3"), (1, NodeIcon::Switch));
    }

    #[test]
    fn test_name_is_lowercased_before_matching() {
        let cat = Categorizer::new(&test_config());
        assert_eq!(cat.categorize("SPINE-2"), (0, NodeIcon::Switch));
        assert_eq!(cat.categorize("Edge-FW-1"), (3, NodeIcon::Firewall));
    }

    #[test]
    fn test_invalid_regex_degrades_to_substring() {
        let cat = Categorizer::new(&test_config());
        // "[invalid" never compiles; a name containing it literally
        // must still match via the substring tier.
        assert_eq!(cat.categorize("rack[invalid-9"), (4, NodeIcon::Server));
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let cat = Categorizer::new(&test_config());
        assert_eq!(cat.categorize("storage-7"), (5, NodeIcon::Host));
    }

    #[test]
    fn test_even_odd_suffix_routing() {
        let cat = Categorizer::new(&test_config());
        assert_eq!(cat.categorize("mlag-pair-2"), (1, NodeIcon::Switch));
        assert_eq!(cat.categorize("mlag-pair-3"), (2, NodeIcon::Switch));
    }

    #[test]
    fn test_even_odd_without_suffix_falls_through() {
        let cat = Categorizer::new(&test_config());
        // Triggers the special rule but has no numeric suffix, so it
        // must fall through to the ordered list and then the default.
        assert_eq!(cat.categorize("mlag-core"), (5, NodeIcon::Host));
    }

    #[test]
    fn test_bad_yaml_degrades_to_default_config() {
        let cat = Categorizer::from_yaml(": not yaml [");
        assert_eq!(cat.categorize("anything"), (2, NodeIcon::Unknown));
    }
}
