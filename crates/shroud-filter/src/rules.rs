//! Compiles raw filter configuration into typed matcher sets.
//!
//! A [`RuleSet`] is immutable once built. Configuration changes build a new
//! one and replace the old one wholesale.

use std::collections::HashSet;

use shroud_config::FilterConfig;
use tracing::debug;

use crate::wildcard::WildcardPattern;

/// Split a comma-separated list, trimming tokens and dropping empty ones.
pub fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a comma-separated list of integers. Tokens that are not valid
/// integers are dropped.
pub fn parse_id_list(list: &str) -> HashSet<i32> {
    split_list(list)
        .filter_map(|token| match token.parse::<i32>() {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Ignoring malformed id {token:?}: {e}");
                None
            }
        })
        .collect()
}

/// A set of lower-cased name patterns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamePatterns {
    patterns: Vec<WildcardPattern>,
}

impl NamePatterns {
    /// Parse a comma-separated pattern list. The whole list is lower-cased
    /// first, duplicates collapse to one entry.
    pub fn parse(list: &str) -> Self {
        let lowered = list.to_lowercase();
        let mut patterns: Vec<WildcardPattern> = Vec::new();
        for token in split_list(&lowered) {
            if patterns.iter().any(|p| p.as_str() == token) {
                continue;
            }
            match WildcardPattern::new(token) {
                Ok(p) => patterns.push(p),
                Err(e) => debug!("Ignoring unusable name pattern {token:?}: {e}"),
            }
        }
        Self { patterns }
    }

    /// Returns `true` if any pattern matches `name` under the general
    /// wildcard rules. `name` should already be standardized.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Returns `true` if `name` is literally one of the pattern strings.
    pub fn contains_exact(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.as_str() == name)
    }

    /// Iterates the raw pattern text of every entry containing a wildcard.
    pub fn wildcard_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .filter(|p| p.has_wildcard())
            .map(WildcardPattern::as_str)
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Every filter rule, compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Names hidden while alive.
    pub hide_alive_by_name: NamePatterns,
    /// Template IDs hidden while alive.
    pub hide_alive_by_id: HashSet<i32>,
    /// Animations that hide an entity while they play.
    pub hide_on_animation: HashSet<i32>,
    /// Names hidden once health reaches zero.
    pub hide_on_death_by_name: NamePatterns,
    /// Template IDs hidden once health reaches zero.
    pub hide_on_death_by_id: HashSet<i32>,
    /// Names never hidden by `hide_all_dead`.
    pub blacklist_by_name: NamePatterns,
    /// Template IDs never hidden by `hide_all_dead`.
    pub blacklist_by_id: HashSet<i32>,
    /// Visual effect type IDs that are never drawn.
    pub hide_effect_by_id: HashSet<i32>,
    /// Hide every dead, non-blacklisted entity.
    pub hide_all_dead: bool,
    /// Remove interaction options on dead entities.
    pub suppress_dead_actions: bool,
}

impl RuleSet {
    /// Compile a rule set from configuration. Never fails: malformed
    /// entries are dropped.
    pub fn compile(config: &FilterConfig) -> Self {
        let rules = Self {
            hide_alive_by_name: NamePatterns::parse(&config.hide_alive_names),
            hide_alive_by_id: parse_id_list(&config.hide_alive_ids),
            hide_on_animation: parse_id_list(&config.hide_on_animation_ids),
            hide_on_death_by_name: NamePatterns::parse(&config.hide_on_death_names),
            hide_on_death_by_id: parse_id_list(&config.hide_on_death_ids),
            blacklist_by_name: NamePatterns::parse(&config.blacklist_names),
            blacklist_by_id: parse_id_list(&config.blacklist_ids),
            hide_effect_by_id: parse_id_list(&config.hide_effect_ids),
            hide_all_dead: config.hide_all_dead,
            suppress_dead_actions: config.suppress_dead_actions,
        };
        debug!(
            alive_names = rules.hide_alive_by_name.len(),
            alive_ids = rules.hide_alive_by_id.len(),
            animations = rules.hide_on_animation.len(),
            death_names = rules.hide_on_death_by_name.len(),
            death_ids = rules.hide_on_death_by_id.len(),
            blacklist_names = rules.blacklist_by_name.len(),
            blacklist_ids = rules.blacklist_by_id.len(),
            effects = rules.hide_effect_by_id.len(),
            "Compiled filter rules"
        );
        rules
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::compile(&FilterConfig::default())
    }
}
