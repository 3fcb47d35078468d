//! Per-tick hide/unhide evaluation.
//!
//! Each snapshot goes through three steps, in order:
//!
//! 1. Hide: unless the entity is exempt, hide it if any rule says so.
//! 2. Animation reversal: an animation-triggered hide lapses as soon as the
//!    entity stops playing a hiding animation, whatever else is true.
//! 3. General reversal: a hidden, named entity that neither an alive rule
//!    nor a playing animation still covers is revealed, unless it is dead
//!    while `hide_all_dead` is on.
//!
//! Exempt entities skip step 1 only.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::rules::{NamePatterns, RuleSet};
use crate::snapshot::{EntitySnapshot, is_exempt};
use crate::tracker::VisibilityTracker;
use crate::wildcard::standardize;

/// Net visibility changes produced by one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickTransitions {
    /// Indices that became hidden this tick.
    pub hidden: HashSet<i32>,
    /// Indices that became visible again this tick.
    pub revealed: HashSet<i32>,
}

impl TickTransitions {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.revealed.is_empty()
    }
}

fn name_matches(patterns: &NamePatterns, name: Option<&str>) -> bool {
    name.is_some_and(|n| patterns.matches(n))
}

/// Decide whether a snapshot should be hidden, ignoring exemptions and
/// current tracker state. `name` is the standardized name.
fn rule_hides(rules: &RuleSet, npc: &EntitySnapshot, name: Option<&str>) -> bool {
    let dead = npc.health_depleted();

    name_matches(&rules.hide_alive_by_name, name)
        || rules.hide_alive_by_id.contains(&npc.id)
        || rules.hide_on_animation.contains(&npc.animation_id)
        || (rules.hide_all_dead
            && dead
            && name.is_some()
            && !name_matches(&rules.blacklist_by_name, name)
            && !rules.blacklist_by_id.contains(&npc.id))
        || (dead && name_matches(&rules.hide_on_death_by_name, name))
        || (dead && rules.hide_on_death_by_id.contains(&npc.id))
}

/// Returns `true` if the rules hide this snapshot. Exempt entities are
/// never hidden.
pub fn should_hide(rules: &RuleSet, npc: &EntitySnapshot) -> bool {
    if is_exempt(npc.id) {
        return false;
    }
    let name = npc.name.as_deref().map(standardize);
    rule_hides(rules, npc, name.as_deref())
}

/// Apply all three steps to one snapshot.
fn evaluate_one(tracker: &mut VisibilityTracker, rules: &RuleSet, npc: &EntitySnapshot) {
    let index = npc.index;
    let name = npc.name.as_deref().map(standardize);
    let name = name.as_deref();
    let animating = rules.hide_on_animation.contains(&npc.animation_id);

    if !is_exempt(npc.id) && rule_hides(rules, npc, name) && !tracker.is_hidden(index) {
        tracker.hide(index, animating);
        trace!(index, id = npc.id, "Hide");
    }

    if tracker.is_animation_hidden(index) && !animating {
        tracker.reveal(index);
        trace!(index, id = npc.id, "Animation ended");
    }

    if tracker.is_hidden(index)
        && (!tracker.is_animation_hidden(index) || !animating)
        && !rules.hide_alive_by_id.contains(&npc.id)
        && name.is_some_and(|n| !rules.hide_alive_by_name.matches(n))
        && (!npc.is_dead || !rules.hide_all_dead)
    {
        tracker.reveal(index);
        trace!(index, id = npc.id, "Unhide");
    }
}

/// Run one simulation step over `snapshots`, updating `tracker` in place.
pub fn evaluate_tick(
    tracker: &mut VisibilityTracker,
    rules: &RuleSet,
    snapshots: &[EntitySnapshot],
) -> TickTransitions {
    let mut transitions = TickTransitions::default();

    for npc in snapshots {
        let was_hidden = tracker.is_hidden(npc.index);
        evaluate_one(tracker, rules, npc);
        match (was_hidden, tracker.is_hidden(npc.index)) {
            (false, true) => {
                transitions.hidden.insert(npc.index);
            }
            (true, false) => {
                debug!(
                    index = npc.index,
                    name = npc.name.as_deref().unwrap_or_default(),
                    "Unhide"
                );
                transitions.revealed.insert(npc.index);
            }
            _ => {}
        }
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_config::FilterConfig;

    fn rules(config: FilterConfig) -> RuleSet {
        RuleSet::compile(&config)
    }

    fn assert_subset(tracker: &VisibilityTracker) {
        assert!(
            tracker.animation_hidden().is_subset(tracker.hidden()),
            "animation_hidden {:?} not a subset of hidden {:?}",
            tracker.animation_hidden(),
            tracker.hidden()
        );
    }

    #[test]
    fn test_hide_alive_by_id() {
        let rules = rules(FilterConfig {
            hide_alive_ids: "100".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        let t = evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::new(100, 1, "Guard")]);
        assert!(tracker.is_hidden(1));
        assert!(t.hidden.contains(&1));
        assert!(!tracker.is_animation_hidden(1));
    }

    #[test]
    fn test_hide_alive_by_name_uses_standardized_name() {
        let rules = rules(FilterConfig {
            hide_alive_names: "drag*".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(
            &mut tracker,
            &rules,
            &[
                EntitySnapshot::new(1, 1, "<col=ff0000>Dragon</col>"),
                EntitySnapshot::new(2, 2, "Dragon Champion"),
                EntitySnapshot::new(3, 3, "Black dragon"),
            ],
        );
        assert!(tracker.is_hidden(1));
        assert!(tracker.is_hidden(2));
        assert!(!tracker.is_hidden(3));
    }

    #[test]
    fn test_unnamed_entity_never_matches_names() {
        let rules = rules(FilterConfig {
            hide_alive_names: "*".to_string(),
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::unnamed(1, 1).dead()]);
        assert!(!tracker.is_hidden(1));
    }

    #[test]
    fn test_animation_hide_marks_both_sets() {
        let rules = rules(FilterConfig {
            hide_on_animation_ids: "42".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(1, 5, "Imp").with_animation(42)],
        );
        assert!(tracker.is_hidden(5));
        assert!(tracker.is_animation_hidden(5));
        assert_subset(&tracker);
    }

    #[test]
    fn test_animation_reversal_overrides_other_rules() {
        let rules = rules(FilterConfig {
            hide_on_animation_ids: "42".to_string(),
            hide_alive_ids: "100".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(100, 5, "Imp").with_animation(42)],
        );
        assert!(tracker.is_animation_hidden(5));

        // Still covered by hide_alive_ids, but the animation hide lapses.
        let t = evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(100, 5, "Imp").with_animation(0)],
        );
        assert!(!tracker.is_hidden(5));
        assert!(!tracker.is_animation_hidden(5));
        assert!(t.revealed.contains(&5));

        // The next tick hides it again through the alive rule, not by animation.
        evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(100, 5, "Imp").with_animation(0)],
        );
        assert!(tracker.is_hidden(5));
        assert!(!tracker.is_animation_hidden(5));
    }

    #[test]
    fn test_hide_all_dead_hides_and_unhides() {
        let rules = rules(FilterConfig {
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();

        evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(1, 9, "Goblin").with_health(50)],
        );
        assert!(!tracker.is_hidden(9));

        evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::new(1, 9, "Goblin").dead()]);
        assert!(tracker.is_hidden(9));

        let t = evaluate_tick(
            &mut tracker,
            &rules,
            &[EntitySnapshot::new(1, 9, "Goblin").with_health(10)],
        );
        assert!(!tracker.is_hidden(9));
        assert!(t.revealed.contains(&9));
    }

    #[test]
    fn test_hide_all_dead_respects_blacklist() {
        let rules = rules(FilterConfig {
            hide_all_dead: true,
            blacklist_names: "*imp*".to_string(),
            blacklist_ids: "300".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(
            &mut tracker,
            &rules,
            &[
                EntitySnapshot::new(1, 1, "Deformed imp").dead(),
                EntitySnapshot::new(300, 2, "Goblin").dead(),
                EntitySnapshot::new(2, 3, "Goblin").dead(),
            ],
        );
        assert!(!tracker.is_hidden(1));
        assert!(!tracker.is_hidden(2));
        assert!(tracker.is_hidden(3));
    }

    #[test]
    fn test_death_rule_without_hide_all_dead_reverses_same_tick() {
        let rules = rules(FilterConfig {
            hide_on_death_ids: "100".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        let t = evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::new(100, 1, "Goblin").dead()]);
        assert!(!tracker.is_hidden(1));
        assert!(t.is_empty());
    }

    #[test]
    fn test_death_rule_with_hide_all_dead_persists() {
        let rules = rules(FilterConfig {
            hide_on_death_names: "goblin".to_string(),
            blacklist_names: "goblin".to_string(),
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::new(1, 1, "Goblin").dead()]);
        assert!(tracker.is_hidden(1));
    }

    #[test]
    fn test_exempt_entity_never_hidden() {
        let rules = rules(FilterConfig {
            hide_on_death_names: "totem".to_string(),
            hide_alive_ids: "9434".to_string(),
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        let totem = EntitySnapshot::new(9434, 4, "Totem").dead();
        assert!(!should_hide(&rules, &totem));
        evaluate_tick(&mut tracker, &rules, &[totem]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_exempt_entity_still_reversed() {
        let rules = rules(FilterConfig {
            hide_alive_ids: "100".to_string(),
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        // Index 4 was hidden while it held a different entity; the slot now
        // holds an exempt actor that no rule covers.
        tracker.hide(4, false);
        evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::new(7550, 4, "Great Olm")]);
        assert!(!tracker.is_hidden(4));
    }

    #[test]
    fn test_hidden_unnamed_entity_is_not_reversed() {
        let rules = RuleSet::default();
        let mut tracker = VisibilityTracker::new();
        tracker.hide(8, false);
        evaluate_tick(&mut tracker, &rules, &[EntitySnapshot::unnamed(1, 8)]);
        assert!(tracker.is_hidden(8));
    }

    #[test]
    fn test_tick_is_idempotent() {
        let rules = rules(FilterConfig {
            hide_alive_names: "goblin".to_string(),
            hide_on_animation_ids: "42".to_string(),
            hide_on_death_ids: "7".to_string(),
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let snapshots = [
            EntitySnapshot::new(1, 1, "Goblin"),
            EntitySnapshot::new(2, 2, "Imp").with_animation(42),
            EntitySnapshot::new(3, 3, "Cow").dead(),
            EntitySnapshot::new(7, 4, "Rat").dead(),
            EntitySnapshot::new(4, 5, "Man").with_health(30),
            EntitySnapshot::new(9434, 6, "Totem").dead(),
        ];
        let mut tracker = VisibilityTracker::new();
        evaluate_tick(&mut tracker, &rules, &snapshots);
        let after_first = tracker.clone();
        assert_subset(&tracker);

        let t = evaluate_tick(&mut tracker, &rules, &snapshots);
        assert!(t.is_empty());
        assert_eq!(tracker, after_first);
    }

    #[test]
    fn test_subset_invariant_across_ticks() {
        let rules = rules(FilterConfig {
            hide_on_animation_ids: "42,43".to_string(),
            hide_alive_ids: "100".to_string(),
            hide_all_dead: true,
            ..FilterConfig::default()
        });
        let mut tracker = VisibilityTracker::new();
        let animations = [42, 43, -1, 42, 0, 43, 43, -1];
        for (tick, anim) in animations.into_iter().enumerate() {
            let mut snapshots = vec![
                EntitySnapshot::new(100, 1, "Guard").with_animation(anim),
                EntitySnapshot::new(2, 2, "Imp").with_animation(anim),
            ];
            if tick % 2 == 0 {
                snapshots.push(EntitySnapshot::new(3, 3, "Cow").dead().with_animation(anim));
            }
            evaluate_tick(&mut tracker, &rules, &snapshots);
            assert_subset(&tracker);
        }
    }
}
