//! Render-time visibility predicate.

use crate::rules::RuleSet;
use crate::snapshot::Renderable;
use crate::tracker::VisibilityTracker;

/// Decide whether `renderable` should be drawn this frame.
///
/// Read-only: any number of calls within a frame, in any order, give the
/// same answers.
pub fn should_draw(tracker: &VisibilityTracker, rules: &RuleSet, renderable: &Renderable) -> bool {
    match *renderable {
        Renderable::Actor { index } => {
            !tracker.is_hidden(index) && !tracker.is_animation_hidden(index)
        }
        Renderable::Effect { id } => !rules.hide_effect_by_id.contains(&id),
        Renderable::Other => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_config::FilterConfig;

    #[test]
    fn test_hidden_actor_is_not_drawn() {
        let mut tracker = VisibilityTracker::new();
        tracker.hide(3, false);
        let rules = RuleSet::default();

        assert!(!should_draw(&tracker, &rules, &Renderable::Actor { index: 3 }));
        assert!(should_draw(&tracker, &rules, &Renderable::Actor { index: 4 }));
    }

    #[test]
    fn test_animation_hidden_actor_is_not_drawn() {
        let mut tracker = VisibilityTracker::new();
        tracker.hide(3, true);
        assert!(!should_draw(&tracker, &RuleSet::default(), &Renderable::Actor { index: 3 }));
    }

    #[test]
    fn test_effects_filtered_by_type() {
        let rules = RuleSet::compile(&FilterConfig {
            hide_effect_ids: "1282, 1283".to_string(),
            ..FilterConfig::default()
        });
        let tracker = VisibilityTracker::new();
        assert!(!should_draw(&tracker, &rules, &Renderable::Effect { id: 1282 }));
        assert!(should_draw(&tracker, &rules, &Renderable::Effect { id: 1 }));
    }

    #[test]
    fn test_other_always_drawn() {
        let mut tracker = VisibilityTracker::new();
        tracker.hide(0, false);
        let rules = RuleSet::compile(&FilterConfig {
            hide_effect_ids: "0".to_string(),
            ..FilterConfig::default()
        });
        assert!(should_draw(&tracker, &rules, &Renderable::Other));
    }

    #[test]
    fn test_repeated_queries_are_stable() {
        let mut tracker = VisibilityTracker::new();
        tracker.hide(1, true);
        tracker.hide(2, false);
        let before = tracker.clone();
        let rules = RuleSet::default();

        let frame: Vec<bool> = (0..4)
            .map(|index| should_draw(&tracker, &rules, &Renderable::Actor { index }))
            .collect();
        let again: Vec<bool> = (0..4)
            .rev()
            .map(|index| should_draw(&tracker, &rules, &Renderable::Actor { index }))
            .collect();

        assert_eq!(frame, [true, false, false, true]);
        assert_eq!(again, [true, false, false, true]);
        assert_eq!(tracker, before);
    }
}
