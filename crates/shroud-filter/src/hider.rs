//! The host-facing filter: owns the rules and the tracker, and routes host
//! events to them.
//!
//! All mutation goes through `&mut self` on the logic thread. The draw
//! predicate and the menu filter only ever borrow `&self`.

use std::sync::Arc;

use shroud_config::{CONFIG_GROUP, FilterConfig};
use tracing::{debug, info};

use crate::draw;
use crate::evaluator::{self, TickTransitions};
use crate::events::{GameState, HostEvent};
use crate::menu::{self, MenuEntry, TargetResolver};
use crate::rules::RuleSet;
use crate::snapshot::{EntitySnapshot, Renderable};
use crate::tracker::VisibilityTracker;

/// Point-in-time summary for overlays and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiderStats {
    /// Entities currently hidden.
    pub hidden: usize,
    /// Of those, how many by an animation rule.
    pub animation_hidden: usize,
    /// Whether the filter is running.
    pub enabled: bool,
}

/// Per-frame entity visibility filter.
#[derive(Debug)]
pub struct EntityHider {
    rules: Arc<RuleSet>,
    tracker: VisibilityTracker,
    enabled: bool,
}

impl EntityHider {
    /// Creates a stopped filter with default rules.
    pub fn new() -> Self {
        Self {
            rules: Arc::new(RuleSet::default()),
            tracker: VisibilityTracker::new(),
            enabled: false,
        }
    }

    /// Start filtering with `config`. Begins with nothing hidden.
    pub fn start_up(&mut self, config: &FilterConfig) {
        self.tracker.clear();
        self.config_changed(config);
        self.enabled = true;
        info!("Entity filter started");
    }

    /// Stop filtering. Everything becomes visible again.
    pub fn shut_down(&mut self) {
        self.tracker.clear();
        self.enabled = false;
        info!("Entity filter stopped");
    }

    /// Returns `true` between [`start_up`](Self::start_up) and
    /// [`shut_down`](Self::shut_down).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The rules currently in effect.
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Read access to the hidden-state sets.
    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// Evaluate one simulation step.
    pub fn tick(&mut self, snapshots: &[EntitySnapshot]) -> TickTransitions {
        if !self.enabled {
            return TickTransitions::default();
        }
        evaluator::evaluate_tick(&mut self.tracker, &self.rules, snapshots)
    }

    /// An entity left the scene. Its index may be reused, so forget it.
    pub fn despawn(&mut self, index: i32) {
        if self.tracker.reveal(index) {
            debug!(index, "Forgot despawned entity");
        }
    }

    /// A new scene started. Forget everything.
    pub fn scene_reset(&mut self) {
        self.tracker.clear();
        debug!("Scene reset");
    }

    /// Rebuild the rules from `config`. The new rules take effect on the
    /// next tick; nothing is hidden or revealed here.
    pub fn config_changed(&mut self, config: &FilterConfig) {
        self.rules = Arc::new(RuleSet::compile(config));
    }

    /// Render-time predicate. Returns `false` to skip drawing `renderable`.
    ///
    /// `drawing_ui` is passed through by the render pipeline and does not
    /// affect the result.
    pub fn should_draw(&self, renderable: &Renderable, _drawing_ui: bool) -> bool {
        !self.enabled || draw::should_draw(&self.tracker, &self.rules, renderable)
    }

    /// Called right after the host appends an entry to the context menu.
    /// Returns `true` if that entry was removed.
    pub fn filter_menu_actions<R>(&self, entries: &mut Vec<MenuEntry>, resolver: &R) -> bool
    where
        R: TargetResolver + ?Sized,
    {
        self.enabled && menu::filter_menu_actions(&self.rules, entries, resolver)
    }

    /// Route a host event to the matching operation.
    pub fn handle(&mut self, event: &HostEvent) {
        match event {
            HostEvent::Tick(snapshots) => {
                self.tick(snapshots);
            }
            HostEvent::Despawn { index } => self.despawn(*index),
            HostEvent::GameStateChanged(GameState::LoggedIn) => self.scene_reset(),
            HostEvent::GameStateChanged(_) => {}
            HostEvent::ConfigChanged { group, config } if group == CONFIG_GROUP => {
                self.config_changed(config);
            }
            HostEvent::ConfigChanged { .. } => {}
        }
    }

    /// Current counts.
    pub fn stats(&self) -> HiderStats {
        HiderStats {
            hidden: self.tracker.len(),
            animation_hidden: self.tracker.animation_hidden().len(),
            enabled: self.enabled,
        }
    }
}

impl Default for EntityHider {
    fn default() -> Self {
        Self::new()
    }
}
