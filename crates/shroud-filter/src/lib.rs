//! Rule evaluation and hidden-state tracking for per-frame entity
//! visibility filtering.
//!
//! The host feeds one [`EntitySnapshot`] sequence per simulation step into
//! [`EntityHider::tick`], and the render pipeline asks
//! [`EntityHider::should_draw`] about every drawable, every frame. Rules come
//! from a [`shroud_config::FilterConfig`] and are recompiled wholesale
//! whenever it changes.

mod draw;
mod error;
mod evaluator;
mod events;
mod hider;
mod menu;
mod rules;
mod snapshot;
mod tracker;
pub mod wildcard;

pub use draw::should_draw;
pub use error::ResolveError;
pub use evaluator::{TickTransitions, evaluate_tick, should_hide};
pub use events::{EventBus, EventHandler, GameState, HandlerId, HostEvent};
pub use hider::{EntityHider, HiderStats};
pub use menu::{
    ENTITY_FIFTH_OPTION, ENTITY_FIRST_OPTION, ITEM_USE_ON_ENTITY, MenuEntry,
    SPELL_CAST_ON_ENTITY, TargetResolver, filter_menu_actions, is_suppressible_action,
    menu_pattern_matches,
};
pub use rules::{NamePatterns, RuleSet, parse_id_list, split_list};
pub use snapshot::{
    EntitySnapshot, HEALTH_NOT_APPLICABLE, IDLE_ANIMATION, OLM_IDS, Renderable, TOTEM_IDS,
    is_exempt,
};
pub use tracker::VisibilityTracker;
