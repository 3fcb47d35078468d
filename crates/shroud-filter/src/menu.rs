//! Context-menu suppression for dead entities.
//!
//! Runs when the host has just appended an entry to the context menu. If the
//! entry targets a dead, non-blacklisted entity with one of the interaction
//! actions, it is removed again.
//!
//! The blacklist check here uses its own prefix/suffix/contains test on
//! wildcard patterns rather than the general matcher in [`crate::wildcard`].
//! The two can disagree, e.g. `a*b` matches `"a long b"` in the general
//! matcher but not here.

use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::rules::RuleSet;
use crate::snapshot::{EntitySnapshot, is_exempt};
use crate::wildcard::WILDCARD;

/// Use an item on an entity.
pub const ITEM_USE_ON_ENTITY: i32 = 7;
/// Cast a spell on an entity. Never suppressed.
pub const SPELL_CAST_ON_ENTITY: i32 = 8;
/// First of the five entity interaction options.
pub const ENTITY_FIRST_OPTION: i32 = 9;
/// Last of the five entity interaction options.
pub const ENTITY_FIFTH_OPTION: i32 = 13;

/// Returns `true` if `action` is an entity-targeted action this filter may
/// suppress.
pub fn is_suppressible_action(action: i32) -> bool {
    (ITEM_USE_ON_ENTITY..=ENTITY_FIFTH_OPTION).contains(&action) && action != SPELL_CAST_ON_ENTITY
}

/// One row of the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Verb shown to the user, e.g. "Attack".
    pub option: String,
    /// Target text shown to the user.
    pub target: String,
    /// Action type code.
    pub action: i32,
    /// Action-specific identifier. For entity actions, the target's index.
    pub identifier: i32,
}

impl MenuEntry {
    /// Creates an entry.
    pub fn new(
        option: impl Into<String>,
        target: impl Into<String>,
        action: i32,
        identifier: i32,
    ) -> Self {
        Self {
            option: option.into(),
            target: target.into(),
            action,
            identifier,
        }
    }
}

/// Maps a menu entry identifier to the entity it targets.
pub trait TargetResolver {
    /// Look up the entity for `identifier`. `Ok(None)` means the slot is
    /// empty.
    fn resolve(&self, identifier: i32) -> Result<Option<&EntitySnapshot>, ResolveError>;
}

/// The host's entity cache: one slot per index.
impl TargetResolver for [Option<EntitySnapshot>] {
    fn resolve(&self, identifier: i32) -> Result<Option<&EntitySnapshot>, ResolveError> {
        let slot = usize::try_from(identifier)
            .ok()
            .and_then(|i| self.get(i))
            .ok_or(ResolveError::OutOfRange {
                identifier,
                len: self.len(),
            })?;

        match slot {
            Some(npc) if npc.index != identifier => Err(ResolveError::Stale {
                identifier,
                found: npc.index,
            }),
            slot => Ok(slot.as_ref()),
        }
    }
}

/// The menu's own wildcard test. `pattern` must contain a wildcard.
pub fn menu_pattern_matches(pattern: &str, name: &str) -> bool {
    let bare = pattern.replace(WILDCARD, "");
    let leading = pattern.starts_with(WILDCARD);

    (leading && pattern.ends_with(WILDCARD) && name.contains(&bare))
        || (leading && name.ends_with(&bare))
        || name.starts_with(&bare)
}

/// Returns `true` if the options on this entity should be suppressed.
fn suppresses(rules: &RuleSet, npc: &EntitySnapshot) -> bool {
    if is_exempt(npc.id) || !npc.is_dead {
        return false;
    }
    let Some(name) = npc.name.as_deref() else {
        return false;
    };
    let name = name.to_lowercase();

    if rules.blacklist_by_id.contains(&npc.id) || rules.blacklist_by_name.contains_exact(&name) {
        return false;
    }

    !rules
        .blacklist_by_name
        .wildcard_patterns()
        .any(|pattern| menu_pattern_matches(pattern, &name))
}

/// Inspect the most recently added entry of `entries` and remove it if it
/// targets a dead entity that should not be interacted with.
///
/// Returns `true` if an entry was removed. Resolver failures abandon the
/// attempt and leave the menu untouched.
pub fn filter_menu_actions<R>(rules: &RuleSet, entries: &mut Vec<MenuEntry>, resolver: &R) -> bool
where
    R: TargetResolver + ?Sized,
{
    if !rules.suppress_dead_actions {
        return false;
    }
    let Some(entry) = entries.last() else {
        return false;
    };
    if !is_suppressible_action(entry.action) {
        return false;
    }

    let npc = match resolver.resolve(entry.identifier) {
        Ok(Some(npc)) => npc,
        Ok(None) => return false,
        Err(e) => {
            trace!("Skipping menu filter: {e}");
            return false;
        }
    };

    if !suppresses(rules, npc) {
        return false;
    }

    if let Some(removed) = entries.pop() {
        debug!(
            option = %removed.option,
            target = %removed.target,
            "Removed menu entry on dead entity"
        );
    }
    true
}
