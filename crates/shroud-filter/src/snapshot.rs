//! Host-supplied entity snapshots and renderable kinds.

/// Animation ID reported by an entity that is not animating.
pub const IDLE_ANIMATION: i32 = -1;

/// Health ratio reported when no health bar applies.
pub const HEALTH_NOT_APPLICABLE: i32 = -1;

/// Totem actors of a multi-stage encounter. Never hidden by alive/death rules.
pub const TOTEM_IDS: [i32; 12] = [
    9434, 9435, 9436, 9437, 9438, 9439, 9440, 9441, 9442, 9443, 9444, 9445,
];

/// Phase actors of a multi-stage boss. Never hidden by alive/death rules.
pub const OLM_IDS: [i32; 8] = [7550, 7551, 7552, 7553, 7554, 7555, 7556, 7557];

/// Returns `true` if `id` belongs to either exempt list.
pub fn is_exempt(id: i32) -> bool {
    TOTEM_IDS.contains(&id) || OLM_IDS.contains(&id)
}

/// One entity as seen during a single simulation step.
///
/// Snapshots are transient: the host builds a fresh sequence every tick and
/// the filter never holds on to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySnapshot {
    /// Template ID. Shared by every instance of the same kind of entity.
    pub id: i32,
    /// Per-life slot number. Unique while alive, reused after despawn.
    pub index: i32,
    /// Display name, if the entity has one.
    pub name: Option<String>,
    /// Current animation, or [`IDLE_ANIMATION`].
    pub animation_id: i32,
    /// 0 means dead, negative means not applicable.
    pub health_ratio: i32,
    /// Set by the host once the death sequence has started.
    pub is_dead: bool,
}

impl EntitySnapshot {
    /// Creates an idle, named snapshot with no health bar.
    pub fn new(id: i32, index: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            index,
            name: Some(name.into()),
            animation_id: IDLE_ANIMATION,
            health_ratio: HEALTH_NOT_APPLICABLE,
            is_dead: false,
        }
    }

    /// Creates an idle snapshot without a name.
    pub fn unnamed(id: i32, index: i32) -> Self {
        Self {
            name: None,
            ..Self::new(id, index, "")
        }
    }

    /// Sets the current animation.
    #[must_use]
    pub fn with_animation(mut self, animation_id: i32) -> Self {
        self.animation_id = animation_id;
        self
    }

    /// Sets the health ratio.
    #[must_use]
    pub fn with_health(mut self, health_ratio: i32) -> Self {
        self.health_ratio = health_ratio;
        self
    }

    /// Marks the entity dead: zero health and the dead flag set.
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.health_ratio = 0;
        self.is_dead = true;
        self
    }

    /// Returns `true` if the health bar reads zero.
    pub fn health_depleted(&self) -> bool {
        self.health_ratio == 0
    }
}

/// Something the render pipeline is about to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderable {
    /// A tracked actor, identified by its per-life index.
    Actor {
        /// Per-life slot number.
        index: i32,
    },
    /// A transient visual effect, identified by its type ID.
    Effect {
        /// Effect type ID.
        id: i32,
    },
    /// Players, projectiles, scenery and anything else the filter ignores.
    Other,
}
