//! A scripted scene standing in for the host's entity enumeration.
//!
//! The script loops every [`SCENE_LENGTH`] ticks and exercises every rule
//! kind: an idle actor, an actor playing an animation, an actor that dies,
//! despawns and has its index reused, and an exempt actor that dies.

use shroud_filter::{EntitySnapshot, GameState, HostEvent, Renderable};

/// Ticks before the script starts over with a fresh scene.
pub const SCENE_LENGTH: u64 = 150;

/// Slots in the host's entity cache.
pub const CACHE_SLOTS: usize = 8;

/// Animation the imp plays between ticks 20 and 40.
pub const IMP_DANCE: i32 = 42;

/// Effect spawned while the dragon's corpse lies on the ground.
pub const DRAGON_FIRE: i32 = 1282;

/// Slot the dragon, and later the cow, occupies.
pub const SHARED_INDEX: i32 = 2;

/// Entities alive at script time `t`.
fn actors_at(t: u64) -> Vec<EntitySnapshot> {
    let mut actors = vec![EntitySnapshot::new(100, 0, "Goblin")];

    let imp = EntitySnapshot::new(200, 1, "Imp");
    actors.push(if (20..40).contains(&t) {
        imp.with_animation(IMP_DANCE)
    } else {
        imp
    });

    match t {
        0..50 => actors.push(
            EntitySnapshot::new(300, SHARED_INDEX, "Dragon").with_health(100 - 2 * t as i32),
        ),
        50..75 => actors.push(EntitySnapshot::new(300, SHARED_INDEX, "Dragon").dead()),
        75..100 => {}
        _ => actors.push(EntitySnapshot::new(400, SHARED_INDEX, "Cow").with_health(100)),
    }

    let totem = EntitySnapshot::new(9434, 3, "Totem");
    actors.push(if t >= 60 { totem.dead() } else { totem.with_health(100) });

    actors
}

/// Replays the script one tick at a time.
#[derive(Debug, Default)]
pub struct ScriptedScene {
    live: Vec<EntitySnapshot>,
}

impl ScriptedScene {
    /// Creates an empty scene. The first [`step`](Self::step) logs in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `tick` and return the host events it produces, in the
    /// order the host would deliver them.
    pub fn step(&mut self, tick: u64) -> Vec<HostEvent> {
        let t = tick % SCENE_LENGTH;
        let next = actors_at(t);
        let mut events = Vec::new();

        for gone in &self.live {
            let still_here = next.iter().any(|n| n.index == gone.index && n.id == gone.id);
            if !still_here {
                events.push(HostEvent::Despawn { index: gone.index });
            }
        }
        if t == 0 {
            events.push(HostEvent::GameStateChanged(GameState::LoggedIn));
        }

        events.push(HostEvent::Tick(next.clone()));
        self.live = next;
        events
    }

    /// Entities alive after the last step.
    pub fn live(&self) -> &[EntitySnapshot] {
        &self.live
    }

    /// Everything the renderer would draw this frame.
    pub fn renderables(&self) -> Vec<Renderable> {
        let mut out: Vec<Renderable> = self
            .live
            .iter()
            .map(|npc| Renderable::Actor { index: npc.index })
            .collect();
        if self.live.iter().any(|npc| npc.id == 300 && npc.is_dead) {
            out.push(Renderable::Effect { id: DRAGON_FIRE });
        }
        out.push(Renderable::Other);
        out
    }

    /// The host's entity cache, one slot per index.
    pub fn entity_cache(&self) -> Vec<Option<EntitySnapshot>> {
        let mut slots = vec![None; CACHE_SLOTS];
        for npc in &self.live {
            if let Some(slot) = usize::try_from(npc.index).ok().and_then(|i| slots.get_mut(i)) {
                *slot = Some(npc.clone());
            }
        }
        slots
    }
}
