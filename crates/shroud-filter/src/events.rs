//! Host lifecycle events and explicit handler registration.
//!
//! The host publishes [`HostEvent`]s on an [`EventBus`]. Consumers register a
//! handler and receive every event in registration order.

use shroud_config::FilterConfig;

use crate::snapshot::EntitySnapshot;

/// Session state reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// At the login screen.
    LoginScreen,
    /// Loading a new region.
    Loading,
    /// In the world. Entering this state starts a fresh scene.
    LoggedIn,
    /// Moving between worlds.
    Hopping,
}

/// Something the host tells the filter about.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// One simulation step with the current snapshot of every live entity.
    Tick(Vec<EntitySnapshot>),
    /// A tracked entity left the scene.
    Despawn {
        /// Per-life index of the departed entity.
        index: i32,
    },
    /// Session state changed.
    GameStateChanged(GameState),
    /// A persisted configuration group changed.
    ConfigChanged {
        /// Group that changed.
        group: String,
        /// The new filter configuration.
        config: FilterConfig,
    },
}

/// Receives host events.
pub trait EventHandler {
    /// Process one event.
    fn handle(&mut self, event: &HostEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&HostEvent),
{
    fn handle(&mut self, event: &HostEvent) {
        self(event);
    }
}

/// Identifies a registered handler so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Fan-out of host events to registered handlers.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(HandlerId, Box<dyn EventHandler>)>,
    next_id: u64,
}

impl EventBus {
    /// Create a bus with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It receives every event published afterwards.
    pub fn register<H: EventHandler + 'static>(&mut self, handler: H) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Deliver `event` to every handler. Returns the number of handlers
    /// that received it.
    pub fn publish(&mut self, event: &HostEvent) -> usize {
        if self.handlers.is_empty() {
            tracing::trace!("No handlers registered, dropping {event:?}");
        }
        for (_, handler) in &mut self.handlers {
            handler.handle(event);
        }
        self.handlers.len()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
