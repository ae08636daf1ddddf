//! Focus System - directional focus state machine
//!
//! Manages which registered node holds focus:
//! - `Unfocused` / `Focused(id)` state
//! - Auto-focus of the first node when the registry fills
//! - Ring traversal in registration order (left/up = back, right/down = forward)
//! - Explicit focus requests
//! - Reset to `Unfocused` when the focused node unregisters
//!
//! Transitions are computed by the pure [`apply`] function. The
//! [`FocusCoordinator`] owns the registry and state, commits transitions and
//! turns `Activate` effects into [`Activation`]s carrying the target handle.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::state::focus::FocusCoordinator;
//!
//! let mut coordinator = FocusCoordinator::new(NavConfig::default());
//! coordinator.register("a", handle_a).run();
//! coordinator.dispatch(FocusEvent::from(Direction::Right));
//! ```

use tracing::{debug, trace};

use crate::config::NavConfig;
use crate::engine::Registry;
use crate::types::{Direction, Focusable, RemoteEvent};

// =============================================================================
// STATE
// =============================================================================

/// Which node, if any, currently holds focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(String),
}

impl FocusState {
    pub fn focused_id(&self) -> Option<&str> {
        match self {
            Self::Unfocused => None,
            Self::Focused(id) => Some(id),
        }
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id() == Some(id)
    }

    pub fn has_focus(&self) -> bool {
        matches!(self, Self::Focused(_))
    }
}

// =============================================================================
// EVENTS & EFFECTS
// =============================================================================

/// Input to the focus state machine.
///
/// Registry events describe a mutation that has already been applied to the
/// registry passed to [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    /// `id` was registered; `was_empty` is true if the registry had no
    /// entries before.
    Registered { id: String, was_empty: bool },
    /// `id` was removed from the registry.
    Unregistered { id: String },
    /// A remote event, recognized or not.
    Signal(RemoteEvent),
    /// Explicit request to focus `id`.
    RequestFocus { id: String },
}

impl From<Direction> for FocusEvent {
    fn from(direction: Direction) -> Self {
        Self::Signal(direction.into())
    }
}

impl From<RemoteEvent> for FocusEvent {
    fn from(event: RemoteEvent) -> Self {
        Self::Signal(event)
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEffect {
    /// Call `focus()` on the handle registered under this id.
    Activate(String),
}

/// Result of [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FocusState,
    pub effects: Vec<FocusEffect>,
}

impl Transition {
    fn stay(state: &FocusState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }

    fn focus(id: &str) -> Self {
        Self {
            state: FocusState::Focused(id.to_string()),
            effects: vec![FocusEffect::Activate(id.to_string())],
        }
    }

    fn blur() -> Self {
        Self {
            state: FocusState::Unfocused,
            effects: Vec::new(),
        }
    }
}

// =============================================================================
// TRANSITION FUNCTION
// =============================================================================

/// Compute the next focus state for `event`.
///
/// Every transition landing on `Focused(id)` carries exactly one
/// `Activate(id)` effect, including a request for the already focused id.
pub fn apply<H>(
    state: &FocusState,
    registry: &Registry<H>,
    event: &FocusEvent,
    config: &NavConfig,
) -> Transition {
    match event {
        FocusEvent::Registered { id, was_empty } => {
            let fills_registry = *was_empty && registry.contains(id);
            if config.auto_focus && fills_registry && !state.has_focus() {
                match registry.first_id() {
                    Some(first) => Transition::focus(first),
                    None => Transition::stay(state),
                }
            } else {
                Transition::stay(state)
            }
        }
        FocusEvent::Unregistered { id } => {
            if state.is_focused(id) {
                Transition::blur()
            } else {
                Transition::stay(state)
            }
        }
        FocusEvent::Signal(remote) => match remote.direction() {
            Some(direction) => navigate(state, registry, direction),
            None => Transition::stay(state),
        },
        FocusEvent::RequestFocus { id } => {
            if registry.contains(id) {
                Transition::focus(id)
            } else {
                Transition::stay(state)
            }
        }
    }
}

/// Move one step around the registration ring.
fn navigate<H>(state: &FocusState, registry: &Registry<H>, direction: Direction) -> Transition {
    let Some(current) = state.focused_id() else {
        return Transition::stay(state);
    };

    let len = registry.len();
    let Some(pos) = registry.position(current) else {
        return Transition::stay(state);
    };
    if len <= 1 {
        return Transition::stay(state);
    }

    let next = (pos as isize + direction.step()).rem_euclid(len as isize) as usize;
    match registry.id_at(next) {
        Some(id) => Transition::focus(id),
        None => Transition::stay(state),
    }
}

// =============================================================================
// ACTIVATION
// =============================================================================

/// A pending `focus()` call on a resolved handle.
#[derive(Debug, Clone)]
pub struct Activation<H> {
    pub id: String,
    pub handle: H,
}

impl<H: Focusable> Activation<H> {
    pub fn run(self) {
        self.handle.focus();
    }
}

/// Run every pending activation in order.
pub fn run_activations<H: Focusable>(activations: Vec<Activation<H>>) {
    for activation in activations {
        activation.run();
    }
}

/// Result of a registry mutation.
///
/// Carries the activations to run and the handle the registry let go of.
/// Handles may own other regions' guards, so whoever holds the coordinator
/// must release its borrow before calling [`Update::run`].
#[must_use = "an update's activations and evicted handle are resolved by `run`"]
#[derive(Debug)]
pub struct Update<H> {
    pub activations: Vec<Activation<H>>,
    pub evicted: Option<H>,
}

impl<H> Default for Update<H> {
    fn default() -> Self {
        Self {
            activations: Vec::new(),
            evicted: None,
        }
    }
}

impl<H: Focusable> Update<H> {
    /// Drop the evicted handle, then run the activations.
    pub fn run(self) {
        drop(self.evicted);
        run_activations(self.activations);
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Owns the registry and the focus state for one navigation root.
#[derive(Debug)]
pub struct FocusCoordinator<H> {
    registry: Registry<H>,
    state: FocusState,
    config: NavConfig,
}

impl<H> FocusCoordinator<H> {
    pub fn new(config: NavConfig) -> Self {
        Self {
            registry: Registry::new(),
            state: FocusState::Unfocused,
            config,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.state.focused_id()
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}

impl<H: Focusable + Clone> FocusCoordinator<H> {
    /// Add or replace a node. May auto-focus the first node.
    ///
    /// A replaced handle comes back in [`Update::evicted`].
    pub fn register(&mut self, id: impl Into<String>, handle: H) -> Update<H> {
        let id = id.into();
        let was_empty = self.registry.is_empty();
        let evicted = self.registry.register(id.clone(), handle);
        let activations = self.transition(FocusEvent::Registered { id, was_empty });
        Update {
            activations,
            evicted,
        }
    }

    /// Remove a node. Clears focus if it was the focused one.
    ///
    /// The removed handle comes back in [`Update::evicted`].
    pub fn unregister(&mut self, id: &str) -> Update<H> {
        let Some(evicted) = self.registry.unregister(id) else {
            return Update::default();
        };
        let activations = self.transition(FocusEvent::Unregistered { id: id.to_string() });
        Update {
            activations,
            evicted: Some(evicted),
        }
    }

    pub fn request_focus(&mut self, id: &str) -> Vec<Activation<H>> {
        self.transition(FocusEvent::RequestFocus { id: id.to_string() })
    }

    pub fn handle_event(&mut self, event: &RemoteEvent) -> Vec<Activation<H>> {
        self.transition(FocusEvent::Signal(event.clone()))
    }

    /// Commit the transition for `event` and resolve its activations.
    ///
    /// The state is updated before returning; the caller runs the
    /// activations (see [`run_activations`]).
    pub fn transition(&mut self, event: FocusEvent) -> Vec<Activation<H>> {
        let Transition { state, effects } =
            apply(&self.state, &self.registry, &event, &self.config);

        // Focus never lands on a target that no longer exists
        if let Some(FocusEffect::Activate(id)) = effects.first() {
            if !self.registry.lookup(id).is_some_and(|handle| handle.is_alive()) {
                debug!(id = %id, event = ?event, "focus target gone; keeping focus");
                return Vec::new();
            }
        }

        if state != self.state {
            debug!(from = ?self.state, to = ?state, event = ?event, "focus transition");
        } else if effects.is_empty() {
            trace!(event = ?event, "focus event had no effect");
        }
        self.state = state;

        effects
            .into_iter()
            .filter_map(|effect| match effect {
                FocusEffect::Activate(id) => {
                    let handle = self.registry.lookup(&id)?.clone();
                    Some(Activation { id, handle })
                }
            })
            .collect()
    }

    /// Commit the transition for `event` and run its activations immediately.
    pub fn dispatch(&mut self, event: FocusEvent) {
        let activations = self.transition(event);
        run_activations(activations);
    }
}

// =============================================================================
// TESTS
// =============================================================================
