//! Finite-State Machine
//!
//! Named states with optional handlers on specific `from -> to` transitions.

use std::collections::BTreeMap;
use tracing::trace;

/// Transition handler.
pub type TransitionHandler = Box<dyn FnMut()>;

/// State machine over states of type `S`.
pub struct Fsm<S: Ord + Clone> {
    state: S,
    transitions: BTreeMap<(S, S), TransitionHandler>,
}

impl<S: Ord + Clone + std::fmt::Debug> Fsm<S> {
    /// Create a machine in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            transitions: BTreeMap::new(),
        }
    }

    /// Register the handler for `from -> to`, replacing any previous one.
    pub fn on(&mut self, from: S, to: S, handler: impl FnMut() + 'static) -> &mut Self {
        self.transitions.insert((from, to), Box::new(handler));
        self
    }

    /// Switch to `to`, then run the `current -> to` handler if one exists.
    ///
    /// Any transition is allowed; handlers are optional side effects.
    pub fn set(&mut self, to: S) {
        let key = (self.state.clone(), to.clone());
        trace!(from = ?key.0, to = ?key.1, "fsm transition");
        self.state = to;
        if let Some(handler) = self.transitions.get_mut(&key) {
            handler();
        }
    }

    /// Current state.
    pub fn get(&self) -> &S {
        &self.state
    }

    /// True if in `state`.
    pub fn is(&self, state: &S) -> bool {
        &self.state == state
    }
}
