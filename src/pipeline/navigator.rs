//! Navigator - the shared handle focusable regions receive.
//!
//! A `Navigator` is created by a [`NavigationRoot`](super::NavigationRoot)
//! and passed explicitly to every region under it. Clones share state.
//!
//! - `register` / `unregister` / `mount_node` - region lifecycle
//! - `request_focus` - explicit focus
//! - `focused_id` - current focus
//!
//! Activations run after the internal borrow is released, so a target's
//! `focus()` may read the navigator. Calling a mutating operation from inside
//! `focus()` is not supported.
//!
//! Handles leaving the registry are dropped after the borrow is released too,
//! so a handle may own the [`NodeGuard`]s of nested regions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::state::focus::{run_activations, FocusCoordinator, FocusState};
use crate::types::{Focusable, RemoteEvent};

enum Inner<H> {
    /// Mounted on a remote-control runtime.
    Active(FocusCoordinator<H>),
    /// Mounted on a runtime without remote control: every operation is a no-op.
    Disabled,
    /// The root is gone.
    Unmounted,
}

/// Shared focus navigation handle for one root.
pub struct Navigator<H> {
    inner: Rc<RefCell<Inner<H>>>,
}

impl<H> Clone for Navigator<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: Focusable + Clone + 'static> Navigator<H> {
    pub(crate) fn new(config: NavConfig) -> Self {
        let inner = if config.is_enabled() {
            Inner::Active(FocusCoordinator::new(config))
        } else {
            Inner::Disabled
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Mark the root as gone. Later operations fail with `NotMounted`.
    pub(crate) fn detach(&self) {
        let old = std::mem::replace(&mut *self.inner.borrow_mut(), Inner::Unmounted);
        // Registered handles drop here, after the borrow
        drop(old);
    }

    fn with_coordinator<T: Default>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut FocusCoordinator<H>) -> T,
    ) -> Result<T> {
        // `inner` is released before `f` and anything it captured
        let mut inner = self.inner.borrow_mut();
        match &mut *inner {
            Inner::Active(coordinator) => Ok(f(coordinator)),
            Inner::Disabled => Ok(T::default()),
            Inner::Unmounted => Err(NavError::NotMounted { operation }),
        }
    }

    /// Register a focusable region. Re-registering an id replaces its handle.
    pub fn register(&self, id: impl Into<String>, handle: H) -> Result<()> {
        let update = self.with_coordinator("register", |c| c.register(id, handle))?;
        update.run();
        Ok(())
    }

    /// Remove a region. Unknown ids are ignored.
    pub fn unregister(&self, id: &str) -> Result<()> {
        let update = self.with_coordinator("unregister", |c| c.unregister(id))?;
        update.run();
        Ok(())
    }

    /// Focus `id` if it is registered.
    pub fn request_focus(&self, id: &str) -> Result<()> {
        let activations = self.with_coordinator("request_focus", |c| c.request_focus(id))?;
        run_activations(activations);
        Ok(())
    }

    /// Feed one remote event through the focus state machine.
    pub fn handle_event(&self, event: &RemoteEvent) -> Result<()> {
        let activations = self.with_coordinator("handle_event", |c| c.handle_event(event))?;
        run_activations(activations);
        Ok(())
    }

    pub fn focused_id(&self) -> Result<Option<String>> {
        self.with_coordinator("focused_id", |c| c.focused_id().map(str::to_string))
    }

    pub fn is_focused(&self, id: &str) -> Result<bool> {
        self.with_coordinator("is_focused", |c| c.state().is_focused(id))
    }

    /// Snapshot of the focus state.
    pub fn state(&self) -> Result<FocusState> {
        self.with_coordinator("state", |c| c.state().clone())
    }

    /// Registered ids in traversal order.
    pub fn ordered_ids(&self) -> Result<Vec<String>> {
        self.with_coordinator("ordered_ids", |c| c.registry().ordered_ids())
    }

    /// Register a region and get a guard that unregisters it on drop.
    pub fn mount_node(&self, id: impl Into<String>, handle: H) -> Result<NodeGuard<H>> {
        let id = id.into();
        self.register(id.clone(), handle)?;
        Ok(NodeGuard {
            navigator: self.clone(),
            id,
        })
    }

    /// Whether directional navigation runs on this runtime.
    pub fn is_enabled(&self) -> bool {
        matches!(&*self.inner.borrow(), Inner::Active(_))
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(&*self.inner.borrow(), Inner::Unmounted)
    }
}

impl<H> fmt::Debug for Navigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match &*self.inner.borrow() {
            Inner::Active(coordinator) => match coordinator.focused_id() {
                Some(id) => format!("focused({id})"),
                None => "unfocused".to_string(),
            },
            Inner::Disabled => "disabled".to_string(),
            Inner::Unmounted => "unmounted".to_string(),
        };
        f.debug_struct("Navigator").field("status", &status).finish()
    }
}

// =============================================================================
// NODE GUARD
// =============================================================================

/// A mounted focusable region. Unregisters exactly once when dropped.
pub struct NodeGuard<H: Focusable + Clone + 'static> {
    navigator: Navigator<H>,
    id: String,
}

impl<H: Focusable + Clone + 'static> NodeGuard<H> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Focus this region.
    pub fn focus(&self) -> Result<()> {
        self.navigator.request_focus(&self.id)
    }

    pub fn is_focused(&self) -> Result<bool> {
        self.navigator.is_focused(&self.id)
    }
}

impl<H: Focusable + Clone + 'static> Drop for NodeGuard<H> {
    fn drop(&mut self) {
        match self.navigator.unregister(&self.id) {
            Ok(()) => {}
            // The root already tore everything down
            Err(NavError::NotMounted { .. }) => trace!(id = %self.id, "node dropped after root"),
            Err(err) => warn!(id = %self.id, error = %err, "node unregister failed"),
        }
    }
}

impl<H: Focusable + Clone + 'static> fmt::Debug for NodeGuard<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeGuard").field("id", &self.id).finish()
    }
}
