//! Two-step confirmation for destructive bulk actions.

use std::future::Future;

use tokio::sync::watch;

use crate::error::Result;

/// Visibility of a confirmation dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmDialog {
    #[default]
    Idle,
    ConfirmPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Request,
    Confirm,
    Dismiss,
}

impl ConfirmDialog {
    /// Apply `event`, returning the next state and whether the guarded action
    /// should run.
    #[must_use]
    pub const fn on(self, event: DialogEvent) -> (Self, bool) {
        match (self, event) {
            (_, DialogEvent::Request) => (Self::ConfirmPending, false),
            (Self::ConfirmPending, DialogEvent::Confirm) => (Self::Idle, true),
            (Self::Idle, DialogEvent::Confirm) | (_, DialogEvent::Dismiss) => (Self::Idle, false),
        }
    }

    pub const fn is_visible(self) -> bool {
        matches!(self, Self::ConfirmPending)
    }
}

/// Observable [`ConfirmDialog`] guarding one async action.
#[derive(Debug)]
pub struct ConfirmGate {
    state: watch::Sender<ConfirmDialog>,
}

impl Default for ConfirmGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self {
            state: watch::channel(ConfirmDialog::Idle).0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConfirmDialog> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ConfirmDialog {
        *self.state.borrow()
    }

    /// Show the dialog
    pub fn request(&self) {
        self.apply(DialogEvent::Request);
    }

    /// Hide the dialog without running the action
    pub fn dismiss(&self) {
        self.apply(DialogEvent::Dismiss);
    }

    /// Run `action` if the dialog is pending, then hide it.
    ///
    /// Returns `Ok(None)` when nothing was pending. When the action fails the
    /// dialog stays visible so the user can retry or dismiss.
    pub async fn confirm<T, F, Fut>(&self, action: F) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let (_, run) = self.state().on(DialogEvent::Confirm);
        if !run {
            return Ok(None);
        }

        let value = action().await?;
        self.apply(DialogEvent::Confirm);
        Ok(Some(value))
    }

    fn apply(&self, event: DialogEvent) {
        self.state.send_if_modified(|state| {
            let (next, _) = state.on(event);
            let changed = next != *state;
            *state = next;
            changed
        });
    }
}
