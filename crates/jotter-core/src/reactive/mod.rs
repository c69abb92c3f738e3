//! Reactive building blocks shared by the controllers.

mod dialog;
mod latest;
mod projection;

pub use dialog::{ConfirmDialog, ConfirmGate, DialogEvent};
pub use latest::LatestTask;
pub use projection::{SharedProjection, Subscription};
