//! Tray menu projection.
//!
//! [`DisplayState`] is a pure function of
//! [`ReconciliationState`](crate::reconciler::ReconciliationState) and a
//! [`LabelStyle`]; the reconciler pushes its changes to a
//! [`DisplaySurface`](crate::traits::DisplaySurface).

mod label;
mod state;

pub use label::{LabelStyle, CONNECTING_LABEL, DEVICE_LABEL};
pub use state::{DisplayState, MenuItem};
