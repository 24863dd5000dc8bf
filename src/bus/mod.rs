//! Refresh hand-off between listeners and the page renderer.
//!
//! Listeners never touch the page directly. While one request is handled they
//! schedule [`RefreshInstruction`]s on a [`RequestTarget`]; once dispatch has
//! succeeded the endpoint registry flushes them as one [`RefreshBatch`] onto
//! the [`RefreshBus`]:
//!
//! listener → `RequestTarget` → `RefreshBus` → renderer
//!
//! A request whose parameters fail to decode flushes nothing.

mod refresh_bus;
mod target;

pub use refresh_bus::{RefreshBatch, RefreshBus};
pub use target::{RefreshInstruction, RequestTarget};
