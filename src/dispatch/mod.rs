//! Routing of decoded events to listener methods.
//!
//! Each widget family has a listener trait with one method per event it
//! understands and a `dispatch_*` function that matches on the
//! [`EventVariant`](crate::event::EventVariant) and calls the right method
//! with the decoded fields.
//!
//! Events that cannot be delivered are not errors. They are dropped and the
//! reason is reported back as [`DispatchOutcome::Dropped`]:
//! - the widget has no method for the variant ([`DropReason::Unrecognized`])
//! - a keyed index no longer points into the collection ([`DropReason::StaleIndex`])
//! - a keyed id names no known item ([`DropReason::UnknownItem`])

mod accordion;
mod calendar;
mod chart;
mod menu;


use serde::Serialize;

use crate::event::EventKind;

pub use accordion::{dispatch_accordion, AccordionListener, TabSelector};
pub use calendar::{dispatch_calendar, CalendarListener};
pub use chart::{dispatch_chart, ChartListener};
pub use menu::{dispatch_menu, ContextMenuListener};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    Unrecognized { kind: EventKind },
    StaleIndex { index: i32, count: usize },
    UnknownItem { id: String },
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized { kind } => write!(f, "no listener method for {kind}"),
            Self::StaleIndex { index, count } => {
                write!(f, "index {index} outside of [0, {count})")
            }
            Self::UnknownItem { id } => write!(f, "unknown item id {id:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Dispatched,
    Dropped(DropReason),
}

impl DispatchOutcome {
    /// Record a dropped event.
    pub fn dropped(reason: DropReason) -> Self {
        tracing::debug!("event dropped: {reason}");
        Self::Dropped(reason)
    }

    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// Re-validate a client-supplied index against the collection as it is now.
///
/// The collection may have changed since the client rendered it, so this
/// runs at dispatch time rather than decode time.
pub fn resolve_index<T>(index: i32, items: &[T]) -> Result<(usize, &T), DropReason> {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i).map(|item| (i, item)))
        .ok_or(DropReason::StaleIndex {
            index,
            count: items.len(),
        })
}
