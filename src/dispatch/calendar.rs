use chrono::{DateTime, Utc};

use super::{DispatchOutcome, DropReason};
use crate::bus::RequestTarget;
use crate::event::{CalendarView, EventVariant};

/// Calendar callbacks. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait CalendarListener: Send {
    /// A day cell was clicked.
    fn on_day_click(&mut self, target: &mut RequestTarget, view: CalendarView, date: DateTime<Utc>) {}

    /// A cell range was selected.
    fn on_select(
        &mut self,
        target: &mut RequestTarget,
        view: CalendarView,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) {
    }

    /// An existing calendar event was clicked.
    fn on_event_click(&mut self, target: &mut RequestTarget, view: CalendarView, event_id: i32) {}

    /// An event was dragged; `delta_ms` is how far it moved.
    fn on_event_drop(&mut self, target: &mut RequestTarget, event_id: i32, delta_ms: i64, all_day: bool) {}

    /// An event was resized; `delta_ms` is how much its end moved.
    fn on_event_resize(&mut self, target: &mut RequestTarget, event_id: i32, delta_ms: i64) {}
}

pub fn dispatch_calendar<L: CalendarListener + ?Sized>(
    listener: &mut L,
    event: EventVariant,
    target: &mut RequestTarget,
) -> DispatchOutcome {
    match event {
        EventVariant::DayClick { date, view } => listener.on_day_click(target, view, date),
        EventVariant::RangeSelect {
            start,
            end,
            all_day,
            view,
        } => listener.on_select(target, view, start, end, all_day),
        EventVariant::EventClick { event_id, view } => listener.on_event_click(target, view, event_id),
        EventVariant::EventDrop {
            event_id,
            delta_ms,
            all_day,
        } => listener.on_event_drop(target, event_id, delta_ms, all_day),
        EventVariant::EventResize { event_id, delta_ms } => {
            listener.on_event_resize(target, event_id, delta_ms)
        }
        other => {
            return DispatchOutcome::dropped(DropReason::Unrecognized { kind: other.kind() });
        }
    }
    DispatchOutcome::Dispatched
}
