use super::{DispatchOutcome, DropReason};
use crate::bus::RequestTarget;
use crate::event::EventVariant;

#[allow(unused_variables)]
pub trait ChartListener: Send {
    /// A point of a series was clicked. `value` is the point's value.
    fn on_series_click(
        &mut self,
        target: &mut RequestTarget,
        series_name: &str,
        series_field: &str,
        category: &str,
        value: i64,
    ) {
    }
}

pub fn dispatch_chart<L: ChartListener + ?Sized>(
    listener: &mut L,
    event: EventVariant,
    target: &mut RequestTarget,
) -> DispatchOutcome {
    match event {
        EventVariant::SeriesClick {
            series_name,
            series_field,
            category,
            value,
        } => listener.on_series_click(target, &series_name, &series_field, &category, value),
        other => {
            return DispatchOutcome::dropped(DropReason::Unrecognized { kind: other.kind() });
        }
    }
    DispatchOutcome::Dispatched
}
