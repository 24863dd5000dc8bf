use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{plugin_init, CallbackSpec, Widget, WidgetId};
use crate::bus::RequestTarget;
use crate::dispatch::{dispatch_calendar, CalendarListener, DispatchOutcome};
use crate::endpoint::ParamSpec;
use crate::event::{
    EventKind, EventVariant, PARAM_ALL_DAY, PARAM_DATE, PARAM_DAY_DELTA, PARAM_END,
    PARAM_EVENT_ID, PARAM_MINUTE_DELTA, PARAM_START, PARAM_VIEW_NAME,
};

const METHOD: &str = "fullCalendar";

const DELTA_ARGS: &[&str] = &[
    "event",
    "dayDelta",
    "minuteDelta",
    "allDay",
    "revertFunc",
    "jsEvent",
    "ui",
    "view",
];

/// Which calendar interactions are wired to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarOptions {
    /// Day click and event click.
    pub editable: bool,
    /// Range select.
    pub selectable: bool,
    pub event_drop: bool,
    pub event_resize: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            editable: true,
            selectable: false,
            event_drop: false,
            event_resize: false,
        }
    }
}

impl CalendarOptions {
    pub fn all() -> Self {
        Self {
            editable: true,
            selectable: true,
            event_drop: true,
            event_resize: true,
        }
    }
}

pub struct CalendarBehavior<L> {
    id: WidgetId,
    options: CalendarOptions,
    listener: L,
}

impl<L: CalendarListener> CalendarBehavior<L> {
    pub fn new(id: impl Into<WidgetId>, options: CalendarOptions, listener: L) -> Self {
        Self {
            id: id.into(),
            options,
            listener,
        }
    }

    pub fn options(&self) -> CalendarOptions {
        self.options
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn plugin_options(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("editable".into(), json!(self.options.editable));
        map.insert("selectable".into(), json!(self.options.selectable));
        map.insert("selectHelper".into(), json!(self.options.selectable));
        map.insert("disableDragging".into(), json!(!self.options.event_drop));
        map.insert("disableResizing".into(), json!(!self.options.event_resize));
        map
    }

    /// Client statement re-fetching the calendar's events.
    pub fn refetch_statement(&self) -> String {
        format!("jQuery('{}').{METHOD}('refetchEvents');", self.id.selector())
    }
}

fn day_click_params() -> ParamSpec {
    ParamSpec::new(&["date", "allDay", "jsEvent", "view"])
        .field(PARAM_DATE, "date.getTime()")
        .field(PARAM_VIEW_NAME, "view.name")
}

fn event_click_params() -> ParamSpec {
    ParamSpec::new(&["event", "jsEvent", "view"])
        .field(PARAM_EVENT_ID, "event.id")
        .field(PARAM_VIEW_NAME, "view.name")
}

fn select_params() -> ParamSpec {
    ParamSpec::new(&["start", "end", "allDay", "jsEvent", "view"])
        .field(PARAM_START, "start.getTime()")
        .field(PARAM_END, "end.getTime()")
        .field(PARAM_ALL_DAY, "allDay")
        .field(PARAM_VIEW_NAME, "view.name")
}

fn delta_params(with_all_day: bool) -> ParamSpec {
    let spec = ParamSpec::new(DELTA_ARGS)
        .field(PARAM_EVENT_ID, "event.id")
        .field(PARAM_DAY_DELTA, "dayDelta")
        .field(PARAM_MINUTE_DELTA, "minuteDelta");
    if with_all_day {
        spec.field(PARAM_ALL_DAY, "allDay")
    } else {
        spec
    }
}

impl<L: CalendarListener> Widget for CalendarBehavior<L> {
    fn id(&self) -> &WidgetId {
        &self.id
    }

    fn callbacks(&self) -> Vec<CallbackSpec> {
        let mut specs = Vec::new();
        if self.options.editable {
            specs.push(CallbackSpec::new("dayClick", EventKind::DayClick, day_click_params()));
            specs.push(CallbackSpec::new(
                "eventClick",
                EventKind::EventClick,
                event_click_params(),
            ));
        }
        if self.options.selectable {
            specs.push(CallbackSpec::new("select", EventKind::RangeSelect, select_params()));
        }
        if self.options.event_drop {
            specs.push(CallbackSpec::new("eventDrop", EventKind::EventDrop, delta_params(true)));
        }
        if self.options.event_resize {
            specs.push(CallbackSpec::new(
                "eventResize",
                EventKind::EventResize,
                delta_params(false),
            ));
        }
        specs
    }

    fn init_statement(&self, triggers: &[(&'static str, String)]) -> String {
        plugin_init(&self.id, METHOD, &self.plugin_options(), triggers)
    }

    fn on_event(&mut self, event: EventVariant, target: &mut RequestTarget) -> DispatchOutcome {
        dispatch_calendar(&mut self.listener, event, target)
    }
}
