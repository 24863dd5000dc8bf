//! Event variants decoded from callback requests.
//!
//! Every widget interaction that reaches the server becomes exactly one
//! [`EventVariant`]. The variant is chosen by the endpoint's [`EventKind`],
//! which also owns the decode function for it:
//!
//! - Simple: no payload (`ContextMenu`)
//! - Keyed: one scalar (`Tab`, `MenuItemClick`)
//! - Delta: event id plus a derived duration (`EventDrop`, `EventResize`)
//! - Range: two instants, an all-day flag and a view (`RangeSelect`)
//! - Compound: several fields decoded together (`DayClick`, `EventClick`,
//!   `SeriesClick`)

mod view;


use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{decode, decode_enum, decode_or, DecodeError, ParameterBag};

pub use view::CalendarView;

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_MINUTE: i64 = 60_000;

/// Sentinel used when a request carries no usable tab index.
pub const INDEX_NONE: i32 = -1;

// ---------------------------------------------------------------------------
// Wire parameter names
// ---------------------------------------------------------------------------

pub const PARAM_DATE: &str = "date";
pub const PARAM_VIEW_NAME: &str = "viewName";
pub const PARAM_START: &str = "start";
pub const PARAM_END: &str = "end";
pub const PARAM_ALL_DAY: &str = "allDay";
pub const PARAM_EVENT_ID: &str = "eventId";
pub const PARAM_DAY_DELTA: &str = "dayDelta";
pub const PARAM_MINUTE_DELTA: &str = "minuteDelta";
pub const PARAM_INDEX: &str = "index";
pub const PARAM_ITEM_ID: &str = "id";
pub const PARAM_SERIES_NAME: &str = "seriesName";
pub const PARAM_SERIES_FIELD: &str = "seriesField";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_VALUE: &str = "value";

/// Combine a whole-day and a minute offset into milliseconds.
pub fn delta_millis(days: i32, minutes: i32) -> i64 {
    i64::from(days) * MS_PER_DAY + i64::from(minutes) * MS_PER_MINUTE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabAction {
    Select,
    Activate,
    Expand,
    Collapse,
}

impl TabAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Activate => "activate",
            Self::Expand => "expand",
            Self::Collapse => "collapse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    Simple,
    Keyed,
    Delta,
    Range,
    Compound,
}

/// Which event an endpoint produces. Selects the decode function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ContextMenu,
    MenuItemClick,
    Tab(TabAction),
    DayClick,
    EventClick,
    RangeSelect,
    EventDrop,
    EventResize,
    SeriesClick,
}

impl EventKind {
    pub const fn family(&self) -> EventFamily {
        match self {
            Self::ContextMenu => EventFamily::Simple,
            Self::MenuItemClick | Self::Tab(_) => EventFamily::Keyed,
            Self::EventDrop | Self::EventResize => EventFamily::Delta,
            Self::RangeSelect => EventFamily::Range,
            Self::DayClick | Self::EventClick | Self::SeriesClick => EventFamily::Compound,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContextMenu => "context_menu",
            Self::MenuItemClick => "menu_item_click",
            Self::Tab(TabAction::Select) => "tab_select",
            Self::Tab(TabAction::Activate) => "tab_activate",
            Self::Tab(TabAction::Expand) => "tab_expand",
            Self::Tab(TabAction::Collapse) => "tab_collapse",
            Self::DayClick => "day_click",
            Self::EventClick => "event_click",
            Self::RangeSelect => "range_select",
            Self::EventDrop => "event_drop",
            Self::EventResize => "event_resize",
            Self::SeriesClick => "series_click",
        }
    }

    /// Build the event for this kind from a request's parameters.
    ///
    /// Every field is decoded before the variant is returned, so a failure
    /// never leaves a partially built event behind.
    pub fn decode(&self, bag: &ParameterBag) -> Result<EventVariant, DecodeError> {
        let event = match *self {
            Self::ContextMenu => EventVariant::ContextMenu,
            Self::MenuItemClick => EventVariant::MenuItemClick {
                item_id: decode(bag, PARAM_ITEM_ID)?,
            },
            // The widget may fire without an item, so the index falls back to
            // the sentinel and the dispatcher drops it.
            Self::Tab(action) => EventVariant::Tab {
                action,
                index: decode_or(bag, PARAM_INDEX, INDEX_NONE),
            },
            Self::DayClick => EventVariant::DayClick {
                date: decode(bag, PARAM_DATE)?,
                view: decode_enum(bag, PARAM_VIEW_NAME)?,
            },
            Self::EventClick => EventVariant::EventClick {
                event_id: decode(bag, PARAM_EVENT_ID)?,
                view: decode_enum(bag, PARAM_VIEW_NAME)?,
            },
            Self::RangeSelect => EventVariant::RangeSelect {
                start: decode(bag, PARAM_START)?,
                end: decode(bag, PARAM_END)?,
                all_day: decode(bag, PARAM_ALL_DAY)?,
                view: decode_enum(bag, PARAM_VIEW_NAME)?,
            },
            Self::EventDrop => {
                let (event_id, delta_ms) = decode_delta(bag)?;
                EventVariant::EventDrop {
                    event_id,
                    delta_ms,
                    all_day: decode(bag, PARAM_ALL_DAY)?,
                }
            }
            Self::EventResize => {
                let (event_id, delta_ms) = decode_delta(bag)?;
                EventVariant::EventResize { event_id, delta_ms }
            }
            Self::SeriesClick => EventVariant::SeriesClick {
                series_name: decode(bag, PARAM_SERIES_NAME)?,
                series_field: decode(bag, PARAM_SERIES_FIELD)?,
                category: decode(bag, PARAM_CATEGORY)?,
                value: decode(bag, PARAM_VALUE)?,
            },
        };
        Ok(event)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn decode_delta(bag: &ParameterBag) -> Result<(i32, i64), DecodeError> {
    let event_id = decode(bag, PARAM_EVENT_ID)?;
    let days = decode(bag, PARAM_DAY_DELTA)?;
    let minutes = decode(bag, PARAM_MINUTE_DELTA)?;
    Ok((event_id, delta_millis(days, minutes)))
}

/// One decoded widget interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventVariant {
    ContextMenu,
    MenuItemClick {
        item_id: String,
    },
    Tab {
        action: TabAction,
        index: i32,
    },
    DayClick {
        date: DateTime<Utc>,
        view: CalendarView,
    },
    EventClick {
        event_id: i32,
        view: CalendarView,
    },
    RangeSelect {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
        view: CalendarView,
    },
    EventDrop {
        event_id: i32,
        delta_ms: i64,
        all_day: bool,
    },
    EventResize {
        event_id: i32,
        delta_ms: i64,
    },
    SeriesClick {
        series_name: String,
        series_field: String,
        category: String,
        value: i64,
    },
}

impl EventVariant {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ContextMenu => EventKind::ContextMenu,
            Self::MenuItemClick { .. } => EventKind::MenuItemClick,
            Self::Tab { action, .. } => EventKind::Tab(*action),
            Self::DayClick { .. } => EventKind::DayClick,
            Self::EventClick { .. } => EventKind::EventClick,
            Self::RangeSelect { .. } => EventKind::RangeSelect,
            Self::EventDrop { .. } => EventKind::EventDrop,
            Self::EventResize { .. } => EventKind::EventResize,
            Self::SeriesClick { .. } => EventKind::SeriesClick,
        }
    }

    pub fn family(&self) -> EventFamily {
        self.kind().family()
    }

    /// The moved/resized duration for delta events.
    pub fn delta(&self) -> Option<TimeDelta> {
        match self {
            Self::EventDrop { delta_ms, .. } | Self::EventResize { delta_ms, .. } => {
                Some(TimeDelta::milliseconds(*delta_ms))
            }
            _ => None,
        }
    }
}
