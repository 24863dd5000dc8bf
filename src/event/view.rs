use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, Discriminator};

/// The active calendar view reported with day, range and event clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalendarView {
    Month,
    AgendaWeek,
    AgendaDay,
    BasicWeek,
    BasicDay,
}

impl Discriminator for CalendarView {
    const KIND: &'static str = "calendar view";

    fn all() -> &'static [Self] {
        &[
            Self::Month,
            Self::AgendaWeek,
            Self::AgendaDay,
            Self::BasicWeek,
            Self::BasicDay,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::AgendaWeek => "agendaWeek",
            Self::AgendaDay => "agendaDay",
            Self::BasicWeek => "basicWeek",
            Self::BasicDay => "basicDay",
        }
    }
}

impl std::fmt::Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::lookup(value)
    }
}
