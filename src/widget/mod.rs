//! Server-side widget behaviors.
//!
//! A behavior describes which client callbacks a widget wires up
//! ([`CallbackSpec`]) and turns each decoded event into listener calls. The
//! [`EndpointRegistry`](crate::endpoint::EndpointRegistry) creates one
//! callback endpoint per spec when the widget is mounted.

mod accordion;
mod calendar;
mod chart;
mod context_menu;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bus::RequestTarget;
use crate::dispatch::DispatchOutcome;
use crate::endpoint::{ParamSpec, Throttle};
use crate::event::{EventKind, EventVariant};

pub use accordion::{AccordionBehavior, AccordionEvents, Tab, TabSelection};
pub use calendar::{CalendarBehavior, CalendarOptions};
pub use chart::{ChartBehavior, Series};
pub use context_menu::{ContextMenuBehavior, MenuItem};

/// DOM id of a rendered widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// jQuery selector for the element.
    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }

    /// Client expression resolving to the widget object attached to the element.
    pub fn widget_expression(&self, plugin: &str) -> String {
        format!("jQuery('{}').data('{}')", self.selector(), plugin)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// `jQuery(function() { jQuery('#id').method({ ... }); });`
///
/// Static options are written as JSON; triggers are written verbatim since
/// they are function literals.
pub fn plugin_init(
    id: &WidgetId,
    method: &str,
    options: &Map<String, Value>,
    triggers: &[(&'static str, String)],
) -> String {
    let mut entries: Vec<String> = options
        .iter()
        .map(|(key, value)| format!("{}: {}", Value::from(key.as_str()), value))
        .collect();
    entries.extend(triggers.iter().map(|(option, expr)| format!("{option}: {expr}")));

    format!(
        "jQuery(function() {{ jQuery('{}').{}({{ {} }}); }});",
        id.selector(),
        method,
        entries.join(", ")
    )
}

/// One client callback a widget wants wired to a server endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackSpec {
    /// Widget option the trigger expression is assigned to (`dayClick`, `select`, ...).
    pub option: &'static str,
    pub kind: EventKind,
    pub params: ParamSpec,
    /// Overrides the configured default throttle when set.
    pub throttle: Option<Throttle>,
}

impl CallbackSpec {
    pub fn new(option: &'static str, kind: EventKind, params: ParamSpec) -> Self {
        Self {
            option,
            kind,
            params,
            throttle: None,
        }
    }

    pub fn throttled(mut self, throttle: Option<Throttle>) -> Self {
        self.throttle = throttle;
        self
    }
}

/// A widget behavior that can be mounted on the registry.
pub trait Widget: Send {
    fn id(&self) -> &WidgetId;

    /// Client callbacks to wire, in option order. Disabled callbacks are omitted.
    fn callbacks(&self) -> Vec<CallbackSpec>;

    /// Statement initializing the widget on the client.
    ///
    /// `triggers` pairs each mounted [`CallbackSpec::option`] with its trigger
    /// expression.
    fn init_statement(&self, triggers: &[(&'static str, String)]) -> String;

    /// Route one decoded event to the listener.
    fn on_event(&mut self, event: EventVariant, target: &mut RequestTarget) -> DispatchOutcome;

    /// Statements to run once the widget is rendered.
    fn render_head(&self) -> Vec<String> {
        Vec::new()
    }
}
