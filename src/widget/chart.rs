use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{plugin_init, CallbackSpec, Widget, WidgetId};
use crate::bus::RequestTarget;
use crate::dispatch::{dispatch_chart, ChartListener, DispatchOutcome};
use crate::endpoint::{escape_js, ParamSpec};
use crate::event::{
    EventKind, EventVariant, PARAM_CATEGORY, PARAM_SERIES_FIELD, PARAM_SERIES_NAME, PARAM_VALUE,
};

const METHOD: &str = "kendoChart";
const OPTION_SERIES_CLICK: &str = "seriesClick";

/// One chart series, written into the plugin options as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Series type (`line`, `column`, `bar`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Row field holding the values.
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_field: Option<String>,
}

impl Series {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            field: field.into(),
            category_field: None,
        }
    }

    pub fn with_category_field(mut self, field: impl Into<String>) -> Self {
        self.category_field = Some(field.into());
        self
    }
}

/// A chart reading its rows from a registered feed.
pub struct ChartBehavior<L> {
    id: WidgetId,
    series: Vec<Series>,
    options: Map<String, Value>,
    feed_url: Option<String>,
    series_click: bool,
    listener: L,
}

impl<L: ChartListener> ChartBehavior<L> {
    pub fn new(id: impl Into<WidgetId>, series: Vec<Series>, listener: L) -> Self {
        Self {
            id: id.into(),
            series,
            options: Map::new(),
            feed_url: None,
            series_click: false,
            listener,
        }
    }

    /// Static plugin option (`title`, `legend`, ...).
    pub fn with_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Read rows from the feed at `url` (see `EndpointRegistry::register_feed`).
    pub fn with_feed(mut self, url: impl Into<String>) -> Self {
        self.feed_url = Some(url.into());
        self
    }

    /// Wire series clicks to the server. Off by default.
    pub fn with_series_click(mut self) -> Self {
        self.series_click = true;
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn is_series_click_enabled(&self) -> bool {
        self.series_click
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn widget_expression(&self) -> String {
        self.id.widget_expression(METHOD)
    }

    /// Client statement making the chart pull its feed again.
    pub fn refresh_statement(&self) -> String {
        format!(
            "var $w = {}; if ($w) {{ $w.dataSource.read(); }}",
            self.widget_expression()
        )
    }

    pub fn refresh(&self, target: &mut RequestTarget) {
        target.append_script(self.refresh_statement());
    }

    /// Data source literal. The loading indicator is shown while a read is in flight.
    fn data_source(&self, url: &str) -> String {
        let selector = self.id.selector();
        format!(
            "{{ transport: {{ read: {{ url: '{}', dataType: 'json' }} }}, \
             requestStart: function () {{ kendo.ui.progress(jQuery('{selector}'), true); }}, \
             requestEnd: function () {{ kendo.ui.progress(jQuery('{selector}'), false); }} }}",
            escape_js(url)
        )
    }
}

impl<L: ChartListener> Widget for ChartBehavior<L> {
    fn id(&self) -> &WidgetId {
        &self.id
    }

    fn callbacks(&self) -> Vec<CallbackSpec> {
        if !self.series_click {
            return Vec::new();
        }
        let params = ParamSpec::new(&["e"])
            .field(PARAM_SERIES_NAME, "e.series.name")
            .field(PARAM_SERIES_FIELD, "e.series.field")
            .field(PARAM_CATEGORY, "e.category")
            .field(PARAM_VALUE, "e.value");
        vec![CallbackSpec::new(OPTION_SERIES_CLICK, EventKind::SeriesClick, params)]
    }

    fn init_statement(&self, triggers: &[(&'static str, String)]) -> String {
        let mut options = self.options.clone();
        options.insert("series".into(), json!(self.series));

        let mut entries = Vec::with_capacity(triggers.len() + 1);
        if let Some(url) = &self.feed_url {
            entries.push(("dataSource", self.data_source(url)));
        }
        entries.extend(triggers.iter().cloned());

        plugin_init(&self.id, METHOD, &options, &entries)
    }

    fn on_event(&mut self, event: EventVariant, target: &mut RequestTarget) -> DispatchOutcome {
        dispatch_chart(&mut self.listener, event, target)
    }
}
