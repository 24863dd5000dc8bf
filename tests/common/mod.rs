//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use widgetwire::bus::{RefreshBus, RequestTarget};
use widgetwire::dispatch::{
    AccordionListener, CalendarListener, ChartListener, ContextMenuListener, TabSelector,
};
use widgetwire::event::CalendarView;
use widgetwire::widget::{MenuItem, Tab, WidgetId};
use widgetwire::{BridgeConfig, EndpointRegistry};

/// Listener calls as readable strings, shared with the test body.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Records every listener method it receives.
pub struct RecordingListener {
    pub log: CallLog,
}

impl RecordingListener {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl CalendarListener for RecordingListener {
    fn on_day_click(&mut self, target: &mut RequestTarget, view: CalendarView, date: DateTime<Utc>) {
        self.log
            .push(format!("day_click view={view} date={}", date.timestamp_millis()));
        target.append_script("refreshed();");
    }

    fn on_select(
        &mut self,
        _target: &mut RequestTarget,
        view: CalendarView,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) {
        self.log.push(format!(
            "select view={view} start={} end={} all_day={all_day}",
            start.timestamp_millis(),
            end.timestamp_millis()
        ));
    }

    fn on_event_click(&mut self, _target: &mut RequestTarget, view: CalendarView, event_id: i32) {
        self.log.push(format!("event_click view={view} id={event_id}"));
    }

    fn on_event_drop(&mut self, _target: &mut RequestTarget, event_id: i32, delta_ms: i64, all_day: bool) {
        self.log
            .push(format!("event_drop id={event_id} delta={delta_ms} all_day={all_day}"));
    }

    fn on_event_resize(&mut self, _target: &mut RequestTarget, event_id: i32, delta_ms: i64) {
        self.log.push(format!("event_resize id={event_id} delta={delta_ms}"));
    }
}

impl AccordionListener for RecordingListener {
    fn on_select(
        &mut self,
        _target: &mut RequestTarget,
        _selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        self.log.push(format!("tab_select {index} {}", tab.title));
    }

    fn on_activate(
        &mut self,
        _target: &mut RequestTarget,
        _selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        self.log.push(format!("tab_activate {index} {}", tab.title));
    }

    fn on_expand(
        &mut self,
        _target: &mut RequestTarget,
        selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        self.log.push(format!("tab_expand {index} {}", tab.title));
        // Expanding a pane makes it the selected one.
        selector.select(index);
    }

    fn on_collapse(
        &mut self,
        _target: &mut RequestTarget,
        _selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        self.log.push(format!("tab_collapse {index} {}", tab.title));
    }
}

impl ContextMenuListener for RecordingListener {
    fn on_context_menu(&mut self, _target: &mut RequestTarget, invoker: &WidgetId) {
        self.log.push(format!("context_menu {invoker}"));
    }

    fn on_item_click(&mut self, target: &mut RequestTarget, item: &MenuItem) {
        self.log.push(format!("item_click {}", item.id));
        target.add_component(WidgetId::new("details"));
    }
}

impl ChartListener for RecordingListener {
    fn on_series_click(
        &mut self,
        target: &mut RequestTarget,
        series_name: &str,
        series_field: &str,
        category: &str,
        value: i64,
    ) {
        self.log
            .push(format!("series_click {series_name} {series_field} {category} {value}"));
        target.append_script("drill();");
    }
}

pub fn registry() -> EndpointRegistry {
    EndpointRegistry::new(BridgeConfig::default(), Arc::new(RefreshBus::new()))
}

/// Query string addressing `endpoint_id` with extra `name=value` pairs.
pub fn query(endpoint_id: &str, pairs: &[(&str, &str)]) -> String {
    let mut query = format!("endpoint={endpoint_id}");
    for (name, value) in pairs {
        query.push_str(&format!("&{name}={}", urlencoding::encode(value)));
    }
    query
}
