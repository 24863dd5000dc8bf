use pretty_assertions::assert_eq;
use serde_json::{json, Map};

use super::*;
use crate::bus::{RefreshInstruction, RequestTarget};
use crate::dispatch::{
    AccordionListener, CalendarListener, ChartListener, ContextMenuListener, DropReason,
    TabSelector,
};
use crate::event::TabAction;

struct Quiet;

impl CalendarListener for Quiet {}
impl AccordionListener for Quiet {}
impl ContextMenuListener for Quiet {}
impl ChartListener for Quiet {}

#[derive(Default)]
struct Selections(Vec<(usize, String)>);

impl AccordionListener for Selections {
    fn on_select(
        &mut self,
        _target: &mut RequestTarget,
        _selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        self.0.push((index, tab.title.clone()));
    }
}

fn five_tabs() -> Vec<Tab> {
    ["a", "b", "c", "d", "e"].into_iter().map(Tab::new).collect()
}

// ---------------------------------------------------------------------------
// Widget ids and init
// ---------------------------------------------------------------------------

#[test]
fn test_widget_id_expressions() {
    let id = WidgetId::new("panel");
    assert_eq!(id.selector(), "#panel");
    assert_eq!(
        id.widget_expression("kendoPanelBar"),
        "jQuery('#panel').data('kendoPanelBar')"
    );
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("panel"));
}

#[test]
fn test_plugin_init_writes_options_then_triggers() {
    let mut options = Map::new();
    options.insert("editable".into(), json!(true));

    let statement = plugin_init(
        &WidgetId::new("cal"),
        "fullCalendar",
        &options,
        &[("dayClick", "function(date) { go(date); }".to_string())],
    );

    assert_eq!(
        statement,
        "jQuery(function() { jQuery('#cal').fullCalendar({ \"editable\": true, dayClick: function(date) { go(date); } }); });"
    );
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[test]
fn test_calendar_callbacks_follow_options() {
    let defaults = CalendarBehavior::new("cal", CalendarOptions::default(), Quiet);
    let options: Vec<&str> = defaults.callbacks().iter().map(|c| c.option).collect();
    assert_eq!(options, vec!["dayClick", "eventClick"]);

    let all = CalendarBehavior::new("cal", CalendarOptions::all(), Quiet);
    let kinds: Vec<EventKind> = all.callbacks().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::DayClick,
            EventKind::EventClick,
            EventKind::RangeSelect,
            EventKind::EventDrop,
            EventKind::EventResize,
        ]
    );

    let none = CalendarBehavior::new(
        "cal",
        CalendarOptions {
            editable: false,
            selectable: false,
            event_drop: false,
            event_resize: false,
        },
        Quiet,
    );
    assert!(none.callbacks().is_empty());
}

#[test]
fn test_calendar_param_specs() {
    let calendar = CalendarBehavior::new("cal", CalendarOptions::all(), Quiet);
    let callbacks = calendar.callbacks();

    let day_click = &callbacks[0].params;
    assert_eq!(day_click.args(), &["date", "allDay", "jsEvent", "view"]);
    assert_eq!(
        day_click.fields(),
        &[
            ("date", "date.getTime()".to_string()),
            ("viewName", "view.name".to_string())
        ]
    );

    let drop_fields: Vec<&str> = callbacks[3].params.fields().iter().map(|(n, _)| *n).collect();
    let resize_fields: Vec<&str> = callbacks[4].params.fields().iter().map(|(n, _)| *n).collect();
    assert_eq!(drop_fields, vec!["eventId", "dayDelta", "minuteDelta", "allDay"]);
    assert_eq!(resize_fields, vec!["eventId", "dayDelta", "minuteDelta"]);
}

#[test]
fn test_calendar_init_statement_carries_flags() {
    let calendar = CalendarBehavior::new("cal", CalendarOptions::default(), Quiet);
    let statement = calendar.init_statement(&[]);

    assert!(statement.starts_with("jQuery(function() { jQuery('#cal').fullCalendar({"));
    assert!(statement.contains("\"disableDragging\": true"));
    assert!(statement.contains("\"editable\": true"));
    assert!(statement.contains("\"selectable\": false"));
    assert_eq!(
        calendar.refetch_statement(),
        "jQuery('#cal').fullCalendar('refetchEvents');"
    );
}

// ---------------------------------------------------------------------------
// Accordion
// ---------------------------------------------------------------------------

#[test]
fn test_accordion_select_is_idempotent() {
    let mut accordion = AccordionBehavior::new("acc", five_tabs(), AccordionEvents::all(), Quiet);
    assert_eq!(accordion.selection(), TabSelection::None);
    assert!(accordion.render_head().is_empty());

    let mut target = RequestTarget::new();
    accordion.select(2, &mut target);

    assert_eq!(accordion.selection(), TabSelection::Index(2));
    let expected = "var $widget = jQuery('#acc').data('kendoPanelBar'), $item = jQuery('li:nth-child(3)'); $widget.select($item); $widget.expand($item);";
    assert_eq!(
        target.instructions(),
        &[RefreshInstruction::Script(expected.to_string())]
    );

    let head = accordion.render_head();
    assert_eq!(head, vec![format!("jQuery(function() {{ {expected} }} );")]);

    accordion.select(2, &mut RequestTarget::new());
    assert_eq!(accordion.selection(), TabSelection::Index(2));
    assert_eq!(accordion.render_head(), head);
}

#[test]
fn test_accordion_expand_all() {
    let accordion = AccordionBehavior::new("acc", five_tabs(), AccordionEvents::default(), Quiet);
    assert_eq!(
        accordion.expand_all_statement(),
        "jQuery('#acc').data('kendoPanelBar').expand(jQuery('li'), false);"
    );
    assert_eq!(accordion.selection(), TabSelection::None);
}

#[test]
fn test_accordion_callbacks_per_enabled_event() {
    let events = AccordionEvents {
        select: true,
        collapse: true,
        ..AccordionEvents::default()
    };
    let accordion = AccordionBehavior::new("acc", five_tabs(), events, Quiet);
    let callbacks = accordion.callbacks();

    let options: Vec<&str> = callbacks.iter().map(|c| c.option).collect();
    assert_eq!(options, vec!["select", "collapse"]);
    assert_eq!(callbacks[1].kind, EventKind::Tab(TabAction::Collapse));
    assert_eq!(
        callbacks[0].params.fields(),
        &[("index", "jQuery(e.item).index()".to_string())]
    );
}

#[test]
fn test_accordion_counts_visible_tabs_only() {
    let tabs = vec![Tab::new("a"), Tab::new("hidden").hidden(), Tab::new("c")];
    let mut accordion = AccordionBehavior::new("acc", tabs, AccordionEvents::all(), Selections::default());
    let mut target = RequestTarget::new();

    let hit = accordion.on_event(
        EventVariant::Tab {
            action: TabAction::Select,
            index: 1,
        },
        &mut target,
    );
    let stale = accordion.on_event(
        EventVariant::Tab {
            action: TabAction::Select,
            index: 2,
        },
        &mut target,
    );

    assert!(hit.is_dispatched());
    assert_eq!(
        stale,
        DispatchOutcome::Dropped(DropReason::StaleIndex { index: 2, count: 2 })
    );
    assert_eq!(accordion.listener().0, vec![(1, "c".to_string())]);
}

#[test]
fn test_accordion_revalidates_after_tabs_change() {
    let mut accordion =
        AccordionBehavior::new("acc", five_tabs(), AccordionEvents::all(), Selections::default());
    accordion.tabs_mut().truncate(2);

    let outcome = accordion.on_event(
        EventVariant::Tab {
            action: TabAction::Select,
            index: 4,
        },
        &mut RequestTarget::new(),
    );

    assert_eq!(
        outcome,
        DispatchOutcome::Dropped(DropReason::StaleIndex { index: 4, count: 2 })
    );
}

#[test]
fn test_lazy_tab_loads_once() {
    let tabs = vec![Tab::new("a"), Tab::new("b").lazy("b-content")];
    let mut accordion = AccordionBehavior::new("acc", tabs, AccordionEvents::all(), Quiet);
    assert!(!accordion.tabs()[1].is_loaded());

    let event = EventVariant::Tab {
        action: TabAction::Expand,
        index: 1,
    };
    let mut first = RequestTarget::new();
    accordion.on_event(event.clone(), &mut first);
    let mut second = RequestTarget::new();
    accordion.on_event(event, &mut second);

    assert_eq!(
        first.instructions(),
        &[RefreshInstruction::Component(WidgetId::new("b-content"))]
    );
    assert!(second.is_empty());
    assert!(accordion.tabs()[1].is_loaded());
}

// ---------------------------------------------------------------------------
// Context menu
// ---------------------------------------------------------------------------

#[test]
fn test_context_menu_callbacks() {
    let menu = ContextMenuBehavior::new("menu", "grid", vec![MenuItem::new("open", "Open")], Quiet);
    let callbacks = menu.callbacks();

    assert_eq!(callbacks[0].kind, EventKind::ContextMenu);
    assert_eq!(callbacks[0].params.args(), &["event"]);
    assert_eq!(callbacks[0].params.body_suffix(), Some("return false;"));
    assert!(callbacks[0].params.fields().is_empty());

    assert_eq!(callbacks[1].kind, EventKind::MenuItemClick);
    assert_eq!(
        callbacks[1].params.fields(),
        &[("id", "jQuery(e.item).attr('id')".to_string())]
    );
}

#[test]
fn test_context_menu_init_binds_invoker() {
    let menu = ContextMenuBehavior::new("menu", "grid", Vec::new(), Quiet);
    let statement = menu.init_statement(&[
        ("contextmenu", "function(event) { x(); return false; }".to_string()),
        ("select", "function(e) { y(); }".to_string()),
    ]);

    assert_eq!(
        statement,
        "jQuery(function() { jQuery('#grid').addClass('context-menu-invoker').on('contextmenu', function(event) { x(); return false; }); jQuery('#menu').kendoContextMenu({ select: function(e) { y(); } }); });"
    );
}

#[test]
fn test_context_menu_open_statement() {
    let menu = ContextMenuBehavior::new("menu", "grid", Vec::new(), Quiet);
    assert_eq!(
        menu.open_statement("e"),
        "jQuery('#menu').data('kendoContextMenu').open(e.pageX, e.pageY);"
    );
    assert_eq!(menu.invoker(), &WidgetId::new("grid"));
}

#[test]
fn test_calendar_options_fill_missing_from_default() {
    let options: CalendarOptions = serde_json::from_str(r#"{"eventDrop": true}"#).unwrap();
    assert_eq!(
        options,
        CalendarOptions {
            editable: true,
            selectable: false,
            event_drop: true,
            event_resize: false,
        }
    );
}

struct SelectOn(usize);

impl AccordionListener for SelectOn {
    fn on_activate(
        &mut self,
        _target: &mut RequestTarget,
        selector: &mut TabSelector,
        _index: usize,
        _tab: &Tab,
    ) {
        selector.select(self.0);
    }
}

#[test]
fn test_listener_selection_applies_in_request() {
    let tabs = vec![Tab::new("a"), Tab::new("hidden").hidden(), Tab::new("c")];
    let mut accordion = AccordionBehavior::new("acc", tabs, AccordionEvents::all(), SelectOn(1));
    let activate = EventVariant::Tab {
        action: TabAction::Activate,
        index: 0,
    };

    let mut target = RequestTarget::new();
    accordion.on_event(activate.clone(), &mut target);

    assert_eq!(accordion.selection(), TabSelection::Index(1));
    assert_eq!(
        target.instructions(),
        &[RefreshInstruction::Script(accordion.select_statement(1))]
    );

    // Only two tabs are visible, so index 2 is ignored.
    let mut accordion =
        AccordionBehavior::new("acc", accordion.tabs().to_vec(), AccordionEvents::all(), SelectOn(2));
    let mut target = RequestTarget::new();
    accordion.on_event(activate, &mut target);

    assert_eq!(accordion.selection(), TabSelection::None);
    assert!(target.is_empty());
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

fn sales_series() -> Vec<Series> {
    vec![Series::new("column", "Sales", "amount").with_category_field("year")]
}

#[test]
fn test_chart_series_click_is_opt_in() {
    let chart = ChartBehavior::new("chart", sales_series(), Quiet);
    assert!(!chart.is_series_click_enabled());
    assert!(chart.callbacks().is_empty());

    let chart = ChartBehavior::new("chart", sales_series(), Quiet).with_series_click();
    let callbacks = chart.callbacks();
    assert_eq!(callbacks.len(), 1);
    assert_eq!(callbacks[0].option, "seriesClick");
    assert_eq!(callbacks[0].kind, EventKind::SeriesClick);
    let fields: Vec<&str> = callbacks[0].params.fields().iter().map(|(n, _)| *n).collect();
    assert_eq!(fields, vec!["seriesName", "seriesField", "category", "value"]);
}

#[test]
fn test_chart_init_with_feed_and_progress_hooks() {
    let chart = ChartBehavior::new("chart", sales_series(), Quiet)
        .with_option("title", json!({"text": "Sales"}))
        .with_feed("/widgetwire/feed?endpoint=abc");

    let statement = chart.init_statement(&[("seriesClick", "function(e) { x(); }".to_string())]);

    assert_eq!(
        statement,
        "jQuery(function() { jQuery('#chart').kendoChart({ \"series\": [{\"categoryField\":\"year\",\"field\":\"amount\",\"name\":\"Sales\",\"type\":\"column\"}], \"title\": {\"text\":\"Sales\"}, \
dataSource: { transport: { read: { url: '/widgetwire/feed?endpoint=abc', dataType: 'json' } }, \
requestStart: function () { kendo.ui.progress(jQuery('#chart'), true); }, \
requestEnd: function () { kendo.ui.progress(jQuery('#chart'), false); } }, \
seriesClick: function(e) { x(); } }); });"
    );
    assert_eq!(
        chart.refresh_statement(),
        "var $w = jQuery('#chart').data('kendoChart'); if ($w) { $w.dataSource.read(); }"
    );
}

#[test]
fn test_chart_without_feed_has_no_data_source() {
    let chart = ChartBehavior::new("chart", Vec::new(), Quiet);
    assert_eq!(
        chart.init_statement(&[]),
        "jQuery(function() { jQuery('#chart').kendoChart({ \"series\": [] }); });"
    );
}
