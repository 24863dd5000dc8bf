use std::sync::Arc;

use chrono::{DateTime, Utc};
use widgetwire::bus::{RefreshBus, RequestTarget};
use widgetwire::dispatch::{
    AccordionListener, CalendarListener, ContextMenuListener, TabSelector,
};
use widgetwire::endpoint::MountedWidget;
use widgetwire::event::CalendarView;
use widgetwire::feed::{FeedBridge, TextRenderer};
use widgetwire::widget::{
    AccordionBehavior, AccordionEvents, CalendarBehavior, CalendarOptions, ContextMenuBehavior,
    MenuItem, Tab, Widget, WidgetId,
};
use widgetwire::{handle_request, BridgeConfig, EndpointRegistry};

struct DemoCalendar;

impl CalendarListener for DemoCalendar {
    fn on_day_click(&mut self, target: &mut RequestTarget, view: CalendarView, date: DateTime<Utc>) {
        target.append_script(format!("alert('{view}: {}');", date.to_rfc3339()));
    }

    fn on_event_drop(&mut self, target: &mut RequestTarget, event_id: i32, delta_ms: i64, _all_day: bool) {
        target.append_script(format!("console.log('event {event_id} moved by {delta_ms} ms');"));
    }
}

struct DemoAccordion;

impl AccordionListener for DemoAccordion {
    fn on_select(
        &mut self,
        target: &mut RequestTarget,
        selector: &mut TabSelector,
        index: usize,
        tab: &Tab,
    ) {
        target.append_script(format!("console.log('selected {index}: {}');", tab.title));
        selector.select(index);
    }
}

struct DemoMenu;

impl ContextMenuListener for DemoMenu {
    fn on_item_click(&mut self, target: &mut RequestTarget, item: &MenuItem) {
        target.add_component(WidgetId::new(format!("panel-{}", item.id)));
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    widgetwire::init_tracing();

    if let Err(error) = run() {
        eprintln!("widgetwire replay failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    let config = BridgeConfig::load().map_err(|e| e.to_string())?;
    let bus = Arc::new(RefreshBus::new());
    let mut rx = bus.subscribe();
    let registry = EndpointRegistry::new(config.clone(), Arc::clone(&bus));

    let calendar = registry
        .mount(CalendarBehavior::new("calendar", CalendarOptions::all(), DemoCalendar))
        .map_err(|e| e.to_string())?;
    let accordion = registry
        .mount(AccordionBehavior::new(
            "accordion",
            vec![Tab::new("Inbox"), Tab::new("Archive").lazy("archive-list"), Tab::new("Spam").hidden()],
            AccordionEvents::all(),
            DemoAccordion,
        ))
        .map_err(|e| e.to_string())?;
    let menu = registry
        .mount(ContextMenuBehavior::new(
            "menu",
            "calendar",
            vec![MenuItem::new("open", "Open"), MenuItem::new("delete", "Delete")],
            DemoMenu,
        ))
        .map_err(|e| e.to_string())?;

    let feed = Arc::new(FeedBridge::new(
        "list",
        || vec!["alpha", "beta", "gamma"],
        TextRenderer::new(),
    ));
    let feed_url = registry.register_feed(feed.clone());

    println!("== init statements");
    print_init(&calendar)?;
    print_init(&accordion)?;
    print_init(&menu)?;
    println!("{}", feed.init_statement(&config));
    println!("feed: {feed_url}");

    for arg in &args {
        let Some(query) = resolve(arg, &calendar, &accordion, &menu, &feed_url) else {
            eprintln!("skipping '{arg}': expected <widget>.<option>[?query] or feed");
            continue;
        };

        println!("\n== {arg}");
        let reply = handle_request(&registry, &query);
        println!("status: {}", reply.status);
        println!("body:   {}", reply.body);

        if let Ok(batch) = rx.try_recv() {
            let json = serde_json::to_string_pretty(&batch).map_err(|e| e.to_string())?;
            println!("batch:  {json}");
        }
    }

    Ok(())
}

fn print_init<W: Widget>(mounted: &MountedWidget<W>) -> Result<(), String> {
    println!("{}", mounted.init_statement().map_err(|e| e.to_string())?);
    for (option, id) in mounted
        .triggers()
        .iter()
        .map(|(option, _)| option)
        .zip(mounted.endpoint_ids())
    {
        println!("  {}.{option} -> {id}", mounted.id());
    }
    Ok(())
}

/// Map `calendar.dayClick?date=...` to the query of the matching endpoint.
fn resolve<A: Widget, B: Widget, C: Widget>(
    arg: &str,
    calendar: &MountedWidget<A>,
    accordion: &MountedWidget<B>,
    menu: &MountedWidget<C>,
    feed_url: &str,
) -> Option<String> {
    if arg == "feed" {
        return feed_url.split_once('?').map(|(_, query)| query.to_string());
    }

    let (target, query) = arg.split_once('?').unwrap_or((arg, ""));
    let (widget, option) = target.split_once('.')?;
    let (triggers, ids) = match widget {
        "calendar" => (calendar.triggers(), calendar.endpoint_ids()),
        "accordion" => (accordion.triggers(), accordion.endpoint_ids()),
        "menu" => (menu.triggers(), menu.endpoint_ids()),
        _ => return None,
    };
    let position = triggers.iter().position(|(name, _)| *name == option)?;
    let id = ids.get(position)?;

    if query.is_empty() {
        Some(format!("endpoint={id}"))
    } else {
        Some(format!("endpoint={id}&{query}"))
    }
}

fn print_help() {
    println!(
        "Usage: widgetwire_replay [REQUEST...]\n\n\
Mounts a demo calendar, accordion, context menu and feed, prints their init\n\
statements, then replays each REQUEST against them.\n\n\
REQUEST is either `feed` or `<widget>.<option>[?query]`, for example:\n  \
calendar.dayClick?date=1700000000000&viewName=month\n  \
calendar.eventDrop?eventId=7&dayDelta=-1&minuteDelta=15&allDay=false\n  \
accordion.select?index=1\n  \
menu.select?id=delete\n\n\
Environment:\n  \
WIDGETWIRE_CONFIG        JSON config file\n  \
WIDGETWIRE_BASE_PATH     callback path (default /widgetwire/callback)\n  \
WIDGETWIRE_FEED_PATH     feed path (default /widgetwire/feed)\n  \
WIDGETWIRE_CLIENT_CALL   client GET function (default widgetwire.get)\n  \
WIDGETWIRE_THROTTLE_MS   default callback throttle (default 0 = off)\n  \
RUST_LOG                 log filter (default widgetwire=debug,info)"
    );
}
