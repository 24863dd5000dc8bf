use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::{plugin_init, CallbackSpec, Widget, WidgetId};
use crate::bus::RequestTarget;
use crate::dispatch::{
    dispatch_accordion, resolve_index, AccordionListener, DispatchOutcome, TabSelector,
};
use crate::endpoint::ParamSpec;
use crate::event::{EventKind, EventVariant, TabAction, PARAM_INDEX};

const METHOD: &str = "kendoPanelBar";

/// One accordion pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub visible: bool,
    content: Option<LazyContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LazyContent {
    id: WidgetId,
    loaded: bool,
}

impl Tab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            visible: true,
            content: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Content rendered on the first event that reaches this tab.
    pub fn lazy(mut self, content: impl Into<WidgetId>) -> Self {
        self.content = Some(LazyContent {
            id: content.into(),
            loaded: false,
        });
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.content.as_ref().map_or(true, |c| c.loaded)
    }

    fn load(&mut self, target: &mut RequestTarget) {
        if let Some(content) = self.content.as_mut().filter(|c| !c.loaded) {
            content.loaded = true;
            target.add_component(content.id.clone());
        }
    }
}

/// Selection state. Set only by [`AccordionBehavior::select`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum TabSelection {
    #[default]
    None,
    Index(usize),
}

/// Which pane events are wired to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionEvents {
    #[serde(default)]
    pub select: bool,
    #[serde(default)]
    pub activate: bool,
    #[serde(default)]
    pub expand: bool,
    #[serde(default)]
    pub collapse: bool,
}

impl AccordionEvents {
    pub fn all() -> Self {
        Self {
            select: true,
            activate: true,
            expand: true,
            collapse: true,
        }
    }

    fn enabled(&self) -> impl Iterator<Item = TabAction> {
        [
            (self.select, TabAction::Select),
            (self.activate, TabAction::Activate),
            (self.expand, TabAction::Expand),
            (self.collapse, TabAction::Collapse),
        ]
        .into_iter()
        .filter_map(|(on, action)| on.then_some(action))
    }
}

pub struct AccordionBehavior<L> {
    id: WidgetId,
    tabs: Vec<Tab>,
    events: AccordionEvents,
    selection: TabSelection,
    listener: L,
}

impl<L: AccordionListener> AccordionBehavior<L> {
    pub fn new(id: impl Into<WidgetId>, tabs: Vec<Tab>, events: AccordionEvents, listener: L) -> Self {
        Self {
            id: id.into(),
            tabs,
            events,
            selection: TabSelection::None,
            listener,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Tabs can be hidden or added between requests; indexes are re-checked
    /// on every event.
    pub fn tabs_mut(&mut self) -> &mut Vec<Tab> {
        &mut self.tabs
    }

    pub fn visible_tabs(&self) -> Vec<&Tab> {
        self.tabs.iter().filter(|tab| tab.visible).collect()
    }

    pub fn selection(&self) -> TabSelection {
        self.selection
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Select and expand the `index`-th visible tab, now and on every later render.
    ///
    /// Listeners select through their [`TabSelector`]; host code calling this
    /// between requests passes the target to
    /// [`EndpointRegistry::publish`](crate::endpoint::EndpointRegistry::publish).
    pub fn select(&mut self, index: usize, target: &mut RequestTarget) {
        self.selection = TabSelection::Index(index);
        target.append_script(self.select_statement(index));
    }

    pub fn widget_expression(&self) -> String {
        self.id.widget_expression(METHOD)
    }

    pub fn select_statement(&self, index: usize) -> String {
        format!(
            "var $widget = {}, $item = jQuery('li:nth-child({})'); $widget.select($item); $widget.expand($item);",
            self.widget_expression(),
            index + 1
        )
    }

    /// Expand every pane without changing the selection.
    pub fn expand_all_statement(&self) -> String {
        format!("{}.expand(jQuery('li'), false);", self.widget_expression())
    }

    fn load_visible(&mut self, index: usize, target: &mut RequestTarget) {
        if let Some(tab) = self.tabs.iter_mut().filter(|tab| tab.visible).nth(index) {
            tab.load(target);
        }
    }
}

impl<L: AccordionListener> Widget for AccordionBehavior<L> {
    fn id(&self) -> &WidgetId {
        &self.id
    }

    fn callbacks(&self) -> Vec<CallbackSpec> {
        self.events
            .enabled()
            .map(|action| {
                let params = ParamSpec::new(&["e"]).field(PARAM_INDEX, "jQuery(e.item).index()");
                CallbackSpec::new(action.as_str(), EventKind::Tab(action), params)
            })
            .collect()
    }

    fn init_statement(&self, triggers: &[(&'static str, String)]) -> String {
        plugin_init(&self.id, METHOD, &Map::new(), triggers)
    }

    fn on_event(&mut self, event: EventVariant, target: &mut RequestTarget) -> DispatchOutcome {
        if let EventVariant::Tab { index, .. } = &event {
            let valid = resolve_index(*index, &self.visible_tabs()).ok().map(|(i, _)| i);
            if let Some(i) = valid {
                self.load_visible(i, target);
            }
        }

        let mut selector = TabSelector::new();
        let visible: Vec<&Tab> = self.tabs.iter().filter(|tab| tab.visible).collect();
        let count = visible.len();
        let outcome = dispatch_accordion(&mut self.listener, event, &visible, &mut selector, target);

        match selector.requested() {
            Some(index) if index < count => self.select(index, target),
            Some(index) => tracing::debug!("ignoring selection of tab {index}: {count} visible"),
            None => {}
        }
        outcome
    }

    fn render_head(&self) -> Vec<String> {
        match self.selection {
            TabSelection::Index(index) => vec![format!(
                "jQuery(function() {{ {} }} );",
                self.select_statement(index)
            )],
            TabSelection::None => Vec::new(),
        }
    }
}
