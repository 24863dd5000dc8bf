use serde::{Deserialize, Serialize};

use super::{CallbackSpec, Widget, WidgetId};
use crate::bus::RequestTarget;
use crate::dispatch::{dispatch_menu, ContextMenuListener, DispatchOutcome};
use crate::endpoint::ParamSpec;
use crate::event::{EventKind, EventVariant, PARAM_ITEM_ID};

const OPTION_CONTEXT_MENU: &str = "contextmenu";
const OPTION_SELECT: &str = "select";

/// CSS class added to the element the menu opens on.
pub const INVOKER_CSS: &str = "context-menu-invoker";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A context menu attached to one invoker element.
pub struct ContextMenuBehavior<L> {
    id: WidgetId,
    invoker: WidgetId,
    items: Vec<MenuItem>,
    listener: L,
}

impl<L: ContextMenuListener> ContextMenuBehavior<L> {
    pub fn new(
        id: impl Into<WidgetId>,
        invoker: impl Into<WidgetId>,
        items: Vec<MenuItem>,
        listener: L,
    ) -> Self {
        Self {
            id: id.into(),
            invoker: invoker.into(),
            items,
            listener,
        }
    }

    pub fn invoker(&self) -> &WidgetId {
        &self.invoker
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<MenuItem> {
        &mut self.items
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Client statement opening the menu at the pointer of `event`.
    pub fn open_statement(&self, event: &str) -> String {
        format!(
            "{}.open({event}.pageX, {event}.pageY);",
            self.id.widget_expression("kendoContextMenu")
        )
    }
}

impl<L: ContextMenuListener> Widget for ContextMenuBehavior<L> {
    fn id(&self) -> &WidgetId {
        &self.id
    }

    fn callbacks(&self) -> Vec<CallbackSpec> {
        vec![
            // The native menu must not open on top of ours.
            CallbackSpec::new(
                OPTION_CONTEXT_MENU,
                EventKind::ContextMenu,
                ParamSpec::new(&["event"]).suffix("return false;"),
            ),
            CallbackSpec::new(
                OPTION_SELECT,
                EventKind::MenuItemClick,
                ParamSpec::new(&["e"]).field(PARAM_ITEM_ID, "jQuery(e.item).attr('id')"),
            ),
        ]
    }

    fn init_statement(&self, triggers: &[(&'static str, String)]) -> String {
        let mut statements = Vec::new();
        for (option, expr) in triggers {
            match *option {
                OPTION_CONTEXT_MENU => statements.push(format!(
                    "jQuery('{}').addClass('{INVOKER_CSS}').on('contextmenu', {expr});",
                    self.invoker.selector()
                )),
                _ => statements.push(format!(
                    "jQuery('{}').kendoContextMenu({{ {option}: {expr} }});",
                    self.id.selector()
                )),
            }
        }
        format!("jQuery(function() {{ {} }});", statements.join(" "))
    }

    fn on_event(&mut self, event: EventVariant, target: &mut RequestTarget) -> DispatchOutcome {
        dispatch_menu(&mut self.listener, event, &self.invoker, &self.items, target)
    }
}
