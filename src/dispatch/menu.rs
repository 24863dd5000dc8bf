use super::{DispatchOutcome, DropReason};
use crate::bus::RequestTarget;
use crate::event::EventVariant;
use crate::widget::{MenuItem, WidgetId};

#[allow(unused_variables)]
pub trait ContextMenuListener: Send {
    /// The menu was requested on `invoker`.
    fn on_context_menu(&mut self, target: &mut RequestTarget, invoker: &WidgetId) {}

    fn on_item_click(&mut self, target: &mut RequestTarget, item: &MenuItem) {}
}

pub fn dispatch_menu<L: ContextMenuListener + ?Sized>(
    listener: &mut L,
    event: EventVariant,
    invoker: &WidgetId,
    items: &[MenuItem],
    target: &mut RequestTarget,
) -> DispatchOutcome {
    match event {
        EventVariant::ContextMenu => listener.on_context_menu(target, invoker),
        EventVariant::MenuItemClick { item_id } => {
            let Some(item) = items.iter().find(|item| item.id == item_id) else {
                return DispatchOutcome::dropped(DropReason::UnknownItem { id: item_id });
            };
            listener.on_item_click(target, item);
        }
        other => {
            return DispatchOutcome::dropped(DropReason::Unrecognized { kind: other.kind() });
        }
    }
    DispatchOutcome::Dispatched
}
