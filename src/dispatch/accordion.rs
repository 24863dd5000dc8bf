use super::{resolve_index, DispatchOutcome, DropReason};
use crate::bus::RequestTarget;
use crate::event::{EventVariant, TabAction};
use crate::widget::Tab;

/// Selection a listener asks for while handling a tab event.
///
/// The accordion applies it after the listener returns, inside the same
/// request, so its client statement lands in that request's batch.
#[derive(Debug, Default)]
pub struct TabSelector {
    requested: Option<usize>,
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the `index`-th visible tab. The last call wins.
    pub fn select(&mut self, index: usize) {
        self.requested = Some(index);
    }

    pub fn requested(&self) -> Option<usize> {
        self.requested
    }
}

/// Accordion pane callbacks. `index` counts visible tabs only.
#[allow(unused_variables)]
pub trait AccordionListener: Send {
    fn on_select(&mut self, target: &mut RequestTarget, selector: &mut TabSelector, index: usize, tab: &Tab) {}

    fn on_activate(&mut self, target: &mut RequestTarget, selector: &mut TabSelector, index: usize, tab: &Tab) {}

    fn on_expand(&mut self, target: &mut RequestTarget, selector: &mut TabSelector, index: usize, tab: &Tab) {}

    fn on_collapse(&mut self, target: &mut RequestTarget, selector: &mut TabSelector, index: usize, tab: &Tab) {}
}

/// Deliver a tab event, checking its index against `visible` first.
pub fn dispatch_accordion<L: AccordionListener + ?Sized>(
    listener: &mut L,
    event: EventVariant,
    visible: &[&Tab],
    selector: &mut TabSelector,
    target: &mut RequestTarget,
) -> DispatchOutcome {
    let EventVariant::Tab { action, index } = event else {
        return DispatchOutcome::dropped(DropReason::Unrecognized { kind: event.kind() });
    };

    let (index, tab) = match resolve_index(index, visible) {
        Ok(found) => found,
        Err(reason) => return DispatchOutcome::dropped(reason),
    };

    match action {
        TabAction::Select => listener.on_select(target, selector, index, tab),
        TabAction::Activate => listener.on_activate(target, selector, index, tab),
        TabAction::Expand => listener.on_expand(target, selector, index, tab),
        TabAction::Collapse => listener.on_collapse(target, selector, index, tab),
    }
    DispatchOutcome::Dispatched
}
