use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// A partial page update scheduled by a listener.
///
/// The core never applies these; they are handed to the rendering side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RefreshInstruction {
    /// A client statement to execute after the response arrives.
    Script(String),
    /// A component to re-render in place.
    Component(WidgetId),
}

/// Collects the refresh instructions of one callback request.
#[derive(Debug, Default)]
pub struct RequestTarget {
    instructions: Vec<RefreshInstruction>,
}

impl RequestTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_script(&mut self, script: impl Into<String>) {
        self.instructions.push(RefreshInstruction::Script(script.into()));
    }

    pub fn add_component(&mut self, id: WidgetId) {
        self.instructions.push(RefreshInstruction::Component(id));
    }

    pub fn instructions(&self) -> &[RefreshInstruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn into_instructions(self) -> Vec<RefreshInstruction> {
        self.instructions
    }
}
