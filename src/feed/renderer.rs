use std::fmt::Display;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::BridgeError;

/// Turns one row into one element of the feed's JSON array.
pub trait RowRenderer<T>: Send + Sync {
    fn render(&self, row: &T) -> Result<Value, BridgeError>;

    /// Token of the client template the elements are rendered with, if any.
    fn template_token(&self) -> Option<&str> {
        None
    }
}

/// Renders each row as its `Display` text.
pub struct TextRenderer<T>(PhantomData<fn(&T)>);

impl<T> TextRenderer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TextRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Display> RowRenderer<T> for TextRenderer<T> {
    fn render(&self, row: &T) -> Result<Value, BridgeError> {
        Ok(Value::String(row.to_string()))
    }
}

/// Renders each row through its `Serialize` impl.
pub struct JsonRenderer<T>(PhantomData<fn(&T)>);

impl<T> JsonRenderer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> RowRenderer<T> for JsonRenderer<T> {
    fn render(&self, row: &T) -> Result<Value, BridgeError> {
        Ok(serde_json::to_value(row)?)
    }
}

type Fragment<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// Renders each row as `{ "<token>": "<fragment>" }` for a client template.
pub struct TemplateRenderer<T> {
    token: String,
    fragment: Fragment<T>,
}

impl<T> TemplateRenderer<T> {
    /// A fresh token is generated for every renderer.
    pub fn new(fragment: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            token: format!("widgetwire-template-{}", Uuid::new_v4().simple()),
            fragment: Box::new(fragment),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Template markup inserting the rendered fragment unescaped.
    pub fn markup(&self) -> String {
        format!("#= data['{}'] #", self.token)
    }

    /// Script block holding the template, to be written into the page.
    pub fn script_block(&self) -> String {
        format!(
            "<script id=\"{}\" type=\"text/x-kendo-template\">{}</script>",
            self.token,
            self.markup()
        )
    }
}

impl<T> RowRenderer<T> for TemplateRenderer<T> {
    fn render(&self, row: &T) -> Result<Value, BridgeError> {
        let mut element = Map::new();
        element.insert(self.token.clone(), Value::String((self.fragment)(row)));
        Ok(Value::Object(element))
    }

    fn template_token(&self) -> Option<&str> {
        Some(&self.token)
    }
}
