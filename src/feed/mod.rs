//! Read-only data feeds for list and chart widgets.
//!
//! A feed endpoint sits next to the callback endpoints but never decodes an
//! event or runs a dispatcher: every request simply returns the current rows
//! as a JSON array. The client widget pulls the feed itself; the server can
//! only ask it to pull again ([`FeedBridge::refresh_statement`]).

mod renderer;

#[cfg(test)]
mod tests;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::bus::RequestTarget;
use crate::config::BridgeConfig;
use crate::endpoint::{endpoint_url, escape_js};
use crate::widget::WidgetId;
use crate::BridgeError;

pub use renderer::{JsonRenderer, RowRenderer, TemplateRenderer, TextRenderer};

pub const CONTENT_TYPE_JSON: &str = "application/json";

const METHOD: &str = "kendoListView";

/// Where a feed's rows come from. Read on every request.
pub trait RowSource<T>: Send + Sync {
    fn rows(&self) -> Vec<T>;
}

impl<T, F> RowSource<T> for F
where
    F: Fn() -> Vec<T> + Send + Sync,
{
    fn rows(&self) -> Vec<T> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedResponse {
    pub content_type: &'static str,
    pub body: String,
}

/// A registered feed, as seen by the endpoint registry.
pub trait FeedEndpoint: Send + Sync {
    fn id(&self) -> &str;

    fn on_request(&self) -> Result<FeedResponse, BridgeError>;
}

pub struct FeedBridge<T> {
    id: String,
    widget: WidgetId,
    page_size: Option<usize>,
    source: Box<dyn RowSource<T>>,
    renderer: Box<dyn RowRenderer<T>>,
}

impl<T> FeedBridge<T> {
    pub fn new(
        widget: impl Into<WidgetId>,
        source: impl RowSource<T> + 'static,
        renderer: impl RowRenderer<T> + 'static,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            widget: widget.into(),
            page_size: None,
            source: Box::new(source),
            renderer: Box::new(renderer),
        }
    }

    /// Client-side page size of the list widget.
    pub fn with_page_size(mut self, rows: usize) -> Self {
        self.page_size = Some(rows);
        self
    }

    pub fn widget(&self) -> &WidgetId {
        &self.widget
    }

    pub fn widget_expression(&self) -> String {
        self.widget.widget_expression(METHOD)
    }

    /// `<feed_path>?endpoint=<id>`
    pub fn feed_url(&self, config: &BridgeConfig) -> String {
        endpoint_url(&config.feed_path, &self.id)
    }

    /// Client statement making the widget pull the feed again.
    pub fn refresh_statement(&self) -> String {
        format!(
            "var $w = {}; if ($w) {{ $w.dataSource.read(); }}",
            self.widget_expression()
        )
    }

    pub fn refresh(&self, target: &mut RequestTarget) {
        target.append_script(self.refresh_statement());
    }

    /// Re-render the whole widget rather than just its data.
    pub fn reload(&self, target: &mut RequestTarget) {
        target.add_component(self.widget.clone());
    }

    pub fn init_statement(&self, config: &BridgeConfig) -> String {
        let mut data_source = format!(
            "{{ transport: {{ read: {{ url: '{}', dataType: 'json' }} }}",
            escape_js(&self.feed_url(config))
        );
        if let Some(rows) = self.page_size {
            data_source.push_str(&format!(", pageSize: {rows}"));
        }
        data_source.push_str(" }");

        let mut options = vec![format!("dataSource: {data_source}"), "autoBind: true".to_string()];
        if let Some(token) = self.renderer.template_token() {
            options.push(format!("template: kendo.template(jQuery('#{token}').html())"));
        }

        format!(
            "jQuery(function() {{ jQuery('{}').{METHOD}({{ {} }}); }});",
            self.widget.selector(),
            options.join(", ")
        )
    }

    /// Render every row, in source order.
    pub fn render_rows(&self) -> Result<Vec<Value>, BridgeError> {
        self.source
            .rows()
            .iter()
            .map(|row| self.renderer.render(row))
            .collect()
    }
}

impl<T> FeedEndpoint for FeedBridge<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_request(&self) -> Result<FeedResponse, BridgeError> {
        let rows = self.render_rows()?;
        Ok(FeedResponse {
            content_type: CONTENT_TYPE_JSON,
            body: serde_json::to_string(&rows)?,
        })
    }
}
