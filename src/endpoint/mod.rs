//! Server-side callback endpoints.
//!
//! A [`CallbackEndpoint`] is the server half of one client callback. It
//! knows:
//! - which [`EventKind`] its requests decode into
//! - how the client builds the request ([`ParamSpec`])
//! - which widget receives the decoded event (its binding)
//!
//! Endpoints are created and registered by the [`EndpointRegistry`] when a
//! widget is mounted.

mod param_spec;
mod registry;
mod throttle;


use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use uuid::Uuid;

use crate::bus::RequestTarget;
use crate::codec::ParameterBag;
use crate::config::BridgeConfig;
use crate::dispatch::DispatchOutcome;
use crate::event::EventKind;
use crate::widget::Widget;
use crate::BridgeError;

pub use param_spec::ParamSpec;
pub use registry::{EndpointRegistry, Handled, MountedWidget, Route};
pub use throttle::Throttle;

/// Query parameter carrying the endpoint id on every request.
pub const PARAM_ENDPOINT: &str = "endpoint";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("endpoint {0} is already bound to a widget")]
    AlreadyBound(String),
}

/// A widget shared between its endpoints.
pub type WidgetHandle = Arc<Mutex<dyn Widget>>;

pub struct CallbackEndpoint {
    id: String,
    kind: EventKind,
    params: ParamSpec,
    throttle: Option<Throttle>,
    binding: OnceLock<WidgetHandle>,
}

impl CallbackEndpoint {
    pub fn new(kind: EventKind, params: ParamSpec) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            params,
            throttle: None,
            binding: OnceLock::new(),
        }
    }

    pub fn with_throttle(mut self, throttle: Option<Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn params(&self) -> &ParamSpec {
        &self.params
    }

    pub fn throttle(&self) -> Option<Throttle> {
        self.throttle
    }

    pub fn is_bound(&self) -> bool {
        self.binding.get().is_some()
    }

    /// Attach the widget. Only the first call succeeds.
    pub fn bind(&self, widget: WidgetHandle) -> Result<(), BindError> {
        self.binding
            .set(widget)
            .map_err(|_| BindError::AlreadyBound(self.id.clone()))
    }

    /// `<base_path>?endpoint=<id>`
    pub fn callback_url(&self, config: &BridgeConfig) -> String {
        endpoint_url(&config.base_path, &self.id)
    }

    /// Client function literal issuing this endpoint's request.
    pub fn trigger_expression(&self, config: &BridgeConfig) -> String {
        let mut body = format!(
            "{}('{}'{});",
            config.client_call,
            escape_js(&self.callback_url(config)),
            self.params.query_expression()
        );
        if let Some(suffix) = self.params.body_suffix() {
            body.push(' ');
            body.push_str(suffix);
        }

        let function = format!("function({}) {{ {} }}", self.params.args().join(", "), body);
        match self.throttle {
            Some(throttle) => throttle.wrap(&function),
            None => function,
        }
    }

    /// Decode the request and dispatch it to the bound widget.
    ///
    /// The widget is locked only after the event is fully decoded, so a bad
    /// request never reaches widget state.
    pub fn on_request(
        &self,
        bag: &ParameterBag,
        target: &mut RequestTarget,
    ) -> Result<DispatchOutcome, BridgeError> {
        let event = self.kind.decode(bag)?;

        let widget = self
            .binding
            .get()
            .ok_or_else(|| BridgeError::NotBound(self.id.clone()))?;
        let mut widget = widget
            .lock()
            .map_err(|_| BridgeError::WidgetPoisoned(self.id.clone()))?;

        Ok(widget.on_event(event, target))
    }
}

impl std::fmt::Debug for CallbackEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackEndpoint")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("throttle", &self.throttle)
            .field("bound", &self.is_bound())
            .finish()
    }
}

pub(crate) fn endpoint_url(path: &str, id: &str) -> String {
    format!("{path}?{PARAM_ENDPOINT}={}", urlencoding::encode(id))
}

/// Escape a value for a single-quoted JS string literal.
pub(crate) fn escape_js(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}
