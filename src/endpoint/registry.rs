use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

use super::{CallbackEndpoint, Throttle, WidgetHandle, PARAM_ENDPOINT};
use crate::bus::{RefreshBatch, RefreshBus, RequestTarget};
use crate::codec::{decode, ParameterBag};
use crate::config::BridgeConfig;
use crate::dispatch::DispatchOutcome;
use crate::feed::{FeedEndpoint, FeedResponse};
use crate::widget::{Widget, WidgetId};
use crate::BridgeError;

#[derive(Clone)]
pub enum Route {
    Callback(Arc<CallbackEndpoint>),
    Feed(Arc<dyn FeedEndpoint>),
}

/// Result of one handled request.
#[derive(Debug)]
pub enum Handled {
    Callback {
        outcome: DispatchOutcome,
        batch: RefreshBatch,
    },
    Feed(FeedResponse),
}

/// A widget after mounting: its shared handle and client wiring.
pub struct MountedWidget<W> {
    id: WidgetId,
    handle: Arc<Mutex<W>>,
    endpoints: Vec<String>,
    triggers: Vec<(&'static str, String)>,
}

impl<W: Widget> MountedWidget<W> {
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn handle(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.handle)
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, W>, BridgeError> {
        self.handle
            .lock()
            .map_err(|_| BridgeError::WidgetPoisoned(self.id.to_string()))
    }

    /// Ids of the endpoints created for this widget, in callback order.
    pub fn endpoint_ids(&self) -> &[String] {
        &self.endpoints
    }

    pub fn triggers(&self) -> &[(&'static str, String)] {
        &self.triggers
    }

    pub fn trigger(&self, option: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|(name, _)| *name == option)
            .map(|(_, expr)| expr.as_str())
    }

    pub fn init_statement(&self) -> Result<String, BridgeError> {
        Ok(self.lock()?.init_statement(&self.triggers))
    }

    pub fn render_head(&self) -> Result<Vec<String>, BridgeError> {
        Ok(self.lock()?.render_head())
    }
}

/// All live endpoints, keyed by endpoint id.
pub struct EndpointRegistry {
    routes: DashMap<String, Route>,
    bus: Arc<RefreshBus>,
    config: BridgeConfig,
}

impl EndpointRegistry {
    pub fn new(config: BridgeConfig, bus: Arc<RefreshBus>) -> Self {
        Self {
            routes: DashMap::new(),
            bus,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<RefreshBus> {
        &self.bus
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route(&self, endpoint_id: &str) -> Option<Route> {
        self.routes.get(endpoint_id).map(|entry| entry.value().clone())
    }

    /// Create, bind and register one endpoint per enabled callback of `widget`.
    pub fn mount<W: Widget + 'static>(&self, widget: W) -> Result<MountedWidget<W>, BridgeError> {
        let id = widget.id().clone();
        let callbacks = widget.callbacks();
        let handle = Arc::new(Mutex::new(widget));
        let shared: WidgetHandle = handle.clone();
        let default_throttle = Throttle::from_millis(self.config.default_throttle_ms);

        let mut endpoints = Vec::with_capacity(callbacks.len());
        let mut triggers = Vec::with_capacity(callbacks.len());
        for spec in callbacks {
            let endpoint = CallbackEndpoint::new(spec.kind, spec.params)
                .with_throttle(spec.throttle.or(default_throttle));
            endpoint.bind(Arc::clone(&shared))?;

            triggers.push((spec.option, endpoint.trigger_expression(&self.config)));
            endpoints.push(endpoint.id().to_string());
            self.routes
                .insert(endpoint.id().to_string(), Route::Callback(Arc::new(endpoint)));
        }

        tracing::info!("mounted widget {id} with {} callback endpoint(s)", endpoints.len());
        Ok(MountedWidget {
            id,
            handle,
            endpoints,
            triggers,
        })
    }

    /// Register a feed under its own id. Returns the feed URL.
    pub fn register_feed(&self, feed: Arc<dyn FeedEndpoint>) -> String {
        let id = feed.id().to_string();
        let url = super::endpoint_url(&self.config.feed_path, &id);
        tracing::info!("registered feed endpoint {id}");
        self.routes.insert(id, Route::Feed(feed));
        url
    }

    /// Remove a feed route. Callback routes under the same id are left alone.
    pub fn unregister_feed(&self, feed_id: &str) -> bool {
        let removed = self
            .routes
            .remove_if(feed_id, |_, route| matches!(route, Route::Feed(_)))
            .is_some();
        if removed {
            tracing::info!("unregistered feed endpoint {feed_id}");
        }
        removed
    }

    /// Publish instructions produced outside a callback request.
    ///
    /// Host code that changes a widget between requests (for example an
    /// accordion `select`) hands its target here; the batch is tagged with
    /// the widget id instead of an endpoint id.
    pub fn publish(&self, origin: &WidgetId, target: RequestTarget) -> RefreshBatch {
        self.bus.flush(origin.as_str(), target.into_instructions())
    }

    /// Drop every endpoint of a mounted widget. Later requests to them are unknown.
    pub fn unmount<W>(&self, mounted: &MountedWidget<W>) -> usize {
        mounted
            .endpoints
            .iter()
            .filter(|id| self.routes.remove(id.as_str()).is_some())
            .count()
    }

    /// Resolve and run one request given as a raw query string.
    ///
    /// Refresh instructions are flushed onto the bus only when the request
    /// decoded successfully.
    pub fn handle(&self, query: &str) -> Result<Handled, BridgeError> {
        let bag = ParameterBag::parse_query(query);
        let endpoint_id: String = decode(&bag, PARAM_ENDPOINT)?;
        let route = self
            .route(&endpoint_id)
            .ok_or_else(|| BridgeError::UnknownEndpoint(endpoint_id.clone()))?;

        match route {
            Route::Callback(endpoint) => {
                let mut target = RequestTarget::new();
                let outcome = endpoint.on_request(&bag, &mut target)?;
                let batch = self.bus.flush(endpoint_id, target.into_instructions());
                Ok(Handled::Callback { outcome, batch })
            }
            Route::Feed(feed) => Ok(Handled::Feed(feed.on_request()?)),
        }
    }
}
