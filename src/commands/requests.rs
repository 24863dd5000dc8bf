use serde::Serialize;

use crate::bus::RefreshInstruction;
use crate::dispatch::DispatchOutcome;
use crate::endpoint::{EndpointRegistry, Handled};
use crate::feed::CONTENT_TYPE_JSON;
use crate::BridgeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    /// Failure replies never carry instructions, so the page is left untouched.
    fn failure(status: u16) -> Self {
        let error = match status {
            400 => "bad_request",
            404 => "not_found",
            _ => "internal_error",
        };
        Self {
            status,
            content_type: CONTENT_TYPE_JSON,
            body: format!("{{\"error\":\"{error}\"}}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Serialize)]
struct CallbackBody<'a> {
    outcome: &'a DispatchOutcome,
    batch_id: &'a str,
    instructions: &'a [RefreshInstruction],
}

/// Handle one widget request given as a raw query string.
pub fn handle_request(registry: &EndpointRegistry, query: &str) -> Reply {
    match registry.handle(query).and_then(render) {
        Ok(reply) => reply,
        Err(err) => {
            let status = err.status_code();
            if status >= 500 {
                tracing::warn!("widget request failed: {err}");
            } else {
                tracing::debug!("widget request rejected ({status}): {err}");
            }
            Reply::failure(status)
        }
    }
}

fn render(handled: Handled) -> Result<Reply, BridgeError> {
    match handled {
        Handled::Callback { outcome, batch } => {
            let body = serde_json::to_string(&CallbackBody {
                outcome: &outcome,
                batch_id: &batch.id,
                instructions: &batch.instructions,
            })?;
            Ok(Reply::json(body))
        }
        Handled::Feed(response) => Ok(Reply {
            status: 200,
            content_type: response.content_type,
            body: response.body,
        }),
    }
}
