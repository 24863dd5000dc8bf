use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::RefreshInstruction;

const BUS_CAPACITY: usize = 256;

/// The refresh instructions produced by one successfully handled request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshBatch {
    pub id: String,
    pub seq: i64,
    pub endpoint_id: String,
    pub instructions: Vec<RefreshInstruction>,
    pub created_at: String,
}

/// Hands refresh batches to whoever renders them.
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshBatch>,
    seq: AtomicI64,
}

impl RefreshBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self {
            tx,
            seq: AtomicI64::new(0),
        }
    }

    /// Publish a pre-built batch onto the bus.
    pub fn publish(&self, batch: RefreshBatch) {
        if let Err(e) = self.tx.send(batch) {
            tracing::warn!("refresh bus publish failed (no receivers?): {e}");
        }
    }

    /// Build and publish a batch in one call.
    ///
    /// Empty instruction lists are still published so the renderer can
    /// acknowledge the request.
    pub fn flush(
        &self,
        endpoint_id: impl Into<String>,
        instructions: Vec<RefreshInstruction>,
    ) -> RefreshBatch {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let batch = RefreshBatch {
            id: Uuid::new_v4().to_string(),
            seq,
            endpoint_id: endpoint_id.into(),
            instructions,
            created_at: Utc::now().to_rfc3339(),
        };
        self.publish(batch.clone());
        batch
    }

    /// Get a new receiver for this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshBatch> {
        self.tx.subscribe()
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}
