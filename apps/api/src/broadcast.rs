//! # Broadcast Hub
//!
//! WebSocket fan-out for dashboard refreshes.
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         BroadcastHub                                    │
//! │                                                                         │
//! │  client A ──text──┐                                                     │
//! │                   ├──► broadcast::Sender<String> ──┬──► client A        │
//! │  POST /api/vendas ┘    (capacity 256)              ├──► client B        │
//! │  InventoryEvent                                    └──► client C        │
//! │                                                                         │
//! │  Each connection owns its sink and its receiver:                       │
//! │  • a closed socket ends only its own forwarding task                   │
//! │  • a lagging receiver skips what it missed and keeps going             │
//! │                                                                         │
//! │  clients: RwLock<HashMap<Uuid, ConnectedClient>>  (for /health)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use estoque_core::{Category, ProductView, Sale};

use crate::AppState;

/// Capacity of the fan-out channel.
const CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// Events
// =============================================================================

/// Server-originated notifications, sent as `{"tipo": "...", ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tipo")]
pub enum InventoryEvent {
    #[serde(rename = "categoria_criada")]
    CategoryCreated { categoria: Category },

    #[serde(rename = "produto_criado")]
    ProductCreated { produto: ProductView },

    #[serde(rename = "venda_registrada")]
    SaleRegistered { venda: Sale },
}

// =============================================================================
// Connected Client
// =============================================================================

/// A connected websocket client.
#[derive(Debug, Clone)]
pub struct ConnectedClient {
    pub id: Uuid,
    pub connected_at: DateTime<Utc>,
}

// =============================================================================
// Hub
// =============================================================================

/// Shared fan-out state.
pub struct BroadcastHub {
    clients: RwLock<HashMap<Uuid, ConnectedClient>>,
    broadcast_tx: broadcast::Sender<String>,
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastHub {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        BroadcastHub {
            clients: RwLock::new(HashMap::new()),
            broadcast_tx,
        }
    }

    /// Sends a raw text message to every connected client.
    ///
    /// Returns how many receivers were live. Zero clients is not an error.
    pub fn broadcast(&self, text: String) -> usize {
        self.broadcast_tx.send(text).unwrap_or(0)
    }

    /// Serializes and broadcasts a server event.
    pub fn publish(&self, event: &InventoryEvent) {
        match serde_json::to_string(event) {
            Ok(json) => {
                let receivers = self.broadcast(json);
                debug!(receivers, "Inventory event published");
            }
            Err(e) => warn!(error = %e, "Failed to serialize inventory event"),
        }
    }

    /// Subscribes to the fan-out channel.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast_tx.subscribe()
    }

    /// Returns the number of connected clients.
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    async fn register(&self) -> ConnectedClient {
        let client = ConnectedClient {
            id: Uuid::new_v4(),
            connected_at: Utc::now(),
        };
        self.clients.write().await.insert(client.id, client.clone());
        client
    }

    async fn unregister(&self, id: &Uuid) {
        self.clients.write().await.remove(id);
    }
}

// =============================================================================
// WebSocket Handler
// =============================================================================

/// WebSocket upgrade handler: `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let hub = &state.hub;

    // subscribed before the client is counted or read from, so a counted
    // client never misses a message, its own included
    let mut rx = hub.subscribe();
    let client = hub.register().await;
    info!(client_id = %client.id, "WebSocket client connected");

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!(skipped = n, "WebSocket client lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let tx = hub.broadcast_tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    // only fails with no live receivers
                    if let Err(e) = tx.send(text.as_str().to_owned()) {
                        debug!(error = %e, "Relay dropped: no subscribers");
                    }
                }
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    warn!(error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unregister(&client.id).await;
    info!(client_id = %client.id, "WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_shape() {
        let event = InventoryEvent::CategoryCreated {
            categoria: Category {
                id: 1,
                description: "Bebidas".to_string(),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["tipo"], "categoria_criada");
        assert_eq!(json["categoria"]["descricao"], "Bebidas");
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let hub = BroadcastHub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.broadcast("oi".to_string()), 2);
        assert_eq!(a.recv().await.unwrap(), "oi");
        assert_eq!(b.recv().await.unwrap(), "oi");
    }

    #[tokio::test]
    async fn test_dropped_subscriber_does_not_affect_others() {
        let hub = BroadcastHub::new();
        let dropped = hub.subscribe();
        let mut live = hub.subscribe();
        drop(dropped);

        assert_eq!(hub.broadcast("x".to_string()), 1);
        assert_eq!(live.recv().await.unwrap(), "x");
    }

    #[test]
    fn test_broadcast_without_clients() {
        let hub = BroadcastHub::new();
        assert_eq!(hub.broadcast("ninguém".to_string()), 0);
    }

    #[tokio::test]
    async fn test_client_registry() {
        let hub = BroadcastHub::new();
        let client = hub.register().await;
        assert_eq!(hub.client_count().await, 1);
        hub.unregister(&client.id).await;
        assert_eq!(hub.client_count().await, 0);
    }
}
