//! Pushes surface snapshots to the page over a WebSocket.
//!
//! A session gets the current snapshot on connect and every newer one as the
//! refresh cycle publishes it. Snapshots that arrive while a send is pending
//! are coalesced; the page only ever needs the latest.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use runtime::MapState;
use tokio::sync::watch;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::AppState;

pub async fn live(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_live_session(socket, state.map))
}

async fn handle_live_session(mut socket: WebSocket, mut map: watch::Receiver<Arc<MapState>>) {
    let session_id = Uuid::new_v4();
    info!("live session {session_id} connected");

    if send_latest(&mut socket, &mut map).await.is_ok() {
        loop {
            tokio::select! {
                changed = map.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if send_latest(&mut socket, &mut map).await.is_err() {
                        break;
                    }
                }
                incoming = socket.recv() => match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    info!("live session {session_id} closed");
}

async fn send_latest(
    socket: &mut WebSocket,
    map: &mut watch::Receiver<Arc<MapState>>,
) -> Result<(), ()> {
    let snapshot = Arc::clone(&map.borrow_and_update());
    let text = match serde_json::to_string(&snapshot.surface) {
        Ok(t) => t,
        Err(e) => {
            error!("failed to serialize surface snapshot: {e}");
            return Err(());
        }
    };
    debug!(generation = snapshot.surface.generation, "sending surface snapshot");
    socket.send(Message::Text(text)).await.map_err(|_| ())
}
