//! WebSocket transport for editing sessions.

use std::fmt::Display;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, Stream, StreamExt};
use lm_pipeline::{Completion, MountPoint};
use tokio::task::JoinSet;
use uuid::Uuid;

use super::Session;
use super::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Handle WebSocket upgrade for an editing session.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    run_session(sender, receiver, &state).await;
}

/// Drive one session until the client goes away.
///
/// Offloaded transformations run on the blocking pool, one at a time.
async fn run_session<Tx, Rx>(mut sender: Tx, mut receiver: Rx, state: &AppState)
where
    Tx: Sink<Message> + Unpin,
    Tx::Error: Display,
    Rx: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let mount = MountPoint::new(format!("session-{}", Uuid::new_v4()));
    let mut session = match Session::open(state, &mount) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(mount = mount.id(), error = %e, "Failed to open session");
            let message = ServerMessage::Error {
                message: e.to_string(),
            };
            let _ = send(&mut sender, &message).await;
            return;
        }
    };
    tracing::info!(mount = mount.id(), "Session opened");

    let mut jobs: JoinSet<Completion> = JoinSet::new();

    loop {
        if let Err(e) = flush(&mut sender, &mut session).await {
            tracing::debug!(mount = mount.id(), error = %e, "Client went away");
            break;
        }

        let next = tokio::select! {
            result = receiver.next() => {
                let text = match result {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    // Pings are answered by axum; binary frames are not part of the protocol
                    Some(Ok(_)) => continue,
                };
                match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(message) => session.handle(message),
                    Err(e) => {
                        session.reject(format!("Invalid message: {e}"));
                        None
                    }
                }
            }
            Some(joined) = jobs.join_next(), if !jobs.is_empty() => {
                match joined {
                    Ok(completion) => session.complete(completion),
                    Err(e) => {
                        tracing::warn!(error = %e, "Transformation task failed");
                        session.abandon()
                    }
                }
            }
        };

        if let Some(job) = next {
            jobs.spawn_blocking(move || job.run());
        }
    }

    session.close();
    let _ = sender.close().await;
    tracing::info!(mount = mount.id(), edits = session.revision(), "Session closed");
}

async fn flush<Tx>(sender: &mut Tx, session: &mut Session) -> Result<(), Tx::Error>
where
    Tx: Sink<Message> + Unpin,
{
    for message in session.take_messages() {
        send(sender, &message).await?;
    }
    Ok(())
}

async fn send<Tx>(sender: &mut Tx, message: &ServerMessage) -> Result<(), Tx::Error>
where
    Tx: Sink<Message> + Unpin,
{
    match serde_json::to_string(message) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize session message");
            Ok(())
        }
    }
}
