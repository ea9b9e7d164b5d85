use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::push::protocol::PushMessage;
use crate::push::server::UpdateHub;

/// GET /api/updates
///
/// Upgrades the HTTP connection to a WebSocket and streams full-collection
/// snapshots to the client. The channel is read-only and unauthenticated;
/// late subscribers receive no history, only updates published after they
/// connect (initial state comes from the REST snapshot fetch).
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    hub: web::Data<Arc<UpdateHub>>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let (subscriber_id, rx) = hub.subscribe().await;
    tracing::debug!("push subscriber {subscriber_id} connected");

    let hub = hub.get_ref().clone();
    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        subscriber_id,
        hub,
    ));

    Ok(response)
}

/// Drives one subscriber session: forwards hub messages to the socket,
/// answers pings, and unsubscribes on disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<PushMessage>,
    subscriber_id: Uuid,
    hub: Arc<UpdateHub>,
) {
    loop {
        tokio::select! {
            // Incoming frame from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    // The update channel is push-only; other frames are ignored.
                    _ => {}
                }
            }
            // Outgoing snapshot from the hub to this client.
            Some(push) = rx.recv() => {
                let json = match serde_json::to_string(&push) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    hub.unsubscribe(subscriber_id).await;
    tracing::debug!("push subscriber {subscriber_id} disconnected");
    let _ = session.close(None).await;
}
