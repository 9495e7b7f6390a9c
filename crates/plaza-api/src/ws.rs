//! Realtime chat relay over WebSocket.
//!
//! Protocol: the client sends raw text frames; for each inbound frame the
//! server sends back one text frame per reply fragment resolved by the
//! fallback orchestrator. Turns are independent: two quick messages may
//! answer out of order, and a reply to a closed session is dropped by the
//! dead actor address.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, Handler, Message as ActixMessage, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use dashmap::DashSet;
use plaza_chat::FallbackOrchestrator;
use uuid::Uuid;

use crate::state::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Set of currently connected session ids. Presence is derived from the
/// set, not a single flag, so overlapping connects/disconnects stay
/// accurate.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<DashSet<Uuid>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: Uuid) {
        self.inner.insert(id);
    }

    pub fn deregister(&self, id: Uuid) {
        self.inner.remove(&id);
    }

    pub fn any_connected(&self) -> bool {
        !self.inner.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.inner.len()
    }
}

// Reply fragment routed back to the originating session.
#[derive(ActixMessage)]
#[rtype(result = "()")]
struct Reply(String);

/// One realtime connection. The session id exists only for presence
/// tracking and log correlation; nothing about a turn persists.
pub struct ChatSession {
    id: Uuid,
    hb: Instant,
    registry: SessionRegistry,
    orchestrator: Arc<FallbackOrchestrator>,
}

impl ChatSession {
    pub fn new(registry: SessionRegistry, orchestrator: Arc<FallbackOrchestrator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            hb: Instant::now(),
            registry,
            orchestrator,
        }
    }

    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                tracing::warn!(session = %act.id, "chat session heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for ChatSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.registry.register(self.id);
        tracing::info!(
            session = %self.id,
            active = self.registry.active_count(),
            "chat session connected"
        );
        self.heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.deregister(self.id);
        tracing::info!(
            session = %self.id,
            active = self.registry.active_count(),
            "chat session disconnected"
        );
    }
}

impl Handler<Reply> for ChatSession {
    type Result = ();

    fn handle(&mut self, msg: Reply, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChatSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                // Each turn runs detached: a slow backend must not block
                // this session's heartbeat or later messages. In-flight
                // turns are not cancelled by disconnect; do_send to a
                // stopped actor is a no-op.
                let orchestrator = self.orchestrator.clone();
                let session = self.id;
                let addr = ctx.address();
                actix::spawn(async move {
                    let turn = orchestrator.handle(session, &text).await;
                    for reply in turn.replies {
                        addr.do_send(Reply(reply));
                    }
                });
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!(session = %self.id, "binary frames not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}

pub async fn chat_route(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ChatSession::new(state.sessions.clone(), state.chat.clone()),
        &req,
        stream,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = SessionRegistry::new();
        assert!(!registry.any_connected());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_registry_tracks_each_session() {
        let registry = SessionRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.register(a);
        registry.register(b);
        assert!(registry.any_connected());
        assert_eq!(registry.active_count(), 2);

        // One client leaving must not flip presence off while another
        // is still connected (the failure mode of a single flag).
        registry.deregister(a);
        assert!(registry.any_connected());

        registry.deregister(b);
        assert!(!registry.any_connected());
    }

    #[test]
    fn test_deregister_unknown_session_is_harmless() {
        let registry = SessionRegistry::new();
        registry.deregister(Uuid::new_v4());
        assert_eq!(registry.active_count(), 0);
    }
}
