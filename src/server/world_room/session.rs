use std::borrow::Cow;

use actix::{Actor, ActorContext, Addr, AsyncContext, Handler, StreamHandler};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, error, web};
use actix_web_actors::ws;
use uuid::Uuid;

use crate::config::world::MAX_USERNAME_LENGTH;
use crate::server::state::AppState;
use crate::server::world_room::messages::{
    ClientCommand, ClientEvent, Connect, Disconnect, IsBlacklisted, Kick,
    ProcessClientCommand, WorldStateUpdate,
};
use crate::server::world_room::server::WorldRoom;
use crate::server::ws_event::http_error_response;

/// WebSocket actor for one connected client. Parses inbound commands
/// and forwards them to the world room; delivers state broadcasts and
/// unicast rejection events back to the client.
pub struct WorldSessionActor {
    pub session_id: Uuid,
    pub name: String,
    pub address: String,
    pub room: Addr<WorldRoom>,
}

impl Actor for WorldSessionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.room.do_send(Connect {
            session_id: self.session_id,
            name: self.name.clone(),
            address: self.address.clone(),
            addr: ctx.address(),
        });
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        self.room.do_send(Disconnect { session_id: self.session_id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WorldSessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let command: ClientCommand = match serde_json::from_str(&text) {
                    Ok(c) => c,
                    Err(_) => {
                        ctx.text(r#"{"error":"Invalid command"}"#);
                        return;
                    }
                };
                self.room.do_send(ProcessClientCommand {
                    command,
                    session_id: self.session_id,
                });
            }
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<WorldStateUpdate> for WorldSessionActor {
    type Result = ();

    fn handle(&mut self, msg: WorldStateUpdate, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(r#"{"error":"Failed to serialize world state"}"#),
        }
    }
}

impl Handler<ClientEvent> for WorldSessionActor {
    type Result = ();

    fn handle(&mut self, msg: ClientEvent, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0);
    }
}

impl Handler<Kick> for WorldSessionActor {
    type Result = ();

    fn handle(&mut self, msg: Kick, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0);
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Disconnected by moderation".into()),
        }));
        ctx.stop();
    }
}

pub async fn ws_world(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let address = req
        .peer_addr()
        .map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // Blacklisted addresses are refused before the upgrade.
    let banned = data
        .world_room
        .send(IsBlacklisted { address: address.clone() })
        .await
        .map_err(error::ErrorInternalServerError)?;
    if banned {
        return Ok(http_error_response(
            "BANNED",
            "This address is blacklisted.",
            StatusCode::FORBIDDEN,
        ));
    }

    let name = parse_name(req.query_string());

    ws::start(
        WorldSessionActor {
            session_id: Uuid::new_v4(),
            name,
            address,
            room: data.world_room.clone(),
        },
        &req,
        stream,
    )
}

/// Extract, percent-decode and truncate the `name` query parameter.
fn parse_name(query: &str) -> String {
    let mut name = String::new();
    for kv in query.split('&') {
        let mut split = kv.split('=');
        if let (Some("name"), Some(value)) = (split.next(), split.next()) {
            name = urlencoding::decode(value)
                .unwrap_or_else(|_| Cow::Borrowed(""))
                .into_owned();
        }
    }
    if name.is_empty() {
        name = "anonymous".to_string();
    }
    name.chars().take(MAX_USERNAME_LENGTH).collect()
}
