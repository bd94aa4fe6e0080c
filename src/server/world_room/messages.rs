use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::WorldSessionActor;
use crate::game::types::Player;
use crate::game::validate::MoveRequest;

/// Commands a client may send over the world WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientCommand {
    /// Walk to a target position (pathfinding, trajectory synthesis).
    Go(MoveRequest),
    /// Instant relocation to a random cell of the named zone.
    Teleport { zone: String },
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientCommand {
    pub command: ClientCommand,
    pub session_id: Uuid,
}

/// Session registration, sent by the session actor when its
/// connection opens.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub session_id: Uuid,
    pub name: String,
    pub address: String,
    pub addr: Addr<WorldSessionActor>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub session_id: Uuid,
}

/// Blacklist membership check, run before the WebSocket upgrade.
#[derive(Message)]
#[rtype(result = "bool")]
pub struct IsBlacklisted {
    pub address: String,
}

/// Moderation command: blacklist an address and disconnect every
/// session connected from it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Ban {
    pub address: String,
}

/// Broadcast snapshot of the world state.
#[derive(Message, Clone, Serialize, Debug)]
#[rtype(result = "()")]
pub struct WorldStateUpdate {
    pub players: Vec<Player>,
}

/// Pre-serialized frame delivered to a single session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientEvent(pub String);

/// Instructs a session actor to deliver a final frame and close.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Kick(pub String);
