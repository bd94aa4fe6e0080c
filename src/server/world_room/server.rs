use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix::prelude::*;
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::movement::WALKABLE_TILES;
use crate::config::world::MAX_CLIENTS;
use crate::game::error::MoveError;
use crate::game::map::TileMap;
use crate::game::pathfind::{GridSolver, PathOracle};
use crate::game::state::{MoveOutcome, WorldState};
use crate::game::teleport::teleport;
use crate::game::types::Cell;
use crate::game::validate::{MoveRequest, validate};
use crate::server::ws_event::{ws_banned, ws_event, ws_illegal_move};

use super::messages::{
    Ban, ClientCommand, ClientEvent, Connect, Disconnect, IsBlacklisted, Kick,
    ProcessClientCommand, WorldStateUpdate,
};
use super::session::WorldSessionActor;

struct SessionHandle {
    addr: Addr<WorldSessionActor>,
    address: String,
}

/// The world room actor. Owns the authoritative `WorldState`, the
/// session table, the blacklist and the pathfinding solver; processes
/// one inbound message at a time, so state never sees concurrent
/// mutation.
///
/// Pathfinding resolution is deferred: the search runs as an actor
/// future and its continuation re-enters the mailbox through
/// `WorldState::resolve_move`, which discards superseded results.
pub struct WorldRoom {
    map: Arc<TileMap>,
    solver: Arc<dyn PathOracle>,
    state: WorldState,
    sessions: HashMap<Uuid, SessionHandle>,
    blacklist: HashSet<String>,
}

impl WorldRoom {
    pub fn new(map: Arc<TileMap>) -> Self {
        let solver = Arc::new(GridSolver::new(Arc::clone(&map), &WALKABLE_TILES));
        let state = WorldState::new(Arc::clone(&map));
        Self {
            map,
            solver,
            state,
            sessions: HashMap::new(),
            blacklist: HashSet::new(),
        }
    }

    fn broadcast_state(&self) {
        let players = self.state.players();
        debug!("[WorldRoom] Broadcast state: {} players", players.len());
        for handle in self.sessions.values() {
            handle.addr.do_send(WorldStateUpdate { players: players.clone() });
        }
    }

    /// Deliver a rejection to the originating session only.
    fn reject(&self, session_id: Uuid, err: &MoveError) {
        if let Some(handle) = self.sessions.get(&session_id) {
            handle.addr.do_send(ClientEvent(ws_illegal_move(err)));
        }
    }

    fn handle_go(&mut self, session_id: Uuid, request: &MoveRequest, ctx: &mut Context<Self>) {
        let Some(authoritative) = self.state.position(&session_id) else {
            return;
        };

        let validated = match validate(request, authoritative, &self.map) {
            Ok(v) => v,
            Err(err) => {
                warn!("[WorldRoom] Rejected move for {}: {}", session_id, err);
                self.reject(session_id, &err);
                return;
            }
        };

        // A new request supersedes any in-flight path for this player.
        let Some(seq) = self.state.begin_move(&session_id) else {
            return;
        };

        let solver = Arc::clone(&self.solver);
        let origin = validated.origin_cell;
        let target = validated.target_cell;
        let task = async move { solver.find_path(origin, target) }
            .into_actor(self)
            .map(move |raw, act, _ctx| {
                act.resolve_move(session_id, seq, target, raw);
            });
        ctx.spawn(task);
    }

    /// Continuation of a deferred `find_path` call.
    fn resolve_move(
        &mut self,
        session_id: Uuid,
        seq: u64,
        target: Cell,
        raw: Option<Vec<Cell>>,
    ) {
        match self.state.resolve_move(&session_id, seq, raw) {
            MoveOutcome::Applied => self.broadcast_state(),
            MoveOutcome::Stale => {
                debug!(
                    "[WorldRoom] Discarding stale path resolution for {} (seq {})",
                    session_id, seq
                );
            }
            MoveOutcome::Rejected(MoveError::NoPath) => {
                warn!("[WorldRoom] No path to {:?} for {}", target, session_id);
                self.reject(session_id, &MoveError::NoPath);
            }
            MoveOutcome::Rejected(err) => {
                // InvalidDelta here means the solver broke its
                // axis-aligned adjacency contract; reject the move
                // rather than publish a corrupted trajectory.
                error!("[WorldRoom] Path synthesis fault for {}: {}", session_id, err);
                self.reject(session_id, &err);
            }
        }
    }

    fn handle_teleport(&mut self, session_id: Uuid, zone_label: &str) {
        let outcome = match teleport(&self.map, zone_label) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("[WorldRoom] Rejected teleport for {}: {}", session_id, err);
                self.reject(session_id, &err);
                return;
            }
        };

        info!(
            "[WorldRoom] Teleport {} to {:?} ({:?})",
            session_id, outcome.position, outcome.zone
        );
        self.state.apply_teleport(&session_id, outcome);
        self.broadcast_state();
    }
}

impl Actor for WorldRoom {
    type Context = Context<Self>;
}

impl Handler<IsBlacklisted> for WorldRoom {
    type Result = bool;

    fn handle(&mut self, msg: IsBlacklisted, _: &mut Context<Self>) -> Self::Result {
        self.blacklist.contains(&msg.address)
    }
}

impl Handler<Connect> for WorldRoom {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) -> Self::Result {
        if self.sessions.len() >= MAX_CLIENTS {
            warn!("[WorldRoom] Room full, refusing {}", msg.session_id);
            msg.addr.do_send(Kick(ws_event("roomFull", serde_json::json!({}))));
            return;
        }

        let position = self.state.spawn_player(msg.session_id, msg.name.clone());
        info!(
            "[WorldRoom] Player {} ({}) joined at {:?}",
            msg.session_id, msg.name, position
        );
        self.sessions.insert(
            msg.session_id,
            SessionHandle { addr: msg.addr, address: msg.address },
        );
        self.broadcast_state();
    }
}

impl Handler<Disconnect> for WorldRoom {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) -> Self::Result {
        self.sessions.remove(&msg.session_id);
        if self.state.remove_player(&msg.session_id).is_some() {
            info!("[WorldRoom] Player {} left", msg.session_id);
            self.broadcast_state();
        }
    }
}

impl Handler<Ban> for WorldRoom {
    type Result = ();

    fn handle(&mut self, msg: Ban, _: &mut Context<Self>) -> Self::Result {
        self.blacklist.insert(msg.address.clone());
        let banned: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|(_, handle)| handle.address == msg.address)
            .map(|(id, _)| *id)
            .collect();
        for session_id in banned {
            if let Some(handle) = self.sessions.remove(&session_id) {
                warn!("[WorldRoom] Banned {} ({})", session_id, msg.address);
                self.state.remove_player(&session_id);
                handle.addr.do_send(Kick(ws_banned()));
            }
        }
        self.broadcast_state();
    }
}

impl Handler<ProcessClientCommand> for WorldRoom {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientCommand, ctx: &mut Context<Self>) -> Self::Result {
        // Moderation gate: commands from blacklisted addresses are
        // dropped entirely.
        if let Some(handle) = self.sessions.get(&msg.session_id) {
            if self.blacklist.contains(&handle.address) {
                warn!("[WorldRoom] Dropping command from banned {}", msg.session_id);
                return;
            }
        } else {
            return;
        }

        match msg.command {
            ClientCommand::Go(request) => self.handle_go(msg.session_id, &request, ctx),
            ClientCommand::Teleport { zone } => self.handle_teleport(msg.session_id, &zone),
        }
    }
}
