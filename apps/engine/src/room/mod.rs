//! In-process room driver.
//!
//! A room owns one [`GameEngine`] inside a single tokio task and serialises
//! every join, leave, player action and settle through one command queue.
//! Outbound traffic is handed to the host as [`OutboundMessage`]s; the
//! transport itself lives outside this crate.

pub mod protocol;
pub mod registry;
pub mod scheduler;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::engine::EngineConfig;
use crate::engine::{GameEngine, SettleTicket};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
pub use protocol::{ClientMsg, OutboundMessage, ServerMsg};
use scheduler::TokioSettleScheduler;

/// Command delivered to a room task.
#[derive(Debug, Clone)]
pub enum RoomCommand {
    Join { name: String },
    Leave { name: String },
    /// A raw JSON action line from `actor`.
    Action { actor: String, line: String },
    Settle(SettleTicket),
}

/// Cheap handle for submitting commands to a running room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: String,
    cmd_tx: mpsc::UnboundedSender<RoomCommand>,
    token: CancellationToken,
}

impl RoomHandle {
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn join(&self, name: impl Into<String>) -> Result<(), AppError> {
        self.send(RoomCommand::Join { name: name.into() })
    }

    pub fn leave(&self, name: impl Into<String>) -> Result<(), AppError> {
        self.send(RoomCommand::Leave { name: name.into() })
    }

    pub fn action(&self, actor: impl Into<String>, line: impl Into<String>) -> Result<(), AppError> {
        self.send(RoomCommand::Action {
            actor: actor.into(),
            line: line.into(),
        })
    }

    /// Stop the room task and every pending settle timer.
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled() || self.cmd_tx.is_closed()
    }

    fn send(&self, cmd: RoomCommand) -> Result<(), AppError> {
        if self.token.is_cancelled() {
            return Err(AppError::internal(format!("Room '{}' is closed", self.room_id)));
        }
        self.cmd_tx
            .send(cmd)
            .map_err(|_| AppError::internal(format!("Room '{}' is closed", self.room_id)))
    }
}

/// Start a room task under `parent`. Must be called within a tokio runtime.
pub fn spawn_room(
    room_id: impl Into<String>,
    config: EngineConfig,
    parent: &CancellationToken,
) -> (RoomHandle, mpsc::UnboundedReceiver<OutboundMessage>) {
    let room_id = room_id.into();
    let token = parent.child_token();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<RoomCommand>();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();

    let scheduler = TokioSettleScheduler::new(cmd_tx.clone(), token.clone());
    let mut room = Room {
        room_id: room_id.clone(),
        engine: GameEngine::new(config, Box::new(scheduler)),
        out_tx,
    };

    let loop_token = token.clone();
    tokio::spawn(async move {
        info!(room_id = room.room_id.as_str(), "Room opened");
        loop {
            tokio::select! {
                _ = loop_token.cancelled() => break,
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => room.handle(cmd),
                    None => break,
                },
            }
        }
        room.engine.shutdown();
        info!(room_id = room.room_id.as_str(), "Room closed");
    });

    let handle = RoomHandle {
        room_id,
        cmd_tx,
        token,
    };
    (handle, out_rx)
}

struct Room {
    room_id: String,
    engine: GameEngine,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Room {
    fn handle(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { name } => {
                if let Err(err) = self.engine.join(&name) {
                    self.reject(&name, &err);
                }
            }
            RoomCommand::Leave { name } => {
                if let Err(err) = self.engine.leave(&name) {
                    debug!(
                        room_id = self.room_id.as_str(),
                        player = name.as_str(),
                        error = %err,
                        "Leave ignored"
                    );
                }
            }
            RoomCommand::Action { actor, line } => self.dispatch(&actor, &line),
            RoomCommand::Settle(ticket) => {
                self.engine.settle(ticket);
            }
        }
        self.flush();
    }

    fn dispatch(&mut self, actor: &str, line: &str) {
        let msg = match serde_json::from_str::<ClientMsg>(line) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(
                    room_id = self.room_id.as_str(),
                    player = actor,
                    error = %err,
                    "Malformed action"
                );
                self.send_to(
                    actor,
                    ServerMsg::Error {
                        code: ErrorCode::BadRequest,
                        msg: format!("Malformed action: {err}"),
                    },
                );
                return;
            }
        };
        let result = match &msg {
            ClientMsg::StartGame => self.engine.start(),
            ClientMsg::Announce { announcement } => {
                self.engine.announce(actor, announcement).map(|_| ())
            }
            ClientMsg::PlayCard(descriptor) => self.engine.play_card(actor, descriptor).map(|_| ()),
            ClientMsg::ChooseTrump { color } => self.engine.choose_trump(actor, color).map(|_| ()),
        };
        if let Err(err) = result {
            self.reject(actor, &err);
        }
    }

    fn reject(&self, name: &str, err: &DomainError) {
        debug!(room_id = self.room_id.as_str(), player = name, error = %err, "Action rejected");
        self.send_to(
            name,
            ServerMsg::Error {
                code: ErrorCode::from(err),
                msg: err.to_string(),
            },
        );
    }

    /// Fan out whatever the engine recorded since the last flush.
    fn flush(&mut self) {
        let notes = self.engine.take_notifications();
        for msg in notes.messages {
            self.broadcast(ServerMsg::Message { msg });
        }
        if notes.state {
            let names: Vec<String> = self
                .engine
                .roster()
                .iter()
                .filter(|(_, p)| p.active)
                .map(|(_, p)| p.name.clone())
                .collect();
            for name in names {
                let view = self.engine.state_view(&name);
                self.send_to(&name, ServerMsg::State(view));
            }
        }
        if notes.players {
            self.broadcast(ServerMsg::Player(self.engine.player_list_view()));
        }
    }

    fn send_to(&self, name: &str, msg: ServerMsg) {
        let _ = self.out_tx.send(OutboundMessage::ToPlayer {
            name: name.to_string(),
            line: msg.to_line(),
        });
    }

    fn broadcast(&self, msg: ServerMsg) {
        let _ = self.out_tx.send(OutboundMessage::Broadcast {
            line: msg.to_line(),
        });
    }
}
