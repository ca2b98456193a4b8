use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::RoomCommand;
use crate::engine::{SettleScheduler, SettleTicket};

/// Delivers settle tickets back into the room's command queue after a delay.
///
/// Each timer observes a child of the room token, so closing the room stops
/// every pending timer. Must be used from within a tokio runtime.
pub struct TokioSettleScheduler {
    cmd_tx: UnboundedSender<RoomCommand>,
    room_token: CancellationToken,
    current: Option<(SettleTicket, CancellationToken)>,
}

impl TokioSettleScheduler {
    pub fn new(cmd_tx: UnboundedSender<RoomCommand>, room_token: CancellationToken) -> Self {
        Self {
            cmd_tx,
            room_token,
            current: None,
        }
    }
}

impl SettleScheduler for TokioSettleScheduler {
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration) {
        if let Some((_, previous)) = self.current.take() {
            previous.cancel();
        }
        let token = self.room_token.child_token();
        let timer_token = token.clone();
        let tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(RoomCommand::Settle(ticket));
                }
                _ = timer_token.cancelled() => {
                    debug!(generation = ticket.generation, "Settle timer cancelled");
                }
            }
        });
        self.current = Some((ticket, token));
    }

    fn cancel(&mut self, ticket: SettleTicket) {
        if let Some((current, token)) = self.current.take() {
            if current == ticket {
                token.cancel();
            } else {
                self.current = Some((current, token));
            }
        }
    }
}
