//! Settle continuation seam.
//!
//! After a trick resolves the engine asks its scheduler to call
//! [`GameEngine::settle`](super::GameEngine::settle) later. Tickets carry the
//! match number and a generation counter so that late or cancelled
//! continuations can be recognised and ignored.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleTicket {
    pub match_no: u64,
    pub generation: u64,
}

/// Arranges for a settle ticket to be delivered back to the engine.
pub trait SettleScheduler: Send {
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration);
    fn cancel(&mut self, ticket: SettleTicket);
}

/// Scheduler that only records tickets; the caller delivers them.
///
/// Clones share the same queue, so a test or simulator can keep a handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Arc<Mutex<Vec<SettleTicket>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<SettleTicket> {
        self.pending.lock().clone()
    }

    /// Remove and return the oldest scheduled ticket.
    pub fn take_next(&self) -> Option<SettleTicket> {
        let mut pending = self.pending.lock();
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }
}

impl SettleScheduler for ManualScheduler {
    fn schedule(&mut self, ticket: SettleTicket, _delay: Duration) {
        self.pending.lock().push(ticket);
    }

    fn cancel(&mut self, ticket: SettleTicket) {
        self.pending.lock().retain(|t| *t != ticket);
    }
}
