/// Pending observer notifications accumulated by the engine.
///
/// Hosts drain these after every call and fan them out: a fresh state view
/// per player when `state` is set, one player list broadcast when `players`
/// is set, and each message as a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    pub state: bool,
    pub players: bool,
    pub messages: Vec<String>,
}

impl Notifications {
    pub fn is_empty(&self) -> bool {
        !self.state && !self.players && self.messages.is_empty()
    }

    pub(crate) fn mark_players(&mut self) {
        self.players = true;
    }

    pub(crate) fn mark_all(&mut self) {
        self.state = true;
        self.players = true;
    }

    pub(crate) fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }
}
