use crate::Checkpoint;

/// What the bot remembers between polls. In-memory only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BotState {
    last_checkpoint: Checkpoint,
    last_verdict: Option<String>,
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_checkpoint(&self) -> Checkpoint {
        self.last_checkpoint
    }

    pub fn last_verdict(&self) -> Option<&str> {
        self.last_verdict.as_deref()
    }

    pub fn should_notify(&self, candidate: &str) -> bool {
        self.last_verdict.as_deref() != Some(candidate)
    }

    /// Records a verdict that is about to be sent.
    ///
    /// Only call after [`Self::should_notify`] accepted the same message. The
    /// checkpoint becomes whatever the response reported, even if it is older.
    pub fn commit(&mut self, message: String, checkpoint: Checkpoint) {
        self.last_verdict = Some(message);
        self.last_checkpoint = checkpoint;
    }
}
