#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Poller decoded a response body; not yet validated.
    PayloadReceived(serde_json::Value),
    /// Poller failed before a payload was available.
    PollFailed(crate::CycleError),
    /// Notification channel failed to deliver an already committed verdict.
    NotifyFailed(crate::CycleError),
}
