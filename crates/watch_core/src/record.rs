/// Server-issued cursor: "report homework updates since this point".
pub type Checkpoint = i64;

/// One assignment submission as reported by the review service.
///
/// `status` is kept as the raw code; mapping it onto [`crate::ReviewStatus`]
/// happens during verdict extraction so that an unknown code is reported
/// separately from a malformed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: String,
}

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Validated body of a review-status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResponse {
    /// Most recent submission first.
    pub homeworks: Vec<HomeworkRecord>,
    pub checkpoint: Checkpoint,
}

impl PollResponse {
    /// The only entry the bot reports on.
    pub fn newest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}
