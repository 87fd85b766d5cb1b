#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver a new verdict. State already records it.
    SendVerdict { text: String },
    /// Poll succeeded but there is nothing to report.
    Skipped { reason: SkipReason },
    /// Iteration failed; the loop carries on.
    ReportFailure { error: crate::CycleError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoHomeworks,
    DuplicateVerdict,
}
