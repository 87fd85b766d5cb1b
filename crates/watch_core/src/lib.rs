//! Watch core: response validation, verdict derivation and the pure poll state machine.
mod effect;
mod error;
mod msg;
mod record;
mod state;
mod update;
mod validate;
mod verdict;

pub use effect::{Effect, SkipReason};
pub use error::{CycleError, ErrorKind};
pub use msg::Msg;
pub use record::{Checkpoint, HomeworkRecord, PollResponse};
pub use state::BotState;
pub use update::update;
pub use validate::{validate_response, FormatError, JsonKind};
pub use verdict::{extract_verdict, ReviewStatus, UnknownVerdictError};
