//! Watch engine: HTTP polling of the review service and notification delivery.
mod notify;
mod poll;
mod types;

pub use notify::{NotifyError, NotifySettings, Notifier, TelegramNotifier, DEFAULT_TELEGRAM_API};
pub use poll::{PollSettings, Poller, ReqwestPoller, DEFAULT_ENDPOINT};
pub use types::{FailureKind, FetchError, PollOutput};
