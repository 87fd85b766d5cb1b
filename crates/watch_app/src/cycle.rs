use std::collections::VecDeque;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use watch_core::{update, BotState, CycleError, Effect, Msg, SkipReason};
use watch_engine::{FailureKind, FetchError, Notifier, Poller};
use watch_logging::{watch_debug, watch_error, watch_info, watch_warn};

pub const GREETING: &str = "Бот запущен и следит за статусом домашней работы.";

/// Poll, validate, deduplicate, notify; then sleep and repeat.
pub struct PollCycle<P, N> {
    poller: P,
    notifier: N,
    target: String,
    retry_period: Duration,
}

impl<P: Poller, N: Notifier> PollCycle<P, N> {
    pub fn new(poller: P, notifier: N, target: impl Into<String>, retry_period: Duration) -> Self {
        Self {
            poller,
            notifier,
            target: target.into(),
            retry_period,
        }
    }

    /// Sends the optional startup message. Failure is logged only.
    pub async fn greet(&self) {
        match self.notifier.send(&self.target, GREETING).await {
            Ok(()) => watch_info!("startup greeting sent"),
            Err(err) => watch_warn!("startup greeting not delivered: {}", err),
        }
    }

    /// Runs iterations until `cancel` fires and returns the final state.
    ///
    /// Cancellation is observed between iterations and during the sleep; an
    /// iteration in flight always completes.
    pub async fn run(&self, cancel: CancellationToken) -> BotState {
        let mut state = BotState::new();
        let mut iteration: u64 = 0;

        while !cancel.is_cancelled() {
            iteration += 1;
            watch_logging::set_iteration(iteration);
            state = self.run_iteration(state).await;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        watch_info!(
            "poll loop stopped at checkpoint {}",
            state.last_checkpoint()
        );
        state
    }

    /// One poll. Never fails: every error is reported and the state carried on.
    pub async fn run_iteration(&self, state: BotState) -> BotState {
        let checkpoint = state.last_checkpoint();
        let msg = match self.poller.fetch(checkpoint).await {
            Ok(output) => Msg::PayloadReceived(output.payload),
            Err(err) => Msg::PollFailed(cycle_error_from_fetch(err)),
        };

        let (state, effects) = update(state, msg);
        self.execute(state, effects).await
    }

    async fn execute(&self, mut state: BotState, effects: Vec<Effect>) -> BotState {
        let mut pending: VecDeque<Effect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::SendVerdict { text } => {
                    watch_info!("new verdict: {}", text);
                    if let Err(err) = self.notifier.send(&self.target, &text).await {
                        let failure = CycleError::Notifier {
                            message: err.to_string(),
                        };
                        let (next, follow_up) = update(state, Msg::NotifyFailed(failure));
                        state = next;
                        pending.extend(follow_up);
                    }
                }
                Effect::Skipped {
                    reason: SkipReason::NoHomeworks,
                } => watch_debug!("no homework updates"),
                Effect::Skipped {
                    reason: SkipReason::DuplicateVerdict,
                } => watch_debug!("newest verdict matches the last one sent"),
                Effect::ReportFailure { error } => report_failure(&error, state.last_checkpoint()),
            }
        }
        state
    }
}

fn report_failure(error: &CycleError, checkpoint: i64) {
    let kind = error.kind();
    if kind.is_transient() {
        watch_warn!("{:?} failure, retrying from {}: {}", kind, checkpoint, error);
    } else {
        watch_error!("{:?} failure, retrying from {}: {}", kind, checkpoint, error);
    }
}

fn cycle_error_from_fetch(err: FetchError) -> CycleError {
    if let FailureKind::HttpStatus(status) = err.kind {
        return CycleError::HttpStatus { status };
    }
    if err.kind.is_transport() {
        CycleError::Transport {
            message: err.to_string(),
        }
    } else {
        CycleError::Decode {
            message: err.message,
        }
    }
}
