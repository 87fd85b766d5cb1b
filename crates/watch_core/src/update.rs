use serde_json::Value;

use crate::{
    extract_verdict, validate_response, BotState, Checkpoint, CycleError, Effect, Msg, SkipReason,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BotState, msg: Msg) -> (BotState, Vec<Effect>) {
    let effects = match msg {
        Msg::PayloadReceived(payload) => match decide(&state, &payload) {
            Ok(Decision::Notify { text, checkpoint }) => {
                // Committed before delivery: a failed send is not retried.
                state.commit(text.clone(), checkpoint);
                vec![Effect::SendVerdict { text }]
            }
            Ok(Decision::Skip(reason)) => vec![Effect::Skipped { reason }],
            Err(error) => vec![Effect::ReportFailure { error }],
        },
        Msg::PollFailed(error) | Msg::NotifyFailed(error) => {
            vec![Effect::ReportFailure { error }]
        }
    };

    (state, effects)
}

enum Decision {
    Notify { text: String, checkpoint: Checkpoint },
    Skip(SkipReason),
}

fn decide(state: &BotState, payload: &Value) -> Result<Decision, CycleError> {
    let response = validate_response(payload)?;
    // The checkpoint stays put when nothing arrived, so an update landing between
    // two polls is not skipped.
    let Some(newest) = response.newest() else {
        return Ok(Decision::Skip(SkipReason::NoHomeworks));
    };
    let text = extract_verdict(newest)?;
    if !state.should_notify(&text) {
        return Ok(Decision::Skip(SkipReason::DuplicateVerdict));
    }
    Ok(Decision::Notify {
        text,
        checkpoint: response.checkpoint,
    })
}
