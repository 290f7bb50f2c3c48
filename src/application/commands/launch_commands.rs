// src/application/commands/launch_commands.rs

use crate::application::{error_handling::ToErrorResponse, state::AppState};
use crate::domain::ReviewPromptDecision;

pub fn request_review_prompt_if_eligible(state: &AppState) -> Result<ReviewPromptDecision, String> {
    state
        .launch_service
        .request_review_prompt_if_eligible()
        .to_error_response()
}

pub fn record_review_response(state: &AppState, accepted: bool) -> Result<(), String> {
    state
        .launch_service
        .record_review_response(accepted)
        .to_error_response()
}
