//! Single-turn tutor chat about one card

use cardify_core::prompt;

use super::ai::{AiError, GenerativeModel};

pub const NOT_CONFIGURED_REPLY: &str =
    "AI chat is not available because the Gemini API key is not configured.";

pub const APOLOGY_REPLY: &str =
    "Sorry, something went wrong while talking to the AI. Please try again in a bit.";

/// Ask the tutor about a card. Never fails; problems turn into one of the
/// static replies above.
pub async fn chat<M: GenerativeModel>(
    model: Option<&M>,
    question: &str,
    answer: &str,
    user_message: &str,
) -> String {
    let Some(model) = model else {
        tracing::warn!("tutor chat requested without an AI credential");
        return NOT_CONFIGURED_REPLY.to_string();
    };

    match ask(model, question, answer, user_message).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "tutor chat failed");
            APOLOGY_REPLY.to_string()
        }
    }
}

async fn ask<M: GenerativeModel>(
    model: &M,
    question: &str,
    answer: &str,
    user_message: &str,
) -> Result<String, AiError> {
    let reply = model
        .generate(&prompt::tutor_prompt(question, answer, user_message.trim()))
        .await?;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(reply.to_string())
}
