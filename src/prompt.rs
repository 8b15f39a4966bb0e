//! Prompt template for the Phi-style chat models this tool targets.
//!
//! The four delimiter strings are part of the wire contract with the model
//! and must stay byte-exact. They are deliberately not exposed through the
//! settings document; only the system prompt is user-configurable.

pub const SYSTEM_TAG: &str = "<|system|>";
pub const USER_TAG: &str = "<|user|>";
pub const ASSISTANT_TAG: &str = "<|assistant|>";
pub const END_TAG: &str = "<|end|>";

/// Build the string handed to the tokenizer for one turn.
///
/// An empty or whitespace-only transcript starts a fresh conversation with
/// the system segment; otherwise the new user segment is appended directly
/// to the transcript, which already ends with the prior assistant output.
/// No trailing end tag follows `<|assistant|>` — that is where generation
/// begins. The user turn is passed through unescaped, so delimiter-like
/// substrings inside the question will confuse the template on later turns.
pub fn assemble(transcript: &str, system_prompt: &str, user_turn: &str) -> String {
    if transcript.trim().is_empty() {
        format!(
            "{SYSTEM_TAG}{system_prompt}{END_TAG}{}",
            user_segment(user_turn)
        )
    } else {
        format!("{transcript}{}", user_segment(user_turn))
    }
}

fn user_segment(user_turn: &str) -> String {
    format!("{USER_TAG}{user_turn}{END_TAG}{ASSISTANT_TAG}")
}
