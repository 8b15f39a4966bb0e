//! Narrow interface onto the generative inference engine.
//!
//! The engine is modelled as the smallest capability set the turn driver
//! needs: open one generator per prompt, then repeatedly step it, read the
//! token it appended, and decode that token to a text fragment. Tests
//! substitute a scripted implementation; production uses [`crate::llama`].

use thiserror::Error;

/// Token identifier as the engine reports it.
pub type TokenId = i32;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unable to open model: {0}")]
    ModelOpen(#[source] anyhow::Error),

    #[error("tokenization failed: {0}")]
    Tokenize(#[source] anyhow::Error),

    #[error("decode step failed: {0}")]
    Decode(#[source] anyhow::Error),
}

/// One in-progress decode. Owned by the turn driver for the duration of a
/// single turn and dropped on any exit path.
pub trait Generator {
    /// True once an end-of-generation token was produced or the sequence
    /// limit was reached.
    fn is_done(&self) -> bool;

    /// Advance by one step: compute logits for the current position and
    /// append the next token (greedy selection).
    fn step(&mut self) -> Result<(), EngineError>;

    /// The token appended by the most recent [`step`](Generator::step).
    fn last_token(&self) -> TokenId;

    /// Decode a single token into its text fragment. An end-of-generation
    /// token decodes to the empty string.
    fn decode_token(&mut self, token: TokenId) -> Result<String, EngineError>;
}

pub trait Engine {
    /// Tokenize `prompt` and prepare a generator bound to it. Fails when
    /// the prompt cannot be tokenized or already exceeds `max_tokens`, the
    /// limit on prompt plus generated tokens combined.
    fn open_generator<'a>(
        &'a mut self,
        prompt: &str,
        max_tokens: usize,
    ) -> Result<Box<dyn Generator + 'a>, EngineError>;
}
