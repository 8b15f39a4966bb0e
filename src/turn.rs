//! One turn: load context, assemble the prompt, decode while streaming,
//! persist the extended transcript.

use std::io::Write;

use crate::context::ContextStore;
use crate::engine::Engine;
use crate::error::Result;
use crate::prompt;
use crate::settings::Settings;

/// Upper bound on prompt plus generated tokens combined.
pub const MAX_SEQUENCE_TOKENS: usize = 2048;

/// Prefix recorded before the assistant's reply in the saved transcript.
pub const RESPONSE_PREFIX: &str = "Assistant: ";

/// Run one turn end to end. The transcript is saved only after the whole
/// generation succeeds; any failure leaves the file untouched, even though
/// part of the reply may already have reached the sink.
pub fn run_turn(
    engine: &mut dyn Engine,
    settings: &Settings,
    store: &ContextStore,
    user_turn: &str,
    sink: &mut dyn Write,
) -> Result<()> {
    let transcript = store.load()?;
    let mut prompt = prompt::assemble(&transcript, &settings.system_prompt, user_turn);
    let response = generate(engine, &prompt, sink)?;
    prompt.push_str(&response);
    store.save(&prompt)
}

/// Decode until the generator reports completion, writing each fragment to
/// the sink as it is produced. Returns the accumulated response with the
/// [`RESPONSE_PREFIX`] prepended; an empty generation yields the bare prefix.
fn generate(engine: &mut dyn Engine, prompt: &str, sink: &mut dyn Write) -> Result<String> {
    let mut generator = engine.open_generator(prompt, MAX_SEQUENCE_TOKENS)?;

    let mut response = String::new();
    let mut n_decoded = 0usize;
    while !generator.is_done() {
        generator.step()?;
        let token = generator.last_token();
        let fragment = generator.decode_token(token)?;
        sink.write_all(fragment.as_bytes())?;
        sink.flush()?;
        response.push_str(&fragment);
        n_decoded += 1;
    }
    log::debug!("decoded {n_decoded} tokens");

    response.insert_str(0, RESPONSE_PREFIX);
    Ok(response)
}
