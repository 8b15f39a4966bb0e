//! llama.cpp-backed inference engine.

use std::num::NonZeroU32;
use std::path::Path;

use anyhow::anyhow;
use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::context::LlamaContext;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::token::data_array::LlamaTokenDataArray;
use llama_cpp_2::token::LlamaToken;

use crate::engine::{Engine, EngineError, Generator, TokenId};

pub struct LlamaEngine {
    backend: LlamaBackend,
    model: LlamaModel,
}

impl LlamaEngine {
    /// Initialize the backend and load the model. Heavyweight; done once
    /// per invocation.
    pub fn open(model_path: &Path) -> Result<Self, EngineError> {
        let backend = LlamaBackend::init().map_err(|e| EngineError::ModelOpen(e.into()))?;
        let model_params = LlamaModelParams::default();
        let model = LlamaModel::load_from_file(&backend, model_path, &model_params)
            .map_err(|e| EngineError::ModelOpen(e.into()))?;
        log::info!("loaded model from {}", model_path.display());
        Ok(Self { backend, model })
    }
}

impl Engine for LlamaEngine {
    fn open_generator<'a>(
        &'a mut self,
        prompt: &str,
        max_tokens: usize,
    ) -> Result<Box<dyn Generator + 'a>, EngineError> {
        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Never)
            .map_err(|e| EngineError::Tokenize(e.into()))?;
        if tokens.is_empty() {
            return Err(EngineError::Tokenize(anyhow!("prompt tokenized to nothing")));
        }
        if tokens.len() >= max_tokens {
            return Err(EngineError::Tokenize(anyhow!(
                "prompt holds {} tokens, sequence limit is {max_tokens}",
                tokens.len()
            )));
        }
        log::debug!("prompt tokenized to {} tokens", tokens.len());

        let ctx_params =
            LlamaContextParams::default().with_n_ctx(NonZeroU32::new(max_tokens as u32));
        let mut ctx = self
            .model
            .new_context(&self.backend, ctx_params)
            .map_err(|e| EngineError::ModelOpen(e.into()))?;

        // llama_decode outputs logits only for the last token of the prompt.
        let mut batch = LlamaBatch::new(max_tokens, 1);
        let last_index = tokens.len() - 1;
        for (i, token) in tokens.into_iter().enumerate() {
            batch
                .add(token, i as i32, &[0], i == last_index)
                .map_err(|e| EngineError::Decode(e.into()))?;
        }
        ctx.decode(&mut batch)
            .map_err(|e| EngineError::Decode(e.into()))?;

        let n_cur = batch.n_tokens();
        Ok(Box::new(LlamaGenerator {
            ctx,
            batch,
            decoder: encoding_rs::UTF_8.new_decoder(),
            n_cur,
            max_tokens: max_tokens as i32,
            last: 0,
            done: false,
        }))
    }
}

struct LlamaGenerator<'a> {
    ctx: LlamaContext<'a>,
    batch: LlamaBatch,
    /// Incremental UTF-8 decoder so multibyte glyphs split across tokens
    /// carry over between fragments.
    decoder: encoding_rs::Decoder,
    n_cur: i32,
    max_tokens: i32,
    last: TokenId,
    done: bool,
}

impl Generator for LlamaGenerator<'_> {
    fn is_done(&self) -> bool {
        self.done
    }

    fn step(&mut self) -> Result<(), EngineError> {
        let candidates = self.ctx.candidates();
        let candidates_p = LlamaTokenDataArray::from_iter(candidates, false);
        let token = self.ctx.sample_token_greedy(candidates_p);
        self.last = token.0;

        if self.ctx.model.is_eog_token(token) {
            self.done = true;
            return Ok(());
        }

        self.batch.clear();
        self.batch
            .add(token, self.n_cur, &[0], true)
            .map_err(|e| EngineError::Decode(e.into()))?;
        self.n_cur += 1;
        if self.n_cur >= self.max_tokens {
            self.done = true;
            return Ok(());
        }

        self.ctx
            .decode(&mut self.batch)
            .map_err(|e| EngineError::Decode(e.into()))
    }

    fn last_token(&self) -> TokenId {
        self.last
    }

    fn decode_token(&mut self, token: TokenId) -> Result<String, EngineError> {
        let token = LlamaToken(token);
        if self.ctx.model.is_eog_token(token) {
            return Ok(String::new());
        }
        let bytes = self
            .ctx
            .model
            .token_to_bytes(token, Special::Tokenize)
            .map_err(|e| EngineError::Decode(e.into()))?;
        let mut fragment = String::with_capacity(32);
        let _ = self.decoder.decode_to_string(&bytes, &mut fragment, false);
        Ok(fragment)
    }
}
