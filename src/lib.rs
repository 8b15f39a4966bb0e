#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod cli;
pub mod context;
pub mod engine;
pub mod error;
pub mod llama;
pub mod prompt;
pub mod settings;
pub mod turn;
