//! A terminal chat client for hosted chat completion services.
//!
//! The crate includes a CLI tool for chatting in the terminal. The loop
//! itself is generic over its input, output and model provider, so it can
//! be driven by anything that implements [`ModelProvider`].
//!
//! [`ModelProvider`]: llama_chat_model::ModelProvider

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat_loop;
pub mod transcript;

pub use chat_loop::{ChatLoop, ChatLoopBuilder, Exit};
pub use transcript::{Role, Transcript, Turn};
