//! An abstraction layer for chat completion services.
//!
//! This crate establishes a small protocol between the chat loop and the
//! services that generate replies, so that the loop can be driven by a
//! hosted endpoint or by a scripted fake without modifying its code.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
