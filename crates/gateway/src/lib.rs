//! Model Gateway: adapter over the external multimodal generation model.
//!
//! The rest of the workspace talks to the model through the
//! [`GenerativeModel`] trait; [`GeminiGateway`] is the production
//! implementation over a Gemini-style `generateContent` HTTP API. Every
//! upstream response is decoded into typed structs ([`wire`]) and run
//! through the ordered outcome classification ([`classify`]), so callers
//! see exactly one of five failure kinds. Policy blocks
//! ([`GatewayError::SafetyBlocked`], [`GatewayError::Refused`]) stay
//! distinguishable from technical failures; blocked generations must not
//! be billed.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod wire;

pub use client::GeminiGateway;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use types::{GenerateRequest, GenerativeModel, InlineImage, ModelOutput, ResponseModality};
