//! # Message Handlers
//!
//! Async loops that feed peer traffic into the services.

pub mod spork_messages;

pub use spork_messages::{HandledMessage, InboundMessage, SporkMessageHandler};
