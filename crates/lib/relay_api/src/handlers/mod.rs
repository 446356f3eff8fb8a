//! Request handlers.

pub mod chat;
pub mod status;
