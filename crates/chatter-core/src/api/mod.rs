//! Messaging backend boundary.
//!
//! The composer only knows the [`MessageSender`] trait. [`ApiClient`] is the
//! HTTP implementation against the Chatter backend, and [`Conversation`] binds
//! it to one recipient.

mod client;
mod sender;

pub use client::{ApiClient, Conversation};
pub use sender::MessageSender;
