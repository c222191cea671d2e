//! Composition staging.
//!
//! Lifecycle of one draft:
//!
//! ```text
//! Idle ──select──▶ Acquiring ──▶ Transcoding ──▶ Staged ──remove──▶ Idle
//!   │                  │               │            │
//!   │                  └──── failure: back to the prior phase
//!   └──────────── submit ──▶ Sending ──▶ Idle (or back on failure)
//! ```

mod composer;
mod state;

pub use composer::{Composer, SubmitOutcome};
pub use state::{Activity, CompositionState, Phase};
