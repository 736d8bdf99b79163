//! ag95 Engine Layer
//!
//! Pure decision logic, deterministic, no I/O.
//! Takes a price history and trailing parameters → returns a decision.

#![warn(clippy::all)]

pub mod decision;
pub mod error;
pub mod observer;
pub mod request;
pub mod trailing;

pub use decision::{DecisionExtra, DecisionReason, FollowingLimits, TrailingDecision};
pub use error::{EngineError, EngineResult};
pub use observer::{DecisionEvent, DecisionObserver, TracingObserver};
pub use request::{RawTrailingRequest, TrailingRequest};
pub use trailing::TrailingEngine;
