//! Test helpers for ag95 engine and replay tests.
//!
//! Provides decimal and request builders, the reference decision table,
//! and an observer that records engine events.

mod helpers;

pub use helpers::{
    reference_scenarios, prices, raw_request, request, scenario_file_json, CollectingObserver,
    RequestOptions, Scenario,
};
