#![doc(test(attr(deny(warnings))))]

//! Challenge Core tracks savings challenges: goals split into numbered
//! deposits that are paid over time. It also ships the deposit selector,
//! which picks the unpaid deposits that best use an amount of cash on hand.

pub mod challenge;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod selector;
pub mod storage;
pub mod utils;

pub use challenge::{Challenge, DepositSlot};
pub use errors::{ChallengeError, Result};
pub use selector::{pick_best_deposits, BudgetInput, Selection};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            build = %utils::build_info::current().summary(),
            "Challenge Core tracing initialized."
        );
    });
}
