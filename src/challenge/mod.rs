//! Savings challenge domain models, progress reporting, and helpers.

#[allow(clippy::module_inception)]
pub mod challenge;
pub mod deposit;
pub mod progress;

pub use challenge::{Challenge, ChallengeDetails, ScheduleChange, DEFAULT_DEPOSIT_COUNT};
pub use deposit::DepositSlot;
pub use progress::{ChallengeProgress, ChallengeTotals, PortfolioSummary, TimelinePoint};
