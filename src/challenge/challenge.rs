use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deposit::DepositSlot, progress::ChallengeProgress};
use crate::{
    errors::{ChallengeError, Result},
    selector::{BudgetInput, Selection},
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Number of deposits a new challenge gets when none is requested.
pub const DEFAULT_DEPOSIT_COUNT: usize = 50;

/// A savings goal split into a fixed sequence of numbered deposits.
///
/// Deposits are identified by their position; slot `i` of a freshly created
/// challenge is worth `i + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub deposits: Vec<DepositSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Challenge::schema_version_default")]
    pub schema_version: u8,
}

/// How a call to [`Challenge::resize`] changed the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleChange {
    Unchanged,
    Extended { from: usize, to: usize },
    Reduced { from: usize, to: usize },
}

/// Descriptive fields that can change after creation. `None` leaves a field
/// as it is; a blank bank or icon clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeDetails {
    pub name: Option<String>,
    pub bank: Option<String>,
    pub icon: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl ChallengeDetails {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bank.is_none()
            && self.icon.is_none()
            && self.start_date.is_none()
    }
}

impl Challenge {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, deposit_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            bank: None,
            icon: None,
            deposits: schedule(1, effective_count(deposit_count)).collect(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ChallengeError::InvalidInput(
                "challenge name cannot be empty".into(),
            ));
        }
        if self.deposits.is_empty() {
            return Err(ChallengeError::InvalidInput(format!(
                "challenge `{}` has no deposits",
                self.name
            )));
        }
        Ok(())
    }

    /// Applies edited details and reports whether anything changed. A blank
    /// new name is rejected before any field is touched.
    pub fn update_details(&mut self, details: ChallengeDetails) -> Result<bool> {
        let name = match details.name {
            Some(name) if name.trim().is_empty() => {
                return Err(ChallengeError::InvalidInput(
                    "challenge name cannot be empty".into(),
                ));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let mut changed = false;
        if let Some(name) = name.filter(|name| *name != self.name) {
            self.name = name;
            changed = true;
        }
        if let Some(bank) = details.bank.map(non_blank) {
            changed |= bank != self.bank;
            self.bank = bank;
        }
        if let Some(icon) = details.icon.map(non_blank) {
            changed |= icon != self.icon;
            self.icon = icon;
        }
        if let Some(start_date) = details.start_date {
            changed |= start_date != self.start_date;
            self.start_date = start_date;
        }
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Changes the number of deposits. Shrinking drops the tail, paid or
    /// not; growing continues the numbering after the current last slot.
    pub fn resize(&mut self, deposit_count: usize) -> ScheduleChange {
        let from = self.deposits.len();
        let to = effective_count(deposit_count);
        let change = match to.cmp(&from) {
            std::cmp::Ordering::Equal => return ScheduleChange::Unchanged,
            std::cmp::Ordering::Less => {
                self.deposits.truncate(to);
                ScheduleChange::Reduced { from, to }
            }
            std::cmp::Ordering::Greater => {
                self.deposits.extend(schedule(from + 1, to - from));
                ScheduleChange::Extended { from, to }
            }
        };
        self.touch();
        change
    }

    /// Marks a single deposit as paid. Returns `false` if it already was.
    pub fn mark_deposit(&mut self, index: usize, at: DateTime<Utc>) -> Result<bool> {
        let count = self.deposits.len();
        let slot = self
            .deposits
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, count))?;
        let marked = slot.mark_done(at);
        if marked {
            self.touch();
        }
        Ok(marked)
    }

    /// Marks every listed deposit as paid with the same timestamp and
    /// returns how many were newly marked. Indices are checked before
    /// anything changes.
    pub fn apply_selection(&mut self, indices: &[usize], at: DateTime<Utc>) -> Result<usize> {
        let count = self.deposits.len();
        if let Some(&bad) = indices.iter().find(|&&index| index >= count) {
            return Err(out_of_range(bad, count));
        }
        let marked = indices
            .iter()
            .filter(|&&index| self.deposits[index].mark_done(at))
            .count();
        if marked > 0 {
            self.touch();
        }
        tracing::debug!(challenge = %self.name, marked, "applied deposit selection");
        Ok(marked)
    }

    /// Best combination of unpaid deposits for the cash on hand.
    pub fn pick_best_deposits(&self, budget: impl Into<BudgetInput>) -> Selection {
        Selection::preview(&self.deposits, budget)
    }

    pub fn progress(&self) -> ChallengeProgress {
        ChallengeProgress::of(self)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn effective_count(requested: usize) -> usize {
    if requested == 0 {
        DEFAULT_DEPOSIT_COUNT
    } else {
        requested
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn schedule(first_value: usize, count: usize) -> impl Iterator<Item = DepositSlot> {
    (first_value..first_value + count).map(|value| DepositSlot::new(value as f64))
}

fn out_of_range(index: usize, count: usize) -> ChallengeError {
    ChallengeError::InvalidRef(format!(
        "deposit #{} does not exist (challenge has {} deposits)",
        index + 1,
        count
    ))
}
