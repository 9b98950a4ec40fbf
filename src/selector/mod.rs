//! Deposit selection: given the unpaid deposits of a challenge and the cash a
//! user has on hand, pick the deposits whose values add up to the largest
//! total that still fits.
//!
//! This is the 0/1 knapsack variant where weight and value coincide. The
//! search runs over whole units: both the budget and every deposit value are
//! truncated toward zero before the search, while previews report the
//! original values back.

use serde::{Deserialize, Serialize};

use crate::challenge::DepositSlot;

/// Amount of money the user has available, normalized from whatever the
/// presentation layer collected.
///
/// Text input accepts a comma as decimal separator (`"37,50"`). Anything
/// that does not parse, NaN included, becomes a zero budget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetInput(f64);

impl BudgetInput {
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().replace(',', ".");
        if normalized.is_empty() {
            return Self::default();
        }
        normalized
            .parse::<f64>()
            .map(Self::from)
            .unwrap_or_default()
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Whole units available to the search.
    pub fn capacity(self) -> usize {
        whole_units(self.0)
    }
}

impl From<f64> for BudgetInput {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::default()
        } else {
            Self(value)
        }
    }
}

impl From<i64> for BudgetInput {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<u32> for BudgetInput {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl From<&str> for BudgetInput {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<&String> for BudgetInput {
    fn from(value: &String) -> Self {
        Self::parse(value)
    }
}

impl From<String> for BudgetInput {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Truncates toward zero. Negative and NaN amounts count as nothing; the
/// float-to-int cast saturates for huge values.
pub fn whole_units(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    slot: usize,
    previous: usize,
}

/// Returns the indices of the unpaid deposits whose truncated values sum to
/// the largest total not exceeding the truncated budget.
///
/// Paid deposits are never selected. Every degenerate input (zero or
/// unparsable budget, nothing eligible, nothing fits) yields an empty list.
/// Indices come back in the order the search recorded them, which is
/// deterministic for identical input: deposits are considered in their
/// original order and the first way found to reach a given sum is kept.
///
/// Time and memory grow with the search capacity: one table entry per whole
/// unit up to the smaller of the budget and the sum of eligible values.
/// Household goals stay in the thousands; a single slot or budget in the
/// billions allocates gigabytes and can abort the process.
pub fn pick_best_deposits(slots: &[DepositSlot], budget: impl Into<BudgetInput>) -> Vec<usize> {
    let budget = budget.into();

    let eligible: Vec<(usize, usize)> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_eligible())
        .map(|(index, slot)| (index, whole_units(slot.value)))
        .filter(|&(_, value)| value > 0)
        .collect();

    // Sums above what the eligible deposits can reach never get recorded, so
    // bounding the table by that total leaves the outcome unchanged.
    let reachable_total = eligible
        .iter()
        .fold(0usize, |acc, &(_, value)| acc.saturating_add(value));
    let capacity = budget.capacity().min(reachable_total);
    if capacity == 0 {
        tracing::debug!(
            eligible = eligible.len(),
            budget = budget.amount(),
            "deposit selection skipped: no capacity"
        );
        return Vec::new();
    }

    // table[s] remembers which deposit first reached sum `s` and from which
    // smaller sum. Sum 0 is always reachable and never recorded.
    let mut table: Vec<Option<Step>> = vec![None; capacity + 1];
    for &(slot, value) in &eligible {
        if value > capacity {
            continue;
        }
        // Descending so each deposit extends only sums reached before it.
        for sum in (value..=capacity).rev() {
            let previous = sum - value;
            if table[sum].is_none() && (previous == 0 || table[previous].is_some()) {
                table[sum] = Some(Step { slot, previous });
            }
        }
    }

    let Some(best) = (1..=capacity).rev().find(|&sum| table[sum].is_some()) else {
        tracing::debug!(
            eligible = eligible.len(),
            capacity,
            "deposit selection found no combination"
        );
        return Vec::new();
    };

    let mut picked = Vec::new();
    let mut sum = best;
    while let Some(step) = table[sum] {
        picked.push(step.slot);
        sum = step.previous;
    }
    picked.reverse();

    tracing::debug!(
        eligible = eligible.len(),
        capacity,
        achieved = best,
        picked = picked.len(),
        "deposit selection complete"
    );
    picked
}

/// What the presentation layer shows while the user types a budget: the
/// chosen deposits, their original values and the sum of those values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub total: f64,
    pub capacity: usize,
}

impl Selection {
    pub fn preview(slots: &[DepositSlot], budget: impl Into<BudgetInput>) -> Self {
        let budget = budget.into();
        let indices = pick_best_deposits(slots, budget);
        let values: Vec<f64> = indices.iter().map(|&index| slots[index].value).collect();
        let total = values.iter().sum();
        Self {
            indices,
            values,
            total,
            capacity: budget.capacity(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
}
