use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One numbered installment of a challenge's payment schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepositSlot {
    pub value: f64,
    #[serde(default)]
    pub done: bool,
    #[serde(default, alias = "doneAt")]
    pub done_at: Option<DateTime<Utc>>,
}

impl DepositSlot {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            done: false,
            done_at: None,
        }
    }

    /// Marks the slot as paid. Returns `false` when it was already paid, in
    /// which case the original payment time is kept.
    pub fn mark_done(&mut self, at: DateTime<Utc>) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        self.done_at = Some(at);
        true
    }

    /// Unpaid slots are the only candidates for a deposit selection.
    pub fn is_eligible(&self) -> bool {
        !self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn mark_done_only_transitions_once() {
        let first = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 3, 9, 10, 0, 0).unwrap();
        let mut slot = DepositSlot::new(7.0);
        assert!(slot.is_eligible());
        assert!(slot.mark_done(first));
        assert!(!slot.mark_done(later));
        assert_eq!(slot.done_at, Some(first));
        assert!(!slot.is_eligible());
    }

    #[test]
    fn reads_camel_case_payment_time() {
        let json = r#"{"value": 3, "done": true, "doneAt": "2025-01-02T03:04:05Z"}"#;
        let slot: DepositSlot = serde_json::from_str(json).unwrap();
        assert!(slot.done);
        assert_eq!(
            slot.done_at,
            Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
        );
    }
}
