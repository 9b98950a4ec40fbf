use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::challenge::Challenge;

/// Paid versus planned totals for a single challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeProgress {
    pub done_count: usize,
    pub total_count: usize,
    pub saved: f64,
    pub target: f64,
    pub remaining: f64,
    /// Rounded to the nearest whole percent; zero when the target is zero.
    pub percent: u32,
    pub completed: bool,
}

impl ChallengeProgress {
    pub fn of(challenge: &Challenge) -> Self {
        let total_count = challenge.deposits.len();
        let (done_count, saved) = challenge
            .deposits
            .iter()
            .filter(|slot| slot.done)
            .fold((0, 0.0), |(count, sum), slot| (count + 1, sum + slot.value));
        let target: f64 = challenge.deposits.iter().map(|slot| slot.value).sum();
        let percent = if target > 0.0 {
            (saved / target * 100.0).round().max(0.0) as u32
        } else {
            0
        };
        Self {
            done_count,
            total_count,
            saved,
            target,
            remaining: target - saved,
            percent,
            completed: total_count > 0 && done_count == total_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeTotals {
    pub name: String,
    pub saved: f64,
    pub target: f64,
}

/// Cumulative amount saved at the end of a calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub deposited: f64,
    pub cumulative: f64,
}

/// Aggregate view across every challenge a user owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub challenges: Vec<ChallengeTotals>,
    pub saved: f64,
    pub target: f64,
    pub paid_deposits: usize,
    pub timeline: Vec<TimelinePoint>,
}

impl PortfolioSummary {
    pub fn from_challenges(challenges: &[Challenge]) -> Self {
        let mut totals = Vec::with_capacity(challenges.len());
        let mut paid_deposits = 0;
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for challenge in challenges {
            let progress = challenge.progress();
            paid_deposits += progress.done_count;
            totals.push(ChallengeTotals {
                name: challenge.name.clone(),
                saved: progress.saved,
                target: progress.target,
            });
            // Paid slots without a timestamp still count toward totals.
            for slot in challenge.deposits.iter().filter(|slot| slot.done) {
                if let Some(done_at) = slot.done_at {
                    *by_day.entry(done_at.date_naive()).or_default() += slot.value;
                }
            }
        }

        let mut cumulative = 0.0;
        let timeline = by_day
            .into_iter()
            .map(|(date, deposited)| {
                cumulative += deposited;
                TimelinePoint {
                    date,
                    deposited,
                    cumulative,
                }
            })
            .collect();

        Self {
            saved: totals.iter().map(|t| t.saved).sum(),
            target: totals.iter().map(|t| t.target).sum(),
            challenges: totals,
            paid_deposits,
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn progress_of_fresh_challenge() {
        let challenge = Challenge::new("Fresh", start(), 50);
        let progress = challenge.progress();
        assert_eq!(progress.done_count, 0);
        assert_eq!(progress.total_count, 50);
        assert_eq!(progress.target, 1275.0);
        assert_eq!(progress.percent, 0);
        assert!(!progress.completed);
    }

    #[test]
    fn progress_rounds_percent_and_detects_completion() {
        let mut challenge = Challenge::new("Small", start(), 3);
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        challenge.mark_deposit(0, at).unwrap();
        let progress = challenge.progress();
        assert_eq!(progress.saved, 1.0);
        assert_eq!(progress.remaining, 5.0);
        assert_eq!(progress.percent, 17);

        challenge.apply_selection(&[1, 2], at).unwrap();
        let progress = challenge.progress();
        assert_eq!(progress.percent, 100);
        assert!(progress.completed);
    }

    #[test]
    fn timeline_groups_by_day_and_accumulates() {
        let mut trip = Challenge::new("Trip", start(), 5);
        let mut car = Challenge::new("Car", start(), 5);
        let day_one = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let day_one_late = Utc.with_ymd_and_hms(2025, 2, 1, 22, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap();
        trip.mark_deposit(4, day_two).unwrap();
        trip.mark_deposit(0, day_one).unwrap();
        car.mark_deposit(2, day_one_late).unwrap();
        car.deposits[1].done = true;

        let summary = PortfolioSummary::from_challenges(&[trip, car]);
        assert_eq!(summary.paid_deposits, 4);
        assert_eq!(summary.saved, 11.0);
        assert_eq!(summary.target, 30.0);
        assert_eq!(summary.timeline.len(), 2);
        assert_eq!(summary.timeline[0].date, day_one.date_naive());
        assert_eq!(summary.timeline[0].deposited, 4.0);
        assert_eq!(summary.timeline[1].cumulative, 9.0);
    }

    #[test]
    fn empty_portfolio() {
        let summary = PortfolioSummary::from_challenges(&[]);
        assert!(summary.timeline.is_empty());
        assert_eq!(summary.saved, 0.0);
    }
}
