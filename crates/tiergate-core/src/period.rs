//! Period boundary arithmetic for usage stores.
//!
//! The decision engine never reads the clock. Stores call these functions
//! with an explicit `now` to roll counters into the current period.

use chrono::{DateTime, Datelike, Months, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Period, UsageCounters};

/// When counters reset. Chosen by whoever configures the persistence layer;
/// there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Daily at 00:00 UTC, monthly at 00:00 UTC on the 1st.
    CalendarUtc,
    /// Whole days, or whole calendar months, from the counters' cycle anchor.
    Rolling,
}

impl ResetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalendarUtc => "calendar_utc",
            Self::Rolling => "rolling",
        }
    }
}

/// Start of the period containing `now`, for counters last reset at `last_reset`
/// whose cycle began at `last_reset` too.
///
/// Never earlier than `last_reset`: a clock that moves backwards does not
/// reopen a finished period.
pub fn period_start(
    policy: ResetPolicy,
    period: Period,
    last_reset: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    anchored_start(policy, period, last_reset, last_reset, now)
}

/// Same as [`period_start`], counting rolling periods from `anchor`.
fn anchored_start(
    policy: ResetPolicy,
    period: Period,
    anchor: DateTime<Utc>,
    last_reset: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if now <= last_reset {
        return last_reset;
    }
    let start = match policy {
        ResetPolicy::CalendarUtc => calendar_start(period, now),
        ResetPolicy::Rolling => rolling_start(period, anchor.min(last_reset), now),
    };
    start.max(last_reset)
}

/// Whether at least one period boundary lies in `(last_reset, now]`.
pub fn period_elapsed(
    policy: ResetPolicy,
    period: Period,
    last_reset: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    period_start(policy, period, last_reset, now) > last_reset
}

/// Period start for an account with no counters yet.
pub fn initial_period_start(
    policy: ResetPolicy,
    period: Period,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    match policy {
        ResetPolicy::CalendarUtc => calendar_start(period, now),
        ResetPolicy::Rolling => now,
    }
}

/// `counters` rolled into the period containing `now`: unchanged if no
/// boundary has passed, zeroed with a new `last_reset` otherwise. The cycle
/// anchor is kept across rolls.
pub fn roll_forward(
    policy: ResetPolicy,
    counters: &UsageCounters,
    now: DateTime<Utc>,
) -> UsageCounters {
    let start = anchored_start(
        policy,
        counters.period,
        counters.cycle_anchor,
        counters.last_reset,
        now,
    );
    if start > counters.last_reset {
        counters.next_period(start)
    } else {
        counters.clone()
    }
}

fn calendar_start(period: Period, now: DateTime<Utc>) -> DateTime<Utc> {
    let date = match period {
        Period::Daily => now.date_naive(),
        Period::Monthly => now.date_naive().with_day(1).unwrap_or(now.date_naive()),
    };
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn rolling_start(period: Period, anchor: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        Period::Daily => {
            let days = (now - anchor).num_days();
            anchor + chrono::Duration::days(days)
        }
        Period::Monthly => {
            // Whole months from the anchor; checked_add_months clamps to
            // the last day of shorter months.
            let months_between = (now.year() - anchor.year()) * 12 + now.month() as i32
                - anchor.month() as i32;
            let mut k = months_between.max(0) as u32;
            loop {
                match anchor.checked_add_months(Months::new(k)) {
                    Some(candidate) if candidate <= now => return candidate,
                    _ if k == 0 => return anchor,
                    _ => k -= 1,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn calendar_daily_resets_at_utc_midnight() {
        let last = at(2026, 3, 10, 23);
        assert!(!period_elapsed(ResetPolicy::CalendarUtc, Period::Daily, last, at(2026, 3, 10, 23)));
        assert!(period_elapsed(ResetPolicy::CalendarUtc, Period::Daily, last, at(2026, 3, 11, 0)));
        assert_eq!(
            period_start(ResetPolicy::CalendarUtc, Period::Daily, last, at(2026, 3, 11, 5)),
            at(2026, 3, 11, 0)
        );
    }

    #[test]
    fn rolling_daily_waits_full_24h() {
        let last = at(2026, 3, 10, 23);
        assert!(!period_elapsed(ResetPolicy::Rolling, Period::Daily, last, at(2026, 3, 11, 22)));
        assert!(period_elapsed(ResetPolicy::Rolling, Period::Daily, last, at(2026, 3, 11, 23)));
        assert_eq!(
            period_start(ResetPolicy::Rolling, Period::Daily, last, at(2026, 3, 14, 1)),
            at(2026, 3, 13, 23)
        );
    }

    #[test]
    fn calendar_monthly_resets_on_first() {
        let last = at(2026, 1, 15, 0);
        assert!(!period_elapsed(ResetPolicy::CalendarUtc, Period::Monthly, last, at(2026, 1, 31, 23)));
        assert_eq!(
            period_start(ResetPolicy::CalendarUtc, Period::Monthly, last, at(2026, 2, 3, 0)),
            at(2026, 2, 1, 0)
        );
    }

    #[test]
    fn rolling_monthly_roll_keeps_anchor_day() {
        let anchor = at(2026, 1, 31, 12);
        let counters = UsageCounters::fresh(Period::Monthly, anchor)
            .with_used(crate::types::ActionCategory::Vin, 4);

        let march = roll_forward(ResetPolicy::Rolling, &counters, at(2026, 3, 1, 0));
        assert_eq!(march.last_reset, at(2026, 2, 28, 12));
        assert_eq!(march.cycle_anchor, anchor);
        assert_eq!(march.vin_searches, 0);

        let march = march.with_used(crate::types::ActionCategory::Vin, 2);
        let late_march = roll_forward(ResetPolicy::Rolling, &march, at(2026, 3, 29, 0));
        assert_eq!(late_march, march);

        let april = roll_forward(ResetPolicy::Rolling, &march, at(2026, 3, 31, 13));
        assert_eq!(april.last_reset, at(2026, 3, 31, 12));
        assert_eq!(april.vin_searches, 0);
    }

    #[test]
    fn rolling_monthly_clamps_without_drift() {
        let anchor = at(2026, 1, 31, 12);
        assert_eq!(
            period_start(ResetPolicy::Rolling, Period::Monthly, anchor, at(2026, 3, 1, 0)),
            at(2026, 2, 28, 12)
        );
        assert_eq!(
            period_start(ResetPolicy::Rolling, Period::Monthly, anchor, at(2026, 4, 1, 0)),
            at(2026, 3, 31, 12)
        );
    }

    #[test]
    fn roll_forward_zeroes_once_per_boundary() {
        let last = at(2026, 3, 10, 0);
        let counters = UsageCounters::fresh(Period::Daily, last)
            .with_used(crate::types::ActionCategory::Search, 7);

        let same_day = roll_forward(ResetPolicy::CalendarUtc, &counters, at(2026, 3, 10, 18));
        assert_eq!(same_day, counters);

        let next_day = roll_forward(ResetPolicy::CalendarUtc, &counters, at(2026, 3, 11, 9));
        assert_eq!(next_day.searches, 0);
        assert_eq!(next_day.last_reset, at(2026, 3, 11, 0));

        let again = roll_forward(ResetPolicy::CalendarUtc, &next_day, at(2026, 3, 11, 20));
        assert_eq!(again, next_day);
    }

    #[test]
    fn initial_start_depends_on_policy() {
        let now = at(2026, 6, 17, 14);
        assert_eq!(
            initial_period_start(ResetPolicy::CalendarUtc, Period::Monthly, now),
            at(2026, 6, 1, 0)
        );
        assert_eq!(initial_period_start(ResetPolicy::Rolling, Period::Monthly, now), now);
    }

    #[test]
    fn clock_going_backwards_never_resets() {
        let last = at(2026, 5, 2, 0);
        for policy in [ResetPolicy::CalendarUtc, ResetPolicy::Rolling] {
            for period in Period::ALL {
                assert!(!period_elapsed(policy, period, last, at(2026, 4, 1, 0)));
            }
        }
    }
}
