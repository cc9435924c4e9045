//! Reservation pricing and the cancellation refund schedule
//!
//! A booking charges the full reservation value. Cancelling (or
//! rescheduling) at least 24 hours ahead returns the whole deposit. Inside
//! 24 hours the refund starts at zero and each wall-clock window that
//! contains "now" deducts a share of the deposit, so the refund can end up
//! negative. The window bounds are exclusive and leave one-minute gaps
//! (00:00-00:01, 02:00-02:01, 11:59-12:00, 23:59-24:00) where nothing is
//! deducted.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Charge and deposit applied to every reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// Full amount charged at booking
    pub reservation_value: Decimal,
    /// Refundable part of the charge
    pub deposit: Decimal,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            reservation_value: Decimal::from(20),
            deposit: Decimal::TEN,
        }
    }
}

impl Pricing {
    /// Amount charged at booking, in whole cents
    pub fn charge(&self) -> Decimal {
        round_to_cents(self.reservation_value)
    }

    pub fn refund(&self, now: NaiveDateTime, start: NaiveDateTime) -> Decimal {
        calculate_refund(now, start, self.deposit)
    }
}

/// Round to whole cents, ties to even, as the SQL store keeps money
fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// (after, before, share of deposit in percent), minutes from midnight.
/// Evaluated in this order; every matching window deducts.
const DEDUCTION_WINDOWS: [(i64, i64, i64); 3] = [
    (12 * 60, 23 * 60 + 59, 25),
    (2 * 60 + 1, 11 * 60 + 59, 50),
    (1, 2 * 60, 75),
];

fn minutes_after_midnight(minutes: i64) -> NaiveTime {
    NaiveTime::MIN + Duration::minutes(minutes)
}

/// Refund owed when cancelling at `now` a slot starting at `start`,
/// rounded to whole cents.
///
/// Slots already started are rejected before this is called; for them the
/// result is zero.
pub fn calculate_refund(now: NaiveDateTime, start: NaiveDateTime, deposit: Decimal) -> Decimal {
    let hours = (start - now).num_hours();

    if hours >= 24 {
        return round_to_cents(deposit);
    }
    if hours < 0 {
        return Decimal::ZERO;
    }

    let time = now.time();
    let refund = DEDUCTION_WINDOWS
        .iter()
        .filter(|(after, before, _)| {
            time > minutes_after_midnight(*after) && time < minutes_after_midnight(*before)
        })
        .fold(Decimal::ZERO, |refund, (_, _, percent)| {
            refund - deposit * Decimal::new(*percent, 2)
        });
    round_to_cents(refund)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn refund(now: NaiveDateTime, hours_ahead: i64) -> Decimal {
        calculate_refund(now, now + Duration::hours(hours_ahead), Decimal::TEN)
    }

    #[test]
    fn full_deposit_when_a_day_or_more_ahead() {
        assert_eq!(refund(at(9, 0, 0), 48), Decimal::TEN);
        assert_eq!(refund(at(13, 0, 0), 24), Decimal::TEN);
    }

    #[test]
    fn afternoon_deducts_a_quarter() {
        assert_eq!(refund(at(13, 0, 0), 5), Decimal::new(-25, 1));
    }

    #[test]
    fn morning_deducts_half() {
        assert_eq!(refund(at(9, 30, 0), 3), Decimal::from(-5));
    }

    #[test]
    fn small_hours_deduct_three_quarters() {
        assert_eq!(refund(at(1, 0, 0), 10), Decimal::new(-75, 1));
    }

    #[test]
    fn window_bounds_are_exclusive() {
        assert_eq!(refund(at(12, 0, 0), 2), Decimal::ZERO);
        assert_eq!(refund(at(23, 59, 0), 2), Decimal::ZERO);
        assert_eq!(refund(at(2, 1, 0), 2), Decimal::ZERO);
        assert_eq!(refund(at(11, 59, 0), 2), Decimal::ZERO);
        assert_eq!(refund(at(0, 1, 0), 2), Decimal::ZERO);
        assert_eq!(refund(at(2, 0, 0), 2), Decimal::ZERO);
    }

    #[test]
    fn gaps_between_windows_deduct_nothing() {
        assert_eq!(refund(at(0, 0, 30), 2), Decimal::ZERO);
        assert_eq!(refund(at(2, 0, 30), 2), Decimal::ZERO);
        assert_eq!(refund(at(11, 59, 30), 2), Decimal::ZERO);
        assert_eq!(refund(at(23, 59, 30), 2), Decimal::ZERO);
    }

    #[test]
    fn just_inside_a_window_deducts() {
        assert_eq!(refund(at(12, 0, 1), 2), Decimal::new(-25, 1));
        assert_eq!(refund(at(2, 1, 1), 2), Decimal::from(-5));
    }

    #[test]
    fn partial_hours_truncate() {
        let now = at(13, 0, 0);
        let start = now + Duration::hours(23) + Duration::minutes(59);
        assert_eq!(calculate_refund(now, start, Decimal::TEN), Decimal::new(-25, 1));
    }

    #[test]
    fn deposit_scales_deductions() {
        let now = at(13, 0, 0);
        let got = calculate_refund(now, now + Duration::hours(1), Decimal::from(40));
        assert_eq!(got, Decimal::from(-10));
    }

    #[test]
    fn sub_cent_deposits_round_to_cents() {
        let now = at(13, 0, 0);
        let deposit = Decimal::new(125, 3);
        assert_eq!(
            calculate_refund(now, now + Duration::hours(5), deposit),
            Decimal::new(-3, 2)
        );
        assert_eq!(
            calculate_refund(now, now + Duration::hours(30), Decimal::new(10005, 3)),
            Decimal::new(1000, 2)
        );

        let pricing = Pricing {
            reservation_value: Decimal::new(199999, 4),
            deposit,
        };
        assert_eq!(pricing.charge(), Decimal::from(20));
    }

    #[test]
    fn default_pricing() {
        let pricing = Pricing::default();
        assert_eq!(pricing.reservation_value, Decimal::from(20));
        assert_eq!(pricing.deposit, Decimal::TEN);
        let now = at(1, 0, 0);
        assert_eq!(
            pricing.refund(now, now + Duration::hours(10)),
            Decimal::new(-75, 1)
        );
    }
}
