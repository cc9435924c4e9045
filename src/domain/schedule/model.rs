//! Schedule domain entity

use chrono::NaiveDateTime;

use crate::domain::{DomainError, DomainResult};

/// A fixed time window on a specific court
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: i64,
    pub court_id: i64,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

impl Schedule {
    /// Strictly in the future relative to `now`
    pub fn starts_after(&self, now: NaiveDateTime) -> bool {
        self.start_date_time > now
    }

    /// Both bounds fall inside `[start, end]`
    pub fn lies_within(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_date_time >= start && self.end_date_time <= end
    }
}

/// Schedule that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub court_id: i64,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

impl NewSchedule {
    pub fn validate(&self) -> DomainResult<()> {
        if self.end_date_time <= self.start_date_time {
            return Err(DomainError::validation(
                "Schedule end must be after its start.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn slot(h: u32) -> Schedule {
        Schedule {
            id: 1,
            court_id: 1,
            start_date_time: at(h),
            end_date_time: at(h) + Duration::hours(1),
        }
    }

    #[test]
    fn starts_after_is_strict() {
        let s = slot(10);
        assert!(s.starts_after(at(9)));
        assert!(!s.starts_after(at(10)));
    }

    #[test]
    fn lies_within_is_inclusive() {
        let s = slot(10);
        assert!(s.lies_within(at(10), at(11)));
        assert!(!s.lies_within(at(10), at(10)));
        assert!(!s.lies_within(at(11), at(12)));
    }

    #[test]
    fn new_schedule_rejects_inverted_bounds() {
        let ok = NewSchedule {
            court_id: 1,
            start_date_time: at(8),
            end_date_time: at(9),
        };
        assert!(ok.validate().is_ok());

        let bad = NewSchedule {
            end_date_time: at(8),
            ..ok
        };
        assert!(matches!(bad.validate(), Err(DomainError::Validation(_))));
    }
}
