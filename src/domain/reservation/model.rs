//! Reservation domain entity

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::schedule::Schedule;
use crate::domain::{DomainError, DomainResult};

/// Reservation status
///
/// `ReadyToPlay` is the only state with outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// Booked and not yet played
    ReadyToPlay,
    /// Cancelled by the guest
    Cancelled,
    /// Replaced by a reservation on another slot
    Rescheduled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadyToPlay => "READY_TO_PLAY",
            Self::Cancelled => "CANCELLED",
            Self::Rescheduled => "RESCHEDULED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READY_TO_PLAY" => Some(Self::ReadyToPlay),
            "CANCELLED" => Some(Self::Cancelled),
            "RESCHEDULED" => Some(Self::Rescheduled),
            _ => None,
        }
    }

    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::ReadyToPlay, Self::Cancelled) | (Self::ReadyToPlay, Self::Rescheduled)
        )
    }

    /// Move to `next`, rejecting anything but READY_TO_PLAY -> CANCELLED/RESCHEDULED
    pub fn transition(self, next: ReservationStatus) -> DomainResult<ReservationStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::Validation(format!(
                "Cannot move reservation from {} to {}.",
                self, next
            )))
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Court reservation
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Unique reservation ID, 0 until the reservation is saved
    pub id: i64,
    /// Guest who holds the reservation
    pub guest_id: i64,
    /// Reserved slot
    pub schedule: Schedule,
    /// Amount charged, reduced by the refund on cancel/reschedule
    pub value: Decimal,
    /// Amount returned to the guest (may be negative)
    pub refund_value: Decimal,
    pub status: ReservationStatus,
    /// Reservation this one replaced, when created by rescheduling
    pub previous_reservation_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl Reservation {
    pub fn new(
        guest_id: i64,
        schedule: Schedule,
        value: Decimal,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            guest_id,
            schedule,
            value,
            refund_value: Decimal::ZERO,
            status: ReservationStatus::ReadyToPlay,
            previous_reservation_id: None,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::ReadyToPlay
    }

    /// Shared eligibility rule for cancelling and rescheduling
    pub fn ensure_modifiable(&self, now: NaiveDateTime) -> DomainResult<()> {
        if !self.is_active() {
            return Err(DomainError::validation(
                "Cannot cancel/reschedule because it's not in ready to play status.",
            ));
        }
        if !self.schedule.starts_after(now) {
            return Err(DomainError::validation(
                "Can cancel/reschedule only future dates.",
            ));
        }
        Ok(())
    }

    /// Apply a refund and move to `status`
    pub fn settle(&mut self, refund: Decimal, status: ReservationStatus) -> DomainResult<()> {
        self.status = self.status.transition(status)?;
        self.value -= refund;
        self.refund_value = refund;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
