use crate::model::{Shift, ShiftId};
use chrono::{DateTime, Timelike, Utc};

/// Chevauchement d'intervalles semi-ouverts [start, end).
pub(super) fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub(super) fn minute_of_day(at: DateTime<Utc>) -> u32 {
    at.time().num_seconds_from_midnight() / 60
}

pub(super) fn find_shift_index(shifts: &[Shift], shift_id: &ShiftId) -> Option<usize> {
    shifts.iter().position(|s| &s.id == shift_id)
}
