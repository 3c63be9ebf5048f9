use super::types::{AssignFailure, AssignOutcome, SchedError};
use super::util;
use crate::model::{Shift, ShiftId, ShiftStatus, Volunteer, VolunteerId};
use crate::validation::parse_hhmm;
use chrono::Datelike;

/// Évalue toutes les règles d'affectation sans rien modifier.
///
/// Les motifs de refus sont tous collectés (liste vide = affectation possible).
pub fn check_shift_assignment(
    shift: &Shift,
    volunteer: &Volunteer,
    all_shifts: &[Shift],
) -> Vec<AssignFailure> {
    let mut reasons = Vec::new();

    if shift.has_volunteer(&volunteer.id) {
        reasons.push(AssignFailure::AlreadyAssigned);
    }
    if !is_available(volunteer, shift) {
        reasons.push(AssignFailure::NotAvailable);
    }
    if has_conflict(&volunteer.id, shift, all_shifts) {
        reasons.push(AssignFailure::ConflictingShifts);
    }
    if shift.is_full() {
        reasons.push(AssignFailure::ShiftFilled);
    }

    reasons
}

/// Affecte un bénévole à un créneau de `shifts` si toutes les règles passent.
pub fn assign_volunteer_to_shift(
    shifts: &mut [Shift],
    shift_id: &ShiftId,
    volunteer: &Volunteer,
) -> Result<AssignOutcome, SchedError> {
    let Some(pos) = util::find_shift_index(shifts, shift_id) else {
        return Err(SchedError::UnknownShift(shift_id.as_str().to_string()));
    };

    let reasons = check_shift_assignment(&shifts[pos], volunteer, shifts);
    if !reasons.is_empty() {
        #[cfg(feature = "logging")]
        tracing::debug!(volunteer = %volunteer.name, shift = shift_id.as_str(), ?reasons, "assignment rejected");
        return Ok(AssignOutcome::Rejected { reasons });
    }

    let shift = &mut shifts[pos];
    shift.assigned_volunteers.push(volunteer.id.clone());
    shift.status = if shift.is_full() {
        ShiftStatus::Filled
    } else {
        ShiftStatus::Open
    };
    Ok(AssignOutcome::Assigned {
        status: shift.status,
    })
}

/// Retire un bénévole d'un créneau ; le créneau repasse toujours à `open`.
///
/// Retourne `true` si le bénévole figurait sur le créneau.
pub fn remove_volunteer_from_shift(shift: &mut Shift, volunteer: &VolunteerId) -> bool {
    let before = shift.assigned_volunteers.len();
    shift.assigned_volunteers.retain(|id| id != volunteer);
    // TODO: ne pas rouvrir un créneau `completed` ou `cancelled` une fois la règle métier tranchée
    shift.status = ShiftStatus::Open;
    shift.assigned_volunteers.len() != before
}

/// Applique une demande d'échange : `replacement` prend la place de `current`
/// sur le créneau. La capacité et le statut du créneau sont inchangés.
pub fn swap_shift_volunteer(
    shifts: &mut [Shift],
    shift_id: &ShiftId,
    current: &VolunteerId,
    replacement: &Volunteer,
) -> Result<AssignOutcome, SchedError> {
    let Some(pos) = util::find_shift_index(shifts, shift_id) else {
        return Err(SchedError::UnknownShift(shift_id.as_str().to_string()));
    };

    let shift = &shifts[pos];
    if !shift.has_volunteer(current) {
        return Err(SchedError::SwapInvalid("shift not assigned to the requesting volunteer"));
    }
    if current == &replacement.id {
        return Err(SchedError::SwapInvalid("cannot swap a volunteer with themselves"));
    }

    let mut reasons = Vec::new();
    if shift.has_volunteer(&replacement.id) {
        reasons.push(AssignFailure::AlreadyAssigned);
    }
    if !is_available(replacement, shift) {
        reasons.push(AssignFailure::NotAvailable);
    }
    if has_conflict(&replacement.id, shift, shifts) {
        reasons.push(AssignFailure::ConflictingShifts);
    }
    if !reasons.is_empty() {
        return Ok(AssignOutcome::Rejected { reasons });
    }

    let shift = &mut shifts[pos];
    for id in shift.assigned_volunteers.iter_mut() {
        if id == current {
            *id = replacement.id.clone();
        }
    }
    Ok(AssignOutcome::Assigned {
        status: shift.status,
    })
}

/// Le jour du créneau et sa plage horaire tiennent dans les disponibilités.
pub(super) fn is_available(volunteer: &Volunteer, shift: &Shift) -> bool {
    let availability = &volunteer.availability;
    let (Ok(from), Ok(until)) = (
        parse_hhmm(&availability.start_time),
        parse_hhmm(&availability.end_time),
    ) else {
        return false;
    };

    availability.days.contains(&shift.start.weekday())
        && availability.covers_date(shift.start.date_naive())
        && util::minute_of_day(shift.start) >= from
        && util::minute_of_day(shift.end) <= until
}

/// Un autre créneau du bénévole chevauche-t-il `shift` ?
pub(super) fn has_conflict(volunteer: &VolunteerId, shift: &Shift, all_shifts: &[Shift]) -> bool {
    all_shifts
        .iter()
        .filter(|other| other.id != shift.id && other.has_volunteer(volunteer))
        .any(|other| util::overlaps(shift.start, shift.end, other.start, other.end))
}
