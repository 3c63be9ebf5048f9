//! Validation des horaires d'équipe avant génération des créneaux.

use crate::model::Crew;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Durée minimale d'un créneau (heures).
pub const MIN_SHIFT_HOURS: f64 = 1.0;
/// Durée maximale d'un créneau (heures).
pub const MAX_SHIFT_HOURS: f64 = 12.0;

/// Erreur de saisie rattachée à un champ, destinée à l'affichage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid time format (expected HH:MM)")]
    Malformed,
    #[error("hour must be between 0 and 23 (got {0})")]
    HourOutOfRange(u32),
    #[error("minute must be between 0 and 59 (got {0})")]
    MinuteOutOfRange(u32),
}

/// Parse "HH:MM" (24h) en minutes depuis minuit.
pub fn parse_hhmm(raw: &str) -> Result<u32, TimeParseError> {
    let (h, m) = raw.trim().split_once(':').ok_or(TimeParseError::Malformed)?;
    let well_formed = (1..=2).contains(&h.len())
        && m.len() == 2
        && h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(TimeParseError::Malformed);
    }
    let hour: u32 = h.parse().map_err(|_| TimeParseError::Malformed)?;
    let minute: u32 = m.parse().map_err(|_| TimeParseError::Malformed)?;
    if hour > 23 {
        return Err(TimeParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange(minute));
    }
    Ok(hour * 60 + minute)
}

/// Vérifie la fenêtre d'ouverture et la durée de créneau d'une équipe.
///
/// Retourne toutes les erreurs trouvées (liste vide = configuration valide).
pub fn validate_shift_times(crew: &Crew) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let start = check_time(&mut errors, "operating_start_time", &crew.operating_start_time);
    let end = check_time(&mut errors, "operating_end_time", &crew.operating_end_time);

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            errors.push(ValidationError::new(
                "operating_end_time",
                "end time must be after start time",
            ));
        }
    }

    let hours = crew.shift_length_hours;
    if !hours.is_finite() {
        errors.push(ValidationError::new(
            "shift_length_hours",
            "shift length must be a number",
        ));
    } else if hours < MIN_SHIFT_HOURS {
        errors.push(ValidationError::new(
            "shift_length_hours",
            "shift length must be at least 1 hour",
        ));
    } else if hours > MAX_SHIFT_HOURS {
        errors.push(ValidationError::new(
            "shift_length_hours",
            "shift length cannot exceed 12 hours",
        ));
    }

    errors
}

fn check_time(errors: &mut Vec<ValidationError>, field: &str, raw: &str) -> Option<u32> {
    match parse_hhmm(raw) {
        Ok(minutes) => Some(minutes),
        Err(err) => {
            errors.push(ValidationError::new(field, err.to_string()));
            None
        }
    }
}
