use super::types::ShiftBatch;
use crate::model::{Crew, FestivalRange, Shift};
use crate::validation::{parse_hhmm, validate_shift_times, ValidationError};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Découpe la fenêtre d'ouverture quotidienne d'une équipe en créneaux, pour
/// chaque jour du festival (bornes incluses).
///
/// Une configuration invalide ne produit aucun créneau : toutes les erreurs
/// sont renvoyées ensemble. La dernière période de la journée, plus courte
/// qu'un créneau complet, est ignorée et signalée en avertissement.
pub fn generate_shifts(
    crew: &Crew,
    range: &FestivalRange,
) -> Result<ShiftBatch, Vec<ValidationError>> {
    let errors = validate_shift_times(crew);
    if !errors.is_empty() {
        return Err(errors);
    }
    let (Ok(open), Ok(close)) = (
        parse_hhmm(&crew.operating_start_time),
        parse_hhmm(&crew.operating_end_time),
    ) else {
        return Err(vec![ValidationError::new(
            "operating_start_time",
            "invalid operating window",
        )]);
    };
    let (day_start, day_end) = (i64::from(open), i64::from(close));

    let total_minutes = day_end - day_start;
    let shift_minutes = (crew.shift_length_hours * 60.0).round() as i64;
    let shifts_per_day = total_minutes / shift_minutes;

    let mut warnings = Vec::new();
    let remainder = total_minutes % shift_minutes;
    if remainder != 0 {
        #[cfg(feature = "logging")]
        tracing::warn!(crew = %crew.name, remainder, "trailing partial shift dropped");
        warnings.push(ValidationError::new(
            "shift_length_hours",
            format!(
                "operating window of {total_minutes} min is not a multiple of the \
                 {shift_minutes} min shift length; the last {remainder} min of each day are not scheduled"
            ),
        ));
    }

    let mut shifts = Vec::new();
    let mut current = range.start;
    while current <= range.end {
        let open = at_minute(current, day_start);
        let close = at_minute(current, day_end);
        for index in 0..shifts_per_day {
            let start = open + Duration::minutes(index * shift_minutes);
            let end = (start + Duration::minutes(shift_minutes)).min(close);
            let shift = Shift::new(crew.id.clone(), start, end, crew.min_volunteers)
                .map_err(|msg| vec![ValidationError::new("shift_length_hours", msg)])?;
            shifts.push(shift);
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(ShiftBatch {
        crew_id: crew.id.clone(),
        shifts,
        warnings,
    })
}

/// Génère les créneaux de toutes les équipes, en tout-ou-rien : si une seule
/// équipe est invalide, rien n'est généré et chaque erreur est préfixée par
/// le nom de son équipe.
pub fn generate_all_shifts(
    crews: &[Crew],
    range: &FestivalRange,
) -> Result<Vec<ShiftBatch>, Vec<ValidationError>> {
    let errors: Vec<ValidationError> = crews
        .iter()
        .flat_map(|crew| {
            validate_shift_times(crew)
                .into_iter()
                .map(move |err| prefixed(crew, err))
        })
        .collect();
    if !errors.is_empty() {
        #[cfg(feature = "logging")]
        tracing::warn!(count = errors.len(), "shift generation aborted");
        return Err(errors);
    }

    let mut batches = Vec::with_capacity(crews.len());
    for crew in crews {
        let batch = generate_shifts(crew, range)
            .map_err(|errs| errs.into_iter().map(|err| prefixed(crew, err)).collect::<Vec<_>>())?;
        #[cfg(feature = "logging")]
        tracing::debug!(crew = %crew.name, shifts = batch.shifts.len(), "shifts generated");
        batches.push(batch);
    }
    Ok(batches)
}

fn at_minute(date: NaiveDate, minute: i64) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default())) + Duration::minutes(minute)
}

fn prefixed(crew: &Crew, err: ValidationError) -> ValidationError {
    ValidationError::new(err.field, format!("{}: {}", crew.name, err.message))
}
