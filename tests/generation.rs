#![forbid(unsafe_code)]
use chrono::{NaiveDate, TimeZone, Timelike, Utc};
use crewplan::{
    generate_all_shifts, generate_shifts, parse_hhmm, validate_shift_times, Crew, FestivalRange,
    ShiftStatus, ValidationError,
};

fn festival(days: u32) -> FestivalRange {
    let start = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 7, 10 + days - 1).unwrap();
    FestivalRange::new(start, end).unwrap()
}

fn bar_crew() -> Crew {
    Crew::new("Bar", "08:00", "20:00", 4.0).with_headcount(2, 5)
}

#[test]
fn three_day_festival_yields_nine_shifts() {
    let crew = bar_crew();
    let batch = generate_shifts(&crew, &festival(3)).unwrap();

    assert_eq!(batch.shifts.len(), 9);
    assert!(batch.warnings.is_empty());

    let day1: Vec<_> = batch.shifts.iter().take(3).collect();
    let h = |hour| Utc.with_ymd_and_hms(2025, 7, 10, hour, 0, 0).unwrap();
    assert_eq!((day1[0].start, day1[0].end), (h(8), h(12)));
    assert_eq!((day1[1].start, day1[1].end), (h(12), h(16)));
    assert_eq!((day1[2].start, day1[2].end), (h(16), h(20)));

    for shift in &batch.shifts {
        assert_eq!(shift.crew_id, crew.id);
        assert_eq!(shift.required_volunteers, 2);
        assert_eq!(shift.status, ShiftStatus::Open);
        assert!(shift.assigned_volunteers.is_empty());
    }
}

#[test]
fn shifts_are_chronological_and_inside_window() {
    let crew = Crew::new("Accueil", "09:30", "18:00", 2.5);
    let batch = generate_shifts(&crew, &festival(4)).unwrap();

    // 510 min / 150 min = 3 créneaux par jour
    assert_eq!(batch.shifts.len(), 3 * 4);
    for window in batch.shifts.windows(2) {
        assert!(window[0].start < window[1].start);
    }
    let open = parse_hhmm("09:30").unwrap();
    let close = parse_hhmm("18:00").unwrap();
    for shift in &batch.shifts {
        assert_eq!(shift.start.date_naive(), shift.end.date_naive());
        let start_min = shift.start.time().num_seconds_from_midnight() / 60;
        let end_min = shift.end.time().num_seconds_from_midnight() / 60;
        assert!(start_min >= open && end_min <= close);
        assert_eq!(shift.duration_minutes(), 150);
    }
}

#[test]
fn trailing_partial_period_is_dropped_with_warning() {
    let crew = Crew::new("Parking", "08:00", "19:00", 3.0);
    let batch = generate_shifts(&crew, &festival(1)).unwrap();

    assert_eq!(batch.shifts.len(), 3);
    assert_eq!(batch.warnings.len(), 1);
    assert_eq!(batch.warnings[0].field, "shift_length_hours");

    let last = batch.shifts.last().unwrap();
    assert_eq!(last.end, Utc.with_ymd_and_hms(2025, 7, 10, 17, 0, 0).unwrap());
}

#[test]
fn generation_is_repeatable() {
    let crew = bar_crew();
    let a = generate_shifts(&crew, &festival(2)).unwrap();
    let b = generate_shifts(&crew, &festival(2)).unwrap();

    assert_eq!(a.shifts.len(), b.shifts.len());
    for (x, y) in a.shifts.iter().zip(&b.shifts) {
        assert_eq!((x.start, x.end), (y.start, y.end));
        assert_ne!(x.id, y.id);
    }
}

#[test]
fn shift_windows_snapshot() {
    let crew = Crew::new("Scène", "10:00", "22:00", 6.0);
    let batch = generate_shifts(&crew, &festival(2)).unwrap();
    let rendered = batch
        .shifts
        .iter()
        .map(|s| format!("{} {}-{}", s.start.date_naive(), s.start.format("%H:%M"), s.end.format("%H:%M")))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(rendered, @r"
    2025-07-10 10:00-16:00
    2025-07-10 16:00-22:00
    2025-07-11 10:00-16:00
    2025-07-11 16:00-22:00
    ");
}

#[test]
fn invalid_crew_produces_no_shifts_and_every_error() {
    let crew = Crew::new("Cuisine", "8h00", "07:00", 0.5);
    let errors = generate_shifts(&crew, &festival(3)).unwrap_err();

    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["operating_start_time", "shift_length_hours"]);
}

#[test]
fn validation_rules() {
    let check = |start: &str, end: &str, hours: f64| -> Vec<ValidationError> {
        validate_shift_times(&Crew::new("X", start, end, hours))
    };

    assert!(check("08:00", "20:00", 4.0).is_empty());
    assert!(check("00:00", "23:59", 12.0).is_empty());

    let errs = check("24:00", "20:00", 4.0);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].field, "operating_start_time");
    assert!(errs[0].message.contains("hour"));

    let errs = check("08:00", "20:60", 4.0);
    assert_eq!(errs[0].field, "operating_end_time");
    assert!(errs[0].message.contains("minute"));

    let errs = check("20:00", "08:00", 4.0);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].field, "operating_end_time");

    let errs = check("08:00", "08:00", 4.0);
    assert_eq!(errs.len(), 1);

    assert_eq!(check("08:00", "22:00", 0.99).len(), 1);
    assert_eq!(check("08:00", "22:00", 12.5).len(), 1);
    assert_eq!(check("08:00", "22:00", f64::NAN).len(), 1);
    assert_eq!(check("", "abc", 4.0).len(), 2);
}

#[test]
fn bulk_generation_is_all_or_nothing() {
    let good = bar_crew();
    let bad = Crew::new("Sécurité", "22:00", "06:00", 4.0);

    let errors = generate_all_shifts(&[good.clone(), bad], &festival(2)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Sécurité: "));

    let batches = generate_all_shifts(&[good.clone()], &festival(2)).unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].crew_id, good.id);
    assert_eq!(batches[0].shifts.len(), 6);

    assert!(generate_all_shifts(&[], &festival(2)).unwrap().is_empty());
}

#[test]
fn festival_range_must_not_be_inverted() {
    let start = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
    assert!(FestivalRange::new(start, end).is_err());
    assert_eq!(festival(3).num_days(), 3);
}
