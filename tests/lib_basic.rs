#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use crewplan::{
    model::{Availability, Crew, FestivalRange, Volunteer},
    scheduler::{Conflict, SchedError},
    Scheduler,
};

fn festival() -> FestivalRange {
    FestivalRange::new(
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
    )
    .unwrap()
}

fn all_week() -> Availability {
    Availability::new(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        "07:00",
        "23:00",
    )
}

#[test]
fn generate_assign_and_check() {
    let mut s = Scheduler::new();
    let bar = Crew::new("Bar", "08:00", "20:00", 4.0)
        .with_skills(["bar"])
        .with_headcount(1, 2);
    let tech = Crew::new("Tech", "10:00", "22:00", 6.0)
        .with_skills(["sound"])
        .with_headcount(2, 2);
    s.add_crews(vec![bar.clone(), tech.clone()]);

    let alice = Volunteer::new("alice", all_week()).with_skills(["bar"]);
    let bob = Volunteer::new("bob", all_week()).with_skills(["sound"]);
    s.add_volunteers(vec![alice.clone(), bob.clone()]);

    assert!(matches!(s.generate_all_shifts(), Err(SchedError::MissingFestival)));

    s.set_festival(festival());
    let warnings = s.generate_all_shifts().unwrap();
    assert!(warnings.is_empty());
    // 3 jours × (3 créneaux bar + 2 créneaux tech)
    assert_eq!(s.plan().shifts.len(), 15);

    let unassigned = s.auto_assign_crews(None);
    assert!(unassigned.is_empty());
    assert_eq!(
        s.plan().find_volunteer_by_name("alice").unwrap().assigned_crew,
        Some(bar.id.clone())
    );

    let first_bar = s.plan().shifts_for_crew(&bar.id).next().unwrap().id.clone();
    let outcome = s.assign_to_shift(&first_bar, &alice.id).unwrap();
    assert!(outcome.is_success());

    let first_tech = s.plan().shifts_for_crew(&tech.id).next().unwrap().id.clone();
    let outcome = s.assign_to_shift(&first_tech, &alice.id).unwrap();
    assert!(!outcome.is_success());

    assert!(s.detect_conflicts().is_empty());

    assert!(s.remove_from_shift(&first_bar, &alice.id).unwrap());
    assert!(s.assign_to_shift(&first_tech, &alice.id).unwrap().is_success());
}

#[test]
fn invalid_crew_aborts_bulk_generation_and_keeps_existing_shifts() {
    let mut s = Scheduler::new();
    s.set_festival(festival());
    s.add_crews(vec![Crew::new("Bar", "08:00", "20:00", 4.0)]);
    s.generate_all_shifts().unwrap();
    assert_eq!(s.plan().shifts.len(), 9);

    s.add_crews(vec![Crew::new("Night", "20:00", "08:00", 4.0)]);
    match s.generate_all_shifts() {
        Err(SchedError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.starts_with("Night: "));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(s.plan().shifts.len(), 9);
}

#[test]
fn regenerate_single_crew_replaces_only_its_shifts() {
    let mut s = Scheduler::new();
    s.set_festival(festival());
    let bar = Crew::new("Bar", "08:00", "20:00", 4.0);
    let gate = Crew::new("Gate", "08:00", "20:00", 6.0);
    s.add_crews(vec![bar.clone(), gate.clone()]);
    s.generate_all_shifts().unwrap();
    let gate_ids: Vec<_> = s.plan().shifts_for_crew(&gate.id).map(|x| x.id.clone()).collect();

    s.plan_mut().crews[0].shift_length_hours = 3.0;
    let warnings = s.regenerate_crew(&bar.id).unwrap();
    assert!(warnings.is_empty());

    assert_eq!(s.plan().shifts_for_crew(&bar.id).count(), 12);
    let kept: Vec<_> = s.plan().shifts_for_crew(&gate.id).map(|x| x.id.clone()).collect();
    assert_eq!(kept, gate_ids);
}

#[test]
fn detect_overlap_and_broken_links() {
    let mut s = Scheduler::new();
    s.set_festival(festival());
    let bar = Crew::new("Bar", "08:00", "20:00", 4.0).with_headcount(1, 1);
    let tech = Crew::new("Tech", "10:00", "14:00", 4.0);
    s.add_crews(vec![bar.clone(), tech.clone()]);
    let alice = Volunteer::new("alice", all_week());
    s.add_volunteers(vec![alice.clone()]);
    s.generate_all_shifts().unwrap();

    // affectations manuelles, hors règles
    {
        let plan = s.plan_mut();
        let bar_shift = plan.shifts.iter().position(|x| x.crew_id == bar.id).unwrap();
        let tech_shift = plan.shifts.iter().position(|x| x.crew_id == tech.id).unwrap();
        plan.shifts[bar_shift].assigned_volunteers.push(alice.id.clone());
        plan.shifts[tech_shift].assigned_volunteers.push(alice.id.clone());
        plan.volunteers[0].assigned_crew = Some(tech.id.clone());
    }

    let conflicts = s.detect_conflicts();
    assert!(conflicts
        .iter()
        .any(|c| matches!(c, Conflict::Overlap { volunteer, .. } if volunteer == &alice.id)));
    assert!(conflicts
        .iter()
        .any(|c| matches!(c, Conflict::BrokenCrewLink { crew, .. } if crew == &tech.id)));
}
