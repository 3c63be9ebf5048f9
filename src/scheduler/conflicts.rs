use super::{util, Conflict};
use crate::model::{Plan, Shift};

/// Audit d'un plan : chevauchements, créneaux ou équipes en surnombre, liens
/// bénévole ↔ équipe incohérents.
pub fn detect_conflicts(plan: &Plan) -> Vec<Conflict> {
    let mut out = Vec::new();

    for volunteer in plan.volunteers.iter() {
        let mut shifts: Vec<&Shift> = plan
            .shifts
            .iter()
            .filter(|s| s.has_volunteer(&volunteer.id))
            .collect();
        shifts.sort_by_key(|s| s.start);

        for (idx, a) in shifts.iter().enumerate() {
            for b in shifts.iter().skip(idx + 1) {
                if util::overlaps(a.start, a.end, b.start, b.end) {
                    out.push(Conflict::Overlap {
                        volunteer: volunteer.id.clone(),
                        shift_a: a.id.clone(),
                        shift_b: b.id.clone(),
                    });
                }
            }
        }

        if let Some(crew_id) = &volunteer.assigned_crew {
            let linked = plan
                .find_crew_by_id(crew_id)
                .is_some_and(|crew| crew.assigned_volunteers.contains(&volunteer.id));
            if !linked {
                out.push(Conflict::BrokenCrewLink {
                    volunteer: volunteer.id.clone(),
                    crew: crew_id.clone(),
                });
            }
        }
    }

    for shift in plan.shifts.iter() {
        if shift.assigned_volunteers.len() > shift.required_volunteers as usize {
            out.push(Conflict::OverFilled {
                shift: shift.id.clone(),
                assigned: shift.assigned_volunteers.len(),
                required: shift.required_volunteers,
            });
        }
    }

    for crew in plan.crews.iter() {
        if crew.assigned_volunteers.len() > crew.max_volunteers as usize {
            out.push(Conflict::CrewOverCapacity {
                crew: crew.id.clone(),
                assigned: crew.assigned_volunteers.len(),
                max: crew.max_volunteers,
            });
        }
        for volunteer_id in crew.assigned_volunteers.iter() {
            let linked = plan
                .find_volunteer_by_id(volunteer_id)
                .is_some_and(|v| v.assigned_crew.as_ref() == Some(&crew.id));
            if !linked {
                out.push(Conflict::BrokenCrewLink {
                    volunteer: volunteer_id.clone(),
                    crew: crew.id.clone(),
                });
            }
        }
    }

    out
}
