use super::scoring::{best_skill_match, skill_match};
use super::types::{AssignProgress, CrewAssignment};
use crate::model::{Crew, Volunteer};

/// Répartit les bénévoles dans les équipes par score de compétences.
///
/// Repart toujours d'une page blanche : les affectations existantes sont
/// effacées. Les bénévoles sont traités par meilleur score décroissant (ordre
/// d'entrée conservé à égalité), chacun rejoint l'équipe non pleine où son
/// score est le plus haut, à condition qu'il soit > 0. Glouton, sans retour
/// arrière.
pub fn auto_assign_volunteers_to_crews(
    volunteers: &[Volunteer],
    crews: &[Crew],
    mut progress: Option<&mut dyn FnMut(AssignProgress)>,
) -> CrewAssignment {
    let mut volunteers = volunteers.to_vec();
    let mut crews = crews.to_vec();
    for volunteer in volunteers.iter_mut() {
        volunteer.assigned_crew = None;
    }
    for crew in crews.iter_mut() {
        crew.assigned_volunteers.clear();
    }

    let mut order: Vec<(usize, f64)> = volunteers
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx, best_skill_match(v, &crews)))
        .collect();
    // sort_by est stable : l'ordre d'entrée départage les égalités
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total = order.len();
    let mut unassigned = Vec::new();

    for (processed, (idx, _)) in order.into_iter().enumerate() {
        let volunteer = &mut volunteers[idx];

        let mut best: Option<(usize, f64)> = None;
        for (crew_idx, crew) in crews.iter().enumerate() {
            if crew.is_full() {
                continue;
            }
            let score = skill_match(volunteer, crew);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((crew_idx, score));
            }
        }

        match best {
            Some((crew_idx, score)) if score > 0.0 => {
                let crew = &mut crews[crew_idx];
                volunteer.assigned_crew = Some(crew.id.clone());
                crew.assigned_volunteers.push(volunteer.id.clone());
                #[cfg(feature = "logging")]
                tracing::debug!(volunteer = %volunteer.name, crew = %crew.name, score, "volunteer placed");
            }
            _ => {
                #[cfg(feature = "logging")]
                tracing::debug!(volunteer = %volunteer.name, "no matching crew");
                unassigned.push(volunteer.id.clone());
            }
        }

        if let Some(report) = progress.as_mut() {
            report(AssignProgress {
                processed: processed + 1,
                total,
                volunteer: volunteer.id.clone(),
                crew: volunteer.assigned_crew.clone(),
            });
        }
    }

    CrewAssignment {
        volunteers,
        crews,
        unassigned,
    }
}
