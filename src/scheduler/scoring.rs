use crate::model::{Crew, Volunteer};
use std::collections::HashSet;

/// Pourcentage (0–100) des compétences requises par l'équipe que possède le
/// bénévole. Une équipe sans compétence requise donne 0.
pub fn skill_match(volunteer: &Volunteer, crew: &Crew) -> f64 {
    let required: HashSet<&str> = crew.required_skills.iter().map(String::as_str).collect();
    if required.is_empty() {
        return 0.0;
    }
    let held: HashSet<&str> = volunteer
        .skills
        .iter()
        .map(String::as_str)
        .filter(|skill| required.contains(skill))
        .collect();
    (held.len() as f64 / required.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Meilleur score du bénévole toutes équipes confondues.
pub fn best_skill_match(volunteer: &Volunteer, crews: &[Crew]) -> f64 {
    crews
        .iter()
        .map(|crew| skill_match(volunteer, crew))
        .fold(0.0, f64::max)
}
