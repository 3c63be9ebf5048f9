mod conflicts;
mod crews;
mod generate;
mod scoring;
mod shifts;
mod types;
mod util;

pub use conflicts::detect_conflicts;
pub use crews::auto_assign_volunteers_to_crews;
pub use generate::{generate_all_shifts, generate_shifts};
pub use scoring::{best_skill_match, skill_match};
pub use shifts::{
    assign_volunteer_to_shift, check_shift_assignment, remove_volunteer_from_shift,
    swap_shift_volunteer,
};
pub use types::{
    AssignFailure, AssignOutcome, AssignProgress, Conflict, CrewAssignment, SchedError,
    ShiftBatch,
};

use crate::model::{Crew, CrewId, FestivalRange, Plan, ShiftId, Volunteer, VolunteerId};
use crate::validation::ValidationError;

/// Scheduler : encapsule un Plan en cours de construction
///
/// Toutes les opérations délèguent aux fonctions pures du module ; le
/// Scheduler ne garde aucun état en dehors du plan lui-même.
#[derive(Debug, Default)]
pub struct Scheduler {
    plan: Plan,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            plan: Plan::default(),
        }
    }

    pub fn with_plan(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }
    pub fn plan_mut(&mut self) -> &mut Plan {
        &mut self.plan
    }
    pub fn into_plan(self) -> Plan {
        self.plan
    }

    pub fn add_crews(&mut self, crews: Vec<Crew>) {
        self.plan.crews.extend(crews);
    }

    pub fn add_volunteers(&mut self, volunteers: Vec<Volunteer>) {
        self.plan.volunteers.extend(volunteers);
    }

    pub fn set_festival(&mut self, range: FestivalRange) {
        self.plan.festival = Some(range);
    }

    fn festival(&self) -> Result<FestivalRange, SchedError> {
        self.plan.festival.ok_or(SchedError::MissingFestival)
    }

    /// Régénère les créneaux de toutes les équipes (tout-ou-rien).
    ///
    /// Retourne les avertissements non bloquants, préfixés par le nom de l'équipe.
    pub fn generate_all_shifts(&mut self) -> Result<Vec<ValidationError>, SchedError> {
        let range = self.festival()?;
        let batches =
            generate::generate_all_shifts(&self.plan.crews, &range).map_err(SchedError::Validation)?;

        let mut warnings = Vec::new();
        self.plan.shifts.clear();
        for batch in batches {
            if let Some(crew) = self.plan.find_crew_by_id(&batch.crew_id) {
                warnings.extend(batch.warnings.into_iter().map(|w| {
                    ValidationError::new(w.field, format!("{}: {}", crew.name, w.message))
                }));
            }
            self.plan.shifts.extend(batch.shifts);
        }
        Ok(warnings)
    }

    /// Remplace les créneaux d'une seule équipe.
    pub fn regenerate_crew(&mut self, crew_id: &CrewId) -> Result<Vec<ValidationError>, SchedError> {
        let range = self.festival()?;
        let crew = self
            .plan
            .find_crew_by_id(crew_id)
            .ok_or_else(|| SchedError::UnknownCrew(crew_id.as_str().to_string()))?;
        let batch = generate::generate_shifts(crew, &range).map_err(SchedError::Validation)?;

        self.plan.shifts.retain(|s| &s.crew_id != crew_id);
        self.plan.shifts.extend(batch.shifts);
        self.plan.shifts.sort_by_key(|s| s.start);
        Ok(batch.warnings)
    }

    pub fn auto_assign_crews(
        &mut self,
        progress: Option<&mut dyn FnMut(AssignProgress)>,
    ) -> Vec<VolunteerId> {
        let result =
            crews::auto_assign_volunteers_to_crews(&self.plan.volunteers, &self.plan.crews, progress);
        self.plan.volunteers = result.volunteers;
        self.plan.crews = result.crews;
        result.unassigned
    }

    pub fn assign_to_shift(
        &mut self,
        shift_id: &ShiftId,
        volunteer_id: &VolunteerId,
    ) -> Result<AssignOutcome, SchedError> {
        let volunteer = self
            .plan
            .volunteers
            .iter()
            .find(|v| &v.id == volunteer_id)
            .ok_or_else(|| SchedError::UnknownVolunteer(volunteer_id.as_str().to_string()))?;
        shifts::assign_volunteer_to_shift(&mut self.plan.shifts, shift_id, volunteer)
    }

    pub fn remove_from_shift(
        &mut self,
        shift_id: &ShiftId,
        volunteer_id: &VolunteerId,
    ) -> Result<bool, SchedError> {
        let shift = self
            .plan
            .find_shift_mut(shift_id)
            .ok_or_else(|| SchedError::UnknownShift(shift_id.as_str().to_string()))?;
        Ok(shifts::remove_volunteer_from_shift(shift, volunteer_id))
    }

    pub fn swap(
        &mut self,
        shift_id: &ShiftId,
        current: &VolunteerId,
        replacement: &VolunteerId,
    ) -> Result<AssignOutcome, SchedError> {
        let volunteer = self
            .plan
            .volunteers
            .iter()
            .find(|v| &v.id == replacement)
            .ok_or_else(|| SchedError::UnknownVolunteer(replacement.as_str().to_string()))?;
        shifts::swap_shift_volunteer(&mut self.plan.shifts, shift_id, current, volunteer)
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.plan)
    }
}
