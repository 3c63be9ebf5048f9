use crate::model::{Crew, CrewId, Shift, ShiftId, ShiftStatus, Volunteer, VolunteerId};
use crate::validation::ValidationError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Créneaux produits pour une équipe, avec les avertissements non bloquants.
#[derive(Debug, Clone)]
pub struct ShiftBatch {
    pub crew_id: CrewId,
    pub shifts: Vec<Shift>,
    pub warnings: Vec<ValidationError>,
}

/// Motif de refus d'une affectation à un créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignFailure {
    NotAvailable,
    ConflictingShifts,
    ShiftFilled,
    AlreadyAssigned,
}

impl fmt::Display for AssignFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssignFailure::NotAvailable => "not available during this shift time",
            AssignFailure::ConflictingShifts => "has conflicting shifts",
            AssignFailure::ShiftFilled => "shift is already filled",
            AssignFailure::AlreadyAssigned => "is already assigned to this shift",
        })
    }
}

/// Résultat d'une tentative d'affectation : jamais partiel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignOutcome {
    Assigned { status: ShiftStatus },
    Rejected { reasons: Vec<AssignFailure> },
}

impl AssignOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AssignOutcome::Assigned { .. })
    }

    pub fn reasons(&self) -> &[AssignFailure] {
        match self {
            AssignOutcome::Assigned { .. } => &[],
            AssignOutcome::Rejected { reasons } => reasons,
        }
    }
}

/// Avancement de l'affectation automatique, émis après chaque bénévole traité.
#[derive(Debug, Clone)]
pub struct AssignProgress {
    pub processed: usize,
    pub total: usize,
    pub volunteer: VolunteerId,
    pub crew: Option<CrewId>,
}

/// Résultat de l'affectation automatique bénévoles → équipes.
#[derive(Debug, Clone)]
pub struct CrewAssignment {
    pub volunteers: Vec<Volunteer>,
    pub crews: Vec<Crew>,
    pub unassigned: Vec<VolunteerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Deux créneaux qui se chevauchent pour le même bénévole
    Overlap {
        volunteer: VolunteerId,
        shift_a: ShiftId,
        shift_b: ShiftId,
    },
    /// Plus de bénévoles que requis sur un créneau
    OverFilled {
        shift: ShiftId,
        assigned: usize,
        required: u32,
    },
    /// Équipe au-delà de son effectif maximal
    CrewOverCapacity {
        crew: CrewId,
        assigned: usize,
        max: u32,
    },
    /// Lien bénévole ↔ équipe incohérent
    BrokenCrewLink {
        volunteer: VolunteerId,
        crew: CrewId,
    },
}

impl Conflict {
    pub fn kind(&self) -> &'static str {
        match self {
            Conflict::Overlap { .. } => "overlap",
            Conflict::OverFilled { .. } => "overfilled",
            Conflict::CrewOverCapacity { .. } => "crew_capacity",
            Conflict::BrokenCrewLink { .. } => "crew_link",
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Overlap {
                volunteer,
                shift_a,
                shift_b,
            } => write!(
                f,
                "volunteer {} has overlapping shifts {} and {}",
                volunteer.as_str(),
                shift_a.as_str(),
                shift_b.as_str()
            ),
            Conflict::OverFilled {
                shift,
                assigned,
                required,
            } => write!(
                f,
                "shift {} has {assigned} volunteers for {required} required",
                shift.as_str()
            ),
            Conflict::CrewOverCapacity {
                crew,
                assigned,
                max,
            } => write!(
                f,
                "crew {} has {assigned} volunteers for a maximum of {max}",
                crew.as_str()
            ),
            Conflict::BrokenCrewLink { volunteer, crew } => write!(
                f,
                "volunteer {} and crew {} do not reference each other",
                volunteer.as_str(),
                crew.as_str()
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("festival date range is not set")]
    MissingFestival,
    #[error("unknown crew: {0}")]
    UnknownCrew(String),
    #[error("unknown volunteer: {0}")]
    UnknownVolunteer(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("shift generation aborted: {} validation error(s)", .0.len())]
    Validation(Vec<ValidationError>),
    #[error("swap invalid: {0}")]
    SwapInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
