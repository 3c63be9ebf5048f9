#![forbid(unsafe_code)]
//! Crewplan — planification des bénévoles d'un festival (sans BD).
//!
//! - Génération des créneaux à partir des horaires d'ouverture des équipes.
//! - Affectation gloutonne bénévoles → équipes par score de compétences.
//! - Affectation fine aux créneaux : disponibilités, chevauchements, capacité.
//! - Fonctions pures sur des instantanés ; stockage fichiers (JSON/CSV) en dehors du cœur.

pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod validation;

pub use model::{
    Availability, Crew, CrewId, FestivalRange, Plan, Shift, ShiftId, ShiftStatus, Volunteer,
    VolunteerId,
};
pub use scheduler::{
    assign_volunteer_to_shift, auto_assign_volunteers_to_crews, detect_conflicts,
    generate_all_shifts, generate_shifts, remove_volunteer_from_shift, skill_match,
    swap_shift_volunteer, AssignFailure, AssignOutcome, AssignProgress, Conflict, SchedError,
    Scheduler, ShiftBatch,
};
pub use storage::{JsonStorage, Storage};
pub use validation::{parse_hhmm, validate_shift_times, ValidationError};
