use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Crew
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrewId(String);

impl CrewId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Volunteer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VolunteerId(String);

impl VolunteerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Équipe de bénévoles : compétences requises, effectif [min, max] et
/// fenêtre d'ouverture quotidienne découpée en créneaux.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: CrewId,
    pub name: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub min_volunteers: u32,
    pub max_volunteers: u32,
    /// "HH:MM" (24h)
    pub operating_start_time: String,
    /// "HH:MM" (24h)
    pub operating_end_time: String,
    pub shift_length_hours: f64,
    #[serde(default)]
    pub assigned_volunteers: Vec<VolunteerId>,
}

impl Crew {
    pub fn new<N: Into<String>, S: Into<String>, E: Into<String>>(
        name: N,
        operating_start_time: S,
        operating_end_time: E,
        shift_length_hours: f64,
    ) -> Self {
        Self {
            id: CrewId::random(),
            name: name.into(),
            required_skills: Vec::new(),
            min_volunteers: 1,
            max_volunteers: 1,
            operating_start_time: operating_start_time.into(),
            operating_end_time: operating_end_time.into(),
            shift_length_hours,
            assigned_volunteers: Vec::new(),
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_headcount(mut self, min: u32, max: u32) -> Self {
        self.min_volunteers = min;
        self.max_volunteers = max;
        self
    }

    pub fn is_full(&self) -> bool {
        self.assigned_volunteers.len() >= self.max_volunteers as usize
    }
}

/// Disponibilités d'un bénévole : jours de la semaine + plage horaire
/// quotidienne, éventuellement bornées par des dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub days: Vec<Weekday>,
    /// "HH:MM" (24h)
    pub start_time: String,
    /// "HH:MM" (24h)
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Availability {
    pub fn new<S: Into<String>, E: Into<String>>(
        days: Vec<Weekday>,
        start_time: S,
        end_time: E,
    ) -> Self {
        Self {
            days,
            start_time: start_time.into(),
            end_time: end_time.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Vrai si `date` tombe dans la plage de dates (bornes incluses, absentes = ouvertes).
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |d| d <= date) && self.end_date.map_or(true, |d| date <= d)
    }
}

/// Bénévole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_crew: Option<CrewId>,
}

impl Volunteer {
    pub fn new<N: Into<String>>(name: N, availability: Availability) -> Self {
        Self {
            id: VolunteerId::random(),
            name: name.into(),
            skills: Vec::new(),
            availability,
            assigned_crew: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    #[default]
    Open,
    Filled,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Filled => "filled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }
}

/// Créneau généré pour une équipe (UTC, intervalle [start, end)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub crew_id: CrewId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub required_volunteers: u32,
    #[serde(default)]
    pub assigned_volunteers: Vec<VolunteerId>,
    #[serde(default)]
    pub status: ShiftStatus,
}

impl Shift {
    /// Crée un créneau ouvert en validant que `end > start`.
    pub fn new(
        crew_id: CrewId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        required_volunteers: u32,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            crew_id,
            start,
            end,
            required_volunteers,
            assigned_volunteers: Vec::new(),
            status: ShiftStatus::Open,
        })
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn has_volunteer(&self, id: &VolunteerId) -> bool {
        self.assigned_volunteers.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.assigned_volunteers.len() >= self.required_volunteers as usize
    }
}

/// Période du festival, dates incluses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FestivalRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Self> {
        if end < start {
            bail!("festival end date must not be before start date");
        }
        Ok(Self { start, end })
    }

    /// Nombre de jours, bornes incluses (0 si la plage est inversée).
    pub fn num_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

/// Instantané complet manipulé par l'appelant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festival: Option<FestivalRange>,
    #[serde(default)]
    pub crews: Vec<Crew>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Plan {
    pub fn find_crew_by_name<'a>(&'a self, name: &str) -> Option<&'a Crew> {
        self.crews.iter().find(|c| c.name == name)
    }
    pub fn find_crew_by_id<'a>(&'a self, id: &CrewId) -> Option<&'a Crew> {
        self.crews.iter().find(|c| &c.id == id)
    }
    pub fn find_volunteer_by_name<'a>(&'a self, name: &str) -> Option<&'a Volunteer> {
        self.volunteers.iter().find(|v| v.name == name)
    }
    pub fn find_volunteer_by_id<'a>(&'a self, id: &VolunteerId) -> Option<&'a Volunteer> {
        self.volunteers.iter().find(|v| &v.id == id)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_mut(&mut self, id: &ShiftId) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| &s.id == id)
    }
    pub fn shifts_for_crew<'a>(&'a self, crew: &'a CrewId) -> impl Iterator<Item = &'a Shift> {
        self.shifts.iter().filter(move |s| &s.crew_id == crew)
    }
}
