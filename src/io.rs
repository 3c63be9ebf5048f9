use crate::model::{Availability, Crew, Plan, Volunteer};
use anyhow::{bail, Context};
use chrono::{NaiveDate, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'équipes depuis CSV: header
/// `name,required_skills,min_volunteers,max_volunteers,operating_start_time,operating_end_time,shift_length_hours`
///
/// Les horaires sont importés tels quels : ils sont validés à la génération.
pub fn import_crews_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Crew>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid crew row (empty name)");
        }
        let skills = parse_list(rec.get(1).unwrap_or(""));
        let min: u32 = rec
            .get(2)
            .context("missing min_volunteers")?
            .trim()
            .parse()
            .with_context(|| format!("invalid min_volunteers for crew {name}"))?;
        let max: u32 = rec
            .get(3)
            .context("missing max_volunteers")?
            .trim()
            .parse()
            .with_context(|| format!("invalid max_volunteers for crew {name}"))?;
        if max < min {
            bail!("max_volunteers below min_volunteers for crew {name}");
        }
        let start = rec.get(4).context("missing operating_start_time")?.trim();
        let end = rec.get(5).context("missing operating_end_time")?.trim();
        let hours: f64 = rec
            .get(6)
            .context("missing shift_length_hours")?
            .trim()
            .parse()
            .with_context(|| format!("invalid shift_length_hours for crew {name}"))?;

        let crew = Crew::new(name, start, end, hours)
            .with_skills(skills)
            .with_headcount(min, max);
        out.push(crew);
    }
    Ok(out)
}

/// Import de bénévoles depuis CSV: header
/// `name,skills,days,start_time,end_time[,start_date][,end_date]`
pub fn import_volunteers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Volunteer>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid volunteer row (empty name)");
        }
        let skills = parse_list(rec.get(1).unwrap_or(""));
        let days = parse_days(rec.get(2).context("missing days")?)
            .with_context(|| format!("invalid days for volunteer {name}"))?;
        let start = rec.get(3).context("missing start_time")?.trim();
        let end = rec.get(4).context("missing end_time")?.trim();

        let mut availability = Availability::new(days, start, end);
        availability.start_date = parse_optional_date(rec.get(5))
            .with_context(|| format!("invalid start_date for volunteer {name}"))?;
        availability.end_date = parse_optional_date(rec.get(6))
            .with_context(|| format!("invalid end_date for volunteer {name}"))?;

        out.push(Volunteer::new(name, availability).with_skills(skills));
    }
    Ok(out)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_days(raw: &str) -> anyhow::Result<Vec<Weekday>> {
    parse_list(raw)
        .iter()
        .map(|day| {
            day.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("unknown weekday: {day}"))
        })
        .collect()
}

fn parse_optional_date(raw: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .with_context(|| format!("invalid date: {s}")),
    }
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des créneaux: header `id,crew,start,end,required,assigned,status`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id", "crew", "start", "end", "required", "assigned", "status",
    ])?;
    for s in &plan.shifts {
        let crew = plan
            .find_crew_by_id(&s.crew_id)
            .map(|c| c.name.as_str())
            .unwrap_or("");
        let assigned = s
            .assigned_volunteers
            .iter()
            .filter_map(|vid| plan.find_volunteer_by_id(vid))
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let start = s.start.to_rfc3339();
        let end = s.end.to_rfc3339();
        let required = s.required_volunteers.to_string();
        w.write_record([
            s.id.as_str(),
            crew,
            start.as_str(),
            end.as_str(),
            required.as_str(),
            assigned.as_str(),
            s.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
