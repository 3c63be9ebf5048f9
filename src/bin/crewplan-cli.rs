#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crewplan::{
    io,
    model::{FestivalRange, ShiftId, VolunteerId},
    scheduler::{AssignOutcome, AssignProgress, Scheduler},
    storage::{JsonStorage, Storage},
    validation::validate_shift_times,
};
use std::collections::HashMap;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des bénévoles (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des équipes depuis un CSV
    ImportCrews {
        #[arg(long)]
        csv: String,
    },

    /// Importer des bénévoles depuis un CSV
    ImportVolunteers {
        #[arg(long)]
        csv: String,
    },

    /// Fixer les dates du festival (YYYY-MM-DD, incluses)
    SetFestival {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },

    /// Vérifier les horaires de toutes les équipes
    Validate,

    /// Générer les créneaux (toutes les équipes, ou une seule)
    Generate {
        /// nom de l'équipe
        #[arg(long)]
        crew: Option<String>,
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// Répartir automatiquement les bénévoles dans les équipes
    AutoAssign {
        /// Affiche l'avancement bénévole par bénévole
        #[arg(long)]
        progress: bool,
    },

    /// Affecter un bénévole à un créneau
    Assign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        volunteer: String,
    },

    /// Retirer un bénévole d'un créneau
    Unassign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        volunteer: String,
    },

    /// Échanger un bénévole contre un autre sur un créneau
    Swap {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        volunteer: String,
        #[arg(long)]
        with: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les conflits
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn volunteer_id(scheduler: &Scheduler, name: &str) -> Result<VolunteerId> {
    scheduler
        .plan()
        .find_volunteer_by_name(name)
        .map(|v| v.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown volunteer: {}", name))
}

fn report_outcome(outcome: &AssignOutcome, volunteer: &str) -> i32 {
    match outcome {
        AssignOutcome::Assigned { status } => {
            println!("OK: {} assigned (shift {})", volunteer, status.as_str());
            0
        }
        AssignOutcome::Rejected { reasons } => {
            for reason in reasons {
                eprintln!("{volunteer} {reason}");
            }
            2
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;
    let mut scheduler = if storage.exists() {
        Scheduler::with_plan(storage.load()?)
    } else {
        Scheduler::new()
    };

    let code = match cli.cmd {
        Commands::ImportCrews { csv } => {
            let crews = io::import_crews_csv(csv)?;
            println!("{} crew(s) imported", crews.len());
            scheduler.add_crews(crews);
            storage.save(scheduler.plan())?;
            0
        }
        Commands::ImportVolunteers { csv } => {
            let volunteers = io::import_volunteers_csv(csv)?;
            println!("{} volunteer(s) imported", volunteers.len());
            scheduler.add_volunteers(volunteers);
            storage.save(scheduler.plan())?;
            0
        }
        Commands::SetFestival { start, end } => {
            scheduler.set_festival(FestivalRange::new(start, end)?);
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Validate => {
            let mut failed = 0;
            for crew in &scheduler.plan().crews {
                for err in validate_shift_times(crew) {
                    eprintln!("{}: {}", crew.name, err);
                    failed += 1;
                }
            }
            if failed == 0 {
                println!("OK: all crews valid");
                0
            } else {
                2
            }
        }
        Commands::Generate { crew, start, end } => {
            if let (Some(start), Some(end)) = (start, end) {
                scheduler.set_festival(FestivalRange::new(start, end)?);
            }
            let result = match crew {
                Some(name) => {
                    let id = scheduler
                        .plan()
                        .find_crew_by_name(&name)
                        .map(|c| c.id.clone())
                        .ok_or_else(|| anyhow::anyhow!("unknown crew: {}", name))?;
                    scheduler.regenerate_crew(&id)
                }
                None => scheduler.generate_all_shifts(),
            };
            match result {
                Ok(warnings) => {
                    for w in &warnings {
                        eprintln!("warning: {w}");
                    }
                    storage.save(scheduler.plan())?;
                    println!("{} shift(s) in plan", scheduler.plan().shifts.len());
                    0
                }
                Err(crewplan::SchedError::Validation(errors)) => {
                    eprintln!("Shift generation aborted:");
                    for e in &errors {
                        eprintln!("  {e}");
                    }
                    2
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::AutoAssign { progress } => {
            let volunteer_names: HashMap<VolunteerId, String> = scheduler
                .plan()
                .volunteers
                .iter()
                .map(|v| (v.id.clone(), v.name.clone()))
                .collect();
            let crew_names: HashMap<_, String> = scheduler
                .plan()
                .crews
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect();
            let mut print = |p: AssignProgress| {
                let crew = p
                    .crew
                    .as_ref()
                    .and_then(|c| crew_names.get(c))
                    .map(String::as_str)
                    .unwrap_or("-");
                let name = volunteer_names
                    .get(&p.volunteer)
                    .map(String::as_str)
                    .unwrap_or("?");
                println!("[{}/{}] {} → {}", p.processed, p.total, name, crew);
            };
            let unassigned = if progress {
                scheduler.auto_assign_crews(Some(&mut print))
            } else {
                scheduler.auto_assign_crews(None)
            };
            storage.save(scheduler.plan())?;
            if unassigned.is_empty() {
                println!("OK: every volunteer placed");
                0
            } else {
                eprintln!("{} volunteer(s) without matching crew", unassigned.len());
                2
            }
        }
        Commands::Assign {
            shift_id,
            volunteer,
        } => {
            let vid = volunteer_id(&scheduler, &volunteer)?;
            let outcome = scheduler.assign_to_shift(&ShiftId::new(shift_id), &vid)?;
            if outcome.is_success() {
                storage.save(scheduler.plan())?;
            }
            report_outcome(&outcome, &volunteer)
        }
        Commands::Unassign {
            shift_id,
            volunteer,
        } => {
            let vid = volunteer_id(&scheduler, &volunteer)?;
            if !scheduler.remove_from_shift(&ShiftId::new(shift_id), &vid)? {
                eprintln!("{volunteer} was not on this shift");
            }
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Swap {
            shift_id,
            volunteer,
            with,
        } => {
            let current = volunteer_id(&scheduler, &volunteer)?;
            let replacement = volunteer_id(&scheduler, &with)?;
            let outcome = scheduler.swap(&ShiftId::new(shift_id), &current, &replacement)?;
            if outcome.is_success() {
                storage.save(scheduler.plan())?;
            }
            report_outcome(&outcome, &with)
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_plan_json(path, scheduler.plan())?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, scheduler.plan())?;
            }
            let plan = scheduler.plan();
            let mut shifts: Vec<_> = plan.shifts.iter().collect();
            shifts.sort_by_key(|s| s.start);
            for s in shifts {
                let crew = plan
                    .find_crew_by_id(&s.crew_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("-");
                let assigned = s
                    .assigned_volunteers
                    .iter()
                    .filter_map(|vid| plan.find_volunteer_by_id(vid))
                    .map(|v| v.name.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                println!(
                    "{} | {} | {} → {} | {}/{} {} | {}",
                    s.id.as_str(),
                    crew,
                    s.start.to_rfc3339(),
                    s.end.to_rfc3339(),
                    s.assigned_volunteers.len(),
                    s.required_volunteers,
                    s.status.as_str(),
                    if assigned.is_empty() { "-" } else { assigned.as_str() }
                );
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = scheduler.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!("  {c}");
                }
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "detail"])?;
                    for c in &conflicts {
                        w.write_record([c.kind(), c.to_string().as_str()])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
