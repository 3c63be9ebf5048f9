#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CREWS: &str = "\
name,required_skills,min_volunteers,max_volunteers,operating_start_time,operating_end_time,shift_length_hours
Bar,bar;cash,1,2,08:00,20:00,4
";

const VOLUNTEERS: &str = "\
name,skills,days,start_time,end_time
alice,bar,Thu;Fri;Sat,08:00,20:00
bob,cash,Friday;Saturday,12:00,20:00
";

fn cli(plan: &Path) -> Command {
    let mut cmd = Command::cargo_bin("crewplan-cli").unwrap();
    cmd.arg("--plan").arg(plan);
    cmd
}

#[test]
fn import_generate_assign_and_check() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    let crews = dir.path().join("crews.csv");
    let volunteers = dir.path().join("volunteers.csv");
    fs::write(&crews, CREWS).unwrap();
    fs::write(&volunteers, VOLUNTEERS).unwrap();

    cli(&plan)
        .args(["import-crews", "--csv"])
        .arg(&crews)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 crew(s) imported"));
    cli(&plan)
        .args(["import-volunteers", "--csv"])
        .arg(&volunteers)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 volunteer(s) imported"));

    cli(&plan)
        .args(["generate", "--start", "2025-07-10", "--end", "2025-07-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 shift(s) in plan"));

    cli(&plan)
        .args(["auto-assign", "--progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2/2]"))
        .stdout(predicate::str::contains("OK: every volunteer placed"));

    cli(&plan)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));

    let out_csv = dir.path().join("shifts.csv");
    cli(&plan)
        .args(["list", "--out-csv"])
        .arg(&out_csv)
        .assert()
        .success();
    let exported = fs::read_to_string(&out_csv).unwrap();
    assert!(exported.starts_with("id,crew,start,end,required,assigned,status"));
    assert_eq!(exported.lines().count(), 10);
}

#[test]
fn generate_reports_validation_errors() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    let crews = dir.path().join("crews.csv");
    fs::write(
        &crews,
        "name,required_skills,min_volunteers,max_volunteers,operating_start_time,operating_end_time,shift_length_hours\n\
         Night,,1,3,22:00,06:00,4\n",
    )
    .unwrap();

    cli(&plan)
        .args(["import-crews", "--csv"])
        .arg(&crews)
        .assert()
        .success();

    cli(&plan)
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Night: operating_end_time"));

    cli(&plan)
        .args(["generate", "--start", "2025-07-10", "--end", "2025-07-11"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Shift generation aborted"));
}
