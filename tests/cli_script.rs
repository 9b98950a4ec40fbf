use assert_cmd::Command;
use predicates::str::contains;
use regex::Regex;
use tempfile::{tempdir, TempDir};

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("challenge_core_cli").unwrap();
    cmd.env("CHALLENGE_CORE_CLI_SCRIPT", "1")
        .env("CHALLENGE_CORE_HOME", home.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();

    cli(&home)
        .args(["new", "Trip", "10", "2025-01-06"])
        .assert()
        .success()
        .stdout(contains("Challenge `Trip` created: 10 deposits, goal R$ 55,00."));

    let output = cli(&home)
        .args(["smart", "Trip", "20", "--apply"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let marked = Regex::new(r"Marked: (\d+) deposits, total R\$ 20,00\.").unwrap();
    assert!(marked.is_match(&stdout), "unexpected output:\n{stdout}");

    cli(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(contains("Saved        : R$ 20,00 / R$ 55,00 (36%)"));

    cli(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Trip"))
        .stdout(contains("36%"));

    cli(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Deposits made:"))
        .stdout(contains("R$ 20,00"));

    let json = std::fs::read_to_string(home.path().join("challenges").join("trip.json")).unwrap();
    assert!(json.contains("\"Trip\""));
}

#[test]
fn smart_preview_leaves_challenge_untouched() {
    let home = tempdir().unwrap();
    cli(&home).args(["new", "Car", "5"]).assert().success();

    cli(&home)
        .args(["smart", "Car", "7,90"])
        .assert()
        .success()
        .stdout(contains("Total        : R$ 7,00"))
        .stdout(contains("--apply"));

    cli(&home)
        .args(["smart", "Car", "0,50"])
        .assert()
        .success()
        .stdout(contains("No combination found for that amount."));

    cli(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(contains("Deposits     : 0 of 5"));
}

#[test]
fn unknown_command_suggests_and_fails() {
    let home = tempdir().unwrap();
    cli(&home)
        .arg("smrt")
        .assert()
        .failure()
        .stdout(contains("Suggestion: `smart`?"))
        .stderr(contains("Unknown command `smrt`"));
}

#[test]
fn missing_challenge_reports_error() {
    let home = tempdir().unwrap();
    cli(&home)
        .args(["mark", "Ghost", "1"])
        .assert()
        .failure()
        .stderr(contains("Ghost"));
}

#[test]
fn bank_and_icon_are_set_and_edited() {
    let home = tempdir().unwrap();
    cli(&home)
        .args(["new", "Trip", "5", "--bank", "Nubank", "--icon", "plane"])
        .assert()
        .success();

    cli(&home)
        .args(["show", "Trip"])
        .assert()
        .success()
        .stdout(contains("Bank         : Nubank"))
        .stdout(contains("Icon         : plane"));

    cli(&home)
        .args(["edit", "Trip", "--bank", "Inter", "--start", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("Challenge `Trip` updated."));

    cli(&home)
        .args(["show", "Trip"])
        .assert()
        .success()
        .stdout(contains("Bank         : Inter"))
        .stdout(contains("Start        : 01/03/2025"));
}

#[test]
fn rename_moves_the_challenge_file() {
    let home = tempdir().unwrap();
    let challenges = home.path().join("challenges");
    cli(&home).args(["new", "Trip", "5"]).assert().success();
    cli(&home).args(["mark", "Trip", "3"]).assert().success();

    cli(&home)
        .args(["edit", "Trip", "--rename", "Beach House"])
        .assert()
        .success()
        .stdout(contains("Challenge `Beach House` updated."));

    assert!(!challenges.join("trip.json").exists());
    assert!(challenges.join("beach-house.json").exists());

    cli(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(contains("Beach House"))
        .stdout(contains("Deposits     : 1 of 5"));

    cli(&home).args(["new", "Car", "5"]).assert().success();
    cli(&home)
        .args(["edit", "Car", "--rename", "beach house"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    assert!(challenges.join("car.json").exists());
}

#[test]
fn backups_can_be_listed_and_restored() {
    let home = tempdir().unwrap();
    cli(&home).args(["new", "Trip", "5"]).assert().success();

    cli(&home)
        .args(["backups", "Trip"])
        .assert()
        .success()
        .stdout(contains("No backups found."));

    cli(&home).args(["mark", "Trip", "5"]).assert().success();

    cli(&home)
        .args(["backups", "Trip"])
        .assert()
        .success()
        .stdout(contains("  1. trip_"));

    cli(&home)
        .args(["restore", "Trip", "1"])
        .assert()
        .success()
        .stdout(contains("Restored `Trip`: 0 of 5 deposits paid."));

    cli(&home)
        .args(["restore", "Trip", "9"])
        .assert()
        .failure()
        .stderr(contains("backup #9 does not exist"));
}

#[test]
fn corrupt_challenge_file_is_not_treated_as_absent() {
    let home = tempdir().unwrap();
    cli(&home).args(["new", "Trip", "5"]).assert().success();
    let path = home.path().join("challenges").join("trip.json");
    std::fs::write(&path, "{ broken").unwrap();

    cli(&home)
        .args(["new", "Trip", "8"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");

    cli(&home)
        .args(["delete", "Trip", "--yes"])
        .assert()
        .success()
        .stdout(contains("Challenge `Trip` deleted."));
    assert!(!path.exists());
}
