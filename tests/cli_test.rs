//! CLI smoke tests against a scratch store

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(temp: &TempDir) -> std::path::PathBuf {
    let config_path = temp.path().join("config.yml");
    let store_path = temp.path().join("snapshot.json");
    std::fs::write(&config_path, format!("store_path: {}\n", store_path.display())).unwrap();
    config_path
}

fn ss(temp: &TempDir) -> Command {
    let config = write_config(temp);
    let mut cmd = Command::cargo_bin("ss").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_stats_on_fresh_store() {
    let temp = TempDir::new().unwrap();
    ss(&temp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completion:  0%"));
}

#[test]
fn test_checkin_then_show_and_repeat_fails() {
    let temp = TempDir::new().unwrap();

    ss(&temp)
        .args(["checkin", "BLOCO A", "1º Pavimento", "UTI", "-e", "João", "-r", "Maria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UTI"));

    ss(&temp)
        .args(["show", "BLOCO A", "1º Pavimento", "UTI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in-progress"));

    ss(&temp)
        .args(["checkin", "BLOCO A", "1º Pavimento", "UTI", "-e", "Outro", "-r", "Alguém"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in-progress"));
}

#[test]
fn test_unknown_sector_fails() {
    let temp = TempDir::new().unwrap();
    ss(&temp)
        .args(["checkout", "BLOCO Z", "Térreo", "Nada"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in catalog"));
}

#[test]
fn test_complete_rejects_too_many_photos() {
    let temp = TempDir::new().unwrap();
    let mut cmd = ss(&temp);
    cmd.args(["complete", "ANEXO", "Térreo", "Cozinha", "-e", "Ana", "-r", "Beto"]);
    for i in 0..6 {
        cmd.args(["-p", &format!("ref-{i}")]);
    }
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("At most 5 photos"));
}

#[test]
fn test_export_csv_header() {
    let temp = TempDir::new().unwrap();

    ss(&temp)
        .args(["complete", "ANEXO", "Térreo", "Cozinha", "-e", "Ana", "-r", "Beto"])
        .assert()
        .success();

    ss(&temp)
        .args(["export", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"Bloco\",\"Pavimento\",\"Setor\",\"Status\"",
        ))
        .stdout(predicate::str::contains("\"Cozinha\",\"completed\",\"Ana\",\"Beto\""));
}
