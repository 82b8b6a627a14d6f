use std::{fs, process::Command};

use cat_chase_world::GameConfig;
use tempfile::tempdir;

fn cat_chase() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cat-chase"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn seeded_runs_print_the_same_report() {
    let run = || {
        cat_chase()
            .args(["--frames", "600", "--seed", "7", "--toy", "mouse"])
            .output()
            .expect("failed to run cat-chase")
    };
    let first = run();
    let second = run();

    assert!(first.status.success(), "headless run failed");
    assert_eq!(first.stdout, second.stdout);

    let report = String::from_utf8(first.stdout).expect("report is utf-8");
    assert!(report.lines().any(|line| line.contains("] cat ")), "{report}");
    assert!(report.contains("mouse ability"), "{report}");
    assert!(report.contains("score "), "{report}");
}

#[test]
fn print_config_applies_file_overrides() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("cat-chase.toml");
    fs::write(&path, "seed = 11\n[player]\nhealth = 5\n").expect("write config");

    let output = cat_chase()
        .arg("--config")
        .arg(&path)
        .arg("--print-config")
        .output()
        .expect("failed to run cat-chase");
    assert!(output.status.success());

    let rendered = String::from_utf8(output.stdout).expect("config is utf-8");
    let config: GameConfig = toml::from_str(&rendered).expect("printed config parses");
    assert_eq!(config.seed, Some(11));
    assert_eq!(config.player.health, 5);
    assert_eq!(config.graphics, GameConfig::default().graphics);
}

#[test]
fn seed_flag_overrides_the_config_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("cat-chase.toml");
    fs::write(&path, "seed = 11\n").expect("write config");

    let output = cat_chase()
        .arg("--config")
        .arg(&path)
        .args(["--seed", "3", "--print-config"])
        .output()
        .expect("failed to run cat-chase");

    let config: GameConfig =
        toml::from_str(&String::from_utf8_lossy(&output.stdout)).expect("printed config parses");
    assert_eq!(config.seed, Some(3));
}

#[test]
fn unreadable_config_is_reported() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.toml");

    let output = cat_chase()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("failed to run cat-chase");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read configuration"), "{stderr}");
}
