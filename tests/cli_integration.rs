//! Integration tests for the CLI surface.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_test_wav(path: &Path, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..(seconds * 8_000) {
        let sample = ((i as f32 * 0.02).sin() * 8_000.0) as i16;
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

fn write_selection_table(path: &Path, rows: &[(f64, f64, &str)]) {
    let mut content = String::from("Selection\tBegin Time (s)\tEnd Time (s)\tAnnotation\n");
    for (i, (begin, end, label)) in rows.iter().enumerate() {
        content.push_str(&format!("{}\t{begin}\t{end}\t{label}\n", i + 1));
    }
    std::fs::write(path, content).unwrap();
}

/// Temp workspace with one annotated 12s recording.
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("annotations")).unwrap();
    std::fs::create_dir_all(dir.path().join("audio")).unwrap();
    write_selection_table(
        &dir.path().join("annotations/rec1.Table.1.selections.txt"),
        &[(6.0, 8.0, "WOTH"), (1.0, 2.0, "EATO")],
    );
    write_test_wav(&dir.path().join("audio/rec1.wav"), 12);
    dir
}

fn split_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ravensplit");
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .arg("-a")
        .arg(dir.path().join("annotations"))
        .arg("-r")
        .arg(dir.path().join("audio"))
        .arg("-o")
        .arg(dir.path().join("clips"))
        .arg("--no-progress");
    cmd
}

#[test]
fn test_no_args_prints_help() {
    let mut cmd = cargo_bin_cmd!("ravensplit");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_full_run_writes_clips_and_labels() {
    let dir = setup_workspace();

    split_cmd(&dir).args(["-d", "5"]).assert().success();

    assert!(dir.path().join("clips/rec1_0.0s_5.0s.wav").exists());
    assert!(dir.path().join("clips/rec1_5.0s_10.0s.wav").exists());
    assert!(dir.path().join("clips/rec1_10.0s_12.0s.wav").exists());

    let labels = std::fs::read_to_string(dir.path().join("clips/labels.csv")).unwrap();
    let lines: Vec<&str> = labels.lines().collect();
    assert_eq!(lines[0], "file,eato,woth");
    assert_eq!(lines[1], "rec1_0.0s_5.0s.wav,1,0");
    assert_eq!(lines[2], "rec1_5.0s_10.0s.wav,0,1");
    assert_eq!(lines[3], "rec1_10.0s_12.0s.wav,0,0");
}

#[test]
fn test_dry_run_writes_no_files() {
    let dir = setup_workspace();

    split_cmd(&dir).args(["-d", "5", "--dry-run"]).assert().success();

    assert!(!dir.path().join("clips").exists());
}

#[test]
fn test_labeled_only_skips_silent_windows() {
    let dir = setup_workspace();

    split_cmd(&dir)
        .args(["-d", "5", "--labeled-only"])
        .assert()
        .success();

    assert!(dir.path().join("clips/rec1_0.0s_5.0s.wav").exists());
    assert!(!dir.path().join("clips/rec1_10.0s_12.0s.wav").exists());

    let labels = std::fs::read_to_string(dir.path().join("clips/labels.csv")).unwrap();
    assert_eq!(labels.lines().count(), 3); // header + 2 labeled windows
}

#[test]
fn test_missing_clip_duration_fails() {
    let dir = setup_workspace();

    split_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no clip duration specified"));
}

#[test]
fn test_overlap_not_below_duration_fails() {
    let dir = setup_workspace();

    split_cmd(&dir)
        .args(["-d", "5", "--clip-overlap", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("clip_overlap"));
}

#[test]
fn test_empty_label_cell_is_fatal_and_names_the_file() {
    let dir = setup_workspace();
    std::fs::write(
        dir.path().join("annotations/rec1.Table.1.selections.txt"),
        "Begin Time (s)\tEnd Time (s)\tAnnotation\n0.0\t1.0\t\n",
    )
    .unwrap();

    split_cmd(&dir)
        .args(["-d", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty labels"))
        .stderr(predicate::str::contains("rec1.Table.1.selections.txt"));
}

#[test]
fn test_no_matching_pairs_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("annotations")).unwrap();
    std::fs::create_dir_all(dir.path().join("audio")).unwrap();
    write_selection_table(
        &dir.path().join("annotations/rec1.Table.1.selections.txt"),
        &[(0.0, 1.0, "x")],
    );
    write_test_wav(&dir.path().join("audio/other.wav"), 6);

    split_cmd(&dir)
        .args(["-d", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no annotation files matched"));
}

#[test]
fn test_config_path_prints_a_path() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("ravensplit");
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("ravensplit");
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
}
