use std::fs;

use assert_cmd::Command;
use predicates::prelude::{predicate::str, PredicateBooleanExt};

#[test]
fn solve_output_right_answer_for_first_example() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/example1.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Dimensions: 15 x 15"))
        .stdout(str::contains("Best path cost 7036 points"));
}

#[test]
fn solve_output_right_answer_for_second_example() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/example2.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Best path cost 11048 points"));
}

#[test]
fn solve_reports_unreachable_end() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/enclosed.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Search count:"))
        .stdout(str::contains("Best path cost").not())
        .stderr(str::contains("No path found to the goal."));
}

#[test]
fn solve_fails_on_invalid_character() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/invalid_char.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Invalid character(X) for map."));
}

#[test]
fn solve_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/no_such_maze.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to open given file"));
}

#[test]
fn solve_prints_map_with_path() {
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/example1.txt").arg("--print-map");

    cmd.assert()
        .success()
        .stdout(str::contains("###############"))
        .stdout(str::contains("#S"))
        .stdout(str::contains("^"));
}

#[test]
fn solve_writes_report_file() {
    let output_path = std::env::temp_dir().join(format!(
        "reindeer-maze-report-{}.txt",
        std::process::id()
    ));
    let mut cmd = Command::cargo_bin("solve").unwrap();
    cmd.arg("inputs/example2.txt").arg("-o").arg(&output_path);

    cmd.assert().success();
    let report = fs::read_to_string(&output_path).unwrap();
    fs::remove_file(&output_path).unwrap();

    assert!(report.starts_with("Dimensions: 17 x 17\n"));
    assert!(report.contains("Best path cost 11048 points\n"));
    assert!(report.ends_with("#################\n"));
    assert_eq!(report.lines().count(), 3 + 17);
}
