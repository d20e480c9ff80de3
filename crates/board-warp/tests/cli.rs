#![cfg(feature = "cli")]

mod common;

use std::fs;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn board_warp() -> Command {
    Command::cargo_bin("board-warp").expect("board-warp binary")
}

#[test]
fn missing_arguments_fail() {
    board_warp()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-dir"));
}

#[test]
fn rectifies_boards_and_skips_failures() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    let out_dir = output.path().join("cropped");
    let report = output.path().join("report.json");

    common::skewed_board()
        .save(input.path().join("board.png"))
        .expect("save board");
    RgbImage::from_pixel(200, 150, Rgb([90, 90, 90]))
        .save(input.path().join("blank.bmp"))
        .expect("save blank");
    fs::write(input.path().join("notes.txt"), "not an image").expect("write notes");

    board_warp()
        .arg("--input-dir")
        .arg(input.path())
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--width", "200", "--height", "100"])
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("found 2 images"))
        .stderr(predicate::str::contains("skipping"));

    let saved = out_dir.join("board_cropped.jpg");
    let img = image::open(&saved).expect("open output");
    assert_eq!((img.width(), img.height()), (200, 100));
    assert!(!out_dir.join("blank_cropped.jpg").exists());
    assert_eq!(fs::read_dir(&out_dir).expect("read out dir").count(), 1);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    let entries = json.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    // Extension order: png before bmp.
    assert!(entries[0]["image_path"].as_str().unwrap().ends_with("board.png"));
    assert!(entries[0]["error"].is_null());
    assert_eq!(entries[0]["corners"].as_array().unwrap().len(), 4);
    let h = entries[0]["h_rect_from_img"].as_array().expect("homography rows");
    assert_eq!(h.len(), 3);
    assert!(h.iter().all(|row| row.as_array().map(Vec::len) == Some(3)));
    assert!(entries[1]["h_rect_from_img"].is_null());
    assert!(entries[1]["output_path"].is_null());
    assert!(entries[1]["error"]
        .as_str()
        .unwrap()
        .contains("no quadrilateral"));
}

#[test]
fn accepts_underscore_flags_and_empty_input() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    let out_dir = output.path().join("new");

    board_warp()
        .arg("--input_dir")
        .arg(input.path())
        .arg("--output_dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("no images found"));

    assert!(out_dir.is_dir());
}

#[test]
fn missing_input_dir_exits_non_zero() {
    let output = tempfile::tempdir().expect("tempdir");
    board_warp()
        .arg("--input-dir")
        .arg(output.path().join("absent"))
        .arg("--output-dir")
        .arg(output.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn log_level_flag_filters_messages() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    common::skewed_board()
        .save(input.path().join("board.png"))
        .expect("save board");

    board_warp()
        .arg("--input-dir")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--log-level", "debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("contours"));

    board_warp()
        .arg("--input-dir")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--log-level", "warn"])
        .assert()
        .success()
        .stderr(predicate::str::contains("found 1 images").not());
}

#[test]
fn unknown_log_level_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    board_warp()
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level"));
}
