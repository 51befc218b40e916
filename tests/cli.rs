use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn setup_test_library() -> tempfile::TempDir {
    let dir = tempdir().unwrap();

    let album = dir.path().join("Artist/Album");
    fs::create_dir_all(&album).unwrap();
    fs::write(album.join("01 Track.flac"), "audio").unwrap();
    fs::write(album.join("folder.jpg"), "jpeg").unwrap();
    fs::write(album.join("playlist.m3u"), "#EXTM3U").unwrap();
    fs::write(album.join("notes.txt"), "notes").unwrap();
    fs::write(album.join("video.mkv"), "mkv").unwrap();

    fs::create_dir_all(dir.path().join("__MACOSX")).unwrap();
    fs::write(dir.path().join("__MACOSX/._01 Track.flac"), "sidecar").unwrap();

    dir
}

fn cmd() -> Command {
    Command::cargo_bin("dapsweep").unwrap()
}

#[test]
fn test_report_only() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .args(["--mode", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Summary ==="))
        .stdout(predicate::str::contains("playlist.m3u"))
        .stdout(predicate::str::contains("notes.txt"))
        .stdout(predicate::str::contains("video.mkv"))
        .stdout(predicate::str::contains("__MACOSX"))
        .stdout(predicate::str::contains("No files were deleted"));

    assert!(dir.path().join("Artist/Album/playlist.m3u").exists());
}

#[test]
fn test_dry_run_deletes_nothing() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .args(["--mode", "all", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would remove:"))
        .stdout(predicate::str::contains("4 file(s) would be deleted"));

    assert!(dir.path().join("Artist/Album/playlist.m3u").exists());
    assert!(dir.path().join("Artist/Album/video.mkv").exists());
}

#[test]
fn test_delete_junk_with_confirmation_flag() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .args(["--mode", "junk", "--yes", "--remove-empty-dirs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 file(s)"))
        .stdout(predicate::str::contains("Removed 1 empty folder(s)"));

    let album = dir.path().join("Artist/Album");
    assert!(!album.join("playlist.m3u").exists());
    assert!(album.join("notes.txt").exists());
    assert!(album.join("01 Track.flac").exists());
    assert!(!dir.path().join("__MACOSX").exists());
}

#[test]
fn test_confirmation_must_be_exact() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .args(["--mode", "junk"])
        .write_stdin("delete\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    assert!(dir.path().join("Artist/Album/playlist.m3u").exists());
}

#[test]
fn test_menu_choice_from_stdin() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .write_stdin("2\nDELETE\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 3 file(s)"));

    let album = dir.path().join("Artist/Album");
    assert!(!album.join("notes.txt").exists());
    assert!(album.join("video.mkv").exists());
}

#[test]
fn test_invalid_menu_choice_takes_no_action() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice"));

    assert!(dir.path().join("Artist/Album/playlist.m3u").exists());
}

#[test]
fn test_path_prompt() {
    let dir = setup_test_library();

    cmd()
        .write_stdin(format!("\"{}\"\n4\n", dir.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Report complete"));
}

#[test]
fn test_missing_folder_fails() {
    let dir = tempdir().unwrap();

    cmd()
        .arg(dir.path().join("does-not-exist"))
        .args(["--mode", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid folder"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    let dir = setup_test_library();

    cmd()
        .arg(dir.path())
        .args(["--mode", "everything"])
        .assert()
        .failure();
}
