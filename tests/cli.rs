use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STROKE_SCRIPT: &str = r#"
[[events]]
type = "pointer_down"
x = 10
y = 20

[[events]]
type = "pointer_move"
x = 60
y = 20

[[events]]
type = "pointer_up"
x = 60
y = 20
"#;

/// Binary isolated from the user's config directory.
fn sketchboard_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sketchboard").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    sketchboard_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Raster whiteboard with undo history and brush stamps",
        ))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn replay_writes_png_of_requested_size() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("stroke.toml");
    let output = temp.path().join("out").join("canvas.png");
    fs::write(&script, STROKE_SCRIPT).unwrap();

    sketchboard_cmd(temp.path())
        .arg("replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "100", "--height", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replayed 3 events: 1 history entries",
        ));

    let png = fs::read(&output).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut png.as_slice()).unwrap();
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 80);
}

#[test]
fn replay_without_destination_warns_about_discarded_history() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("stroke.toml");
    fs::write(&script, STROKE_SCRIPT).unwrap();

    sketchboard_cmd(temp.path())
        .env("RUST_LOG", "warn")
        .arg("replay")
        .arg(&script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Discarding 1 unsaved history entries"));
}

#[test]
fn replay_reports_missing_script() {
    let temp = TempDir::new().unwrap();

    sketchboard_cmd(temp.path())
        .arg("replay")
        .arg(temp.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn replay_rejects_malformed_script() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.toml");
    fs::write(&script, "[[events]]\ntype = \"teleport\"\n").unwrap();

    sketchboard_cmd(temp.path())
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));
}

#[test]
fn print_config_reads_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("sketchboard");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[drawing]\ndraw_mode = \"keyboard\"\ndraw_key = \"D\"\n",
    )
    .unwrap();

    sketchboard_cmd(temp.path())
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("draw_key = \"d\""))
        .stdout(predicate::str::contains("draw_mode = \"keyboard\""));
}

#[test]
fn explicit_config_flag_overrides_default_location() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(&config, "[canvas]\nwidth = 321\n").unwrap();

    sketchboard_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("width = 321"));
}

#[test]
fn init_config_writes_once() {
    let temp = TempDir::new().unwrap();

    sketchboard_cmd(temp.path())
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(temp.path().join("sketchboard").join("config.toml").exists());

    sketchboard_cmd(temp.path())
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn dump_config_schema_prints_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"keybindings\""))
        .stdout(predicate::str::contains("\"draw_key\""));
}
