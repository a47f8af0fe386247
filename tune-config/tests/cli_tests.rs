use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn engine_tune(config_dir: &Path) -> Command {
    let mut cmd = Command::from(std::process::Command::new(assert_cmd::cargo::cargo_bin("engine-tune")));
    cmd.env("LOG_OUTPUT", "off")
        .arg("--config-path")
        .arg(config_dir);
    cmd
}

fn engine_ini(config_dir: &Path) -> String {
    fs::read_to_string(config_dir.join("Engine.ini")).unwrap()
}

#[test]
fn test_create_writes_preset_and_tweaks() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["create", "--preset", "ultra"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Applied preset: ultra"));

    let content = engine_ini(temp.path());
    assert!(content.contains("[SystemSettings]"));
    assert!(content.contains("r.BloomQuality=5"));
    assert!(content.contains("r.Streaming.PoolSize=3000"));
}

#[test]
fn test_create_without_tweaks() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["create", "--no-tweaks"])
        .assert()
        .success();

    let content = engine_ini(temp.path());
    assert!(content.contains("r.BloomQuality=3"));
    assert!(!content.contains("r.Streaming.PoolSize"));
}

#[test]
fn test_custom_setting_is_merged() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("Engine.ini"), "[SystemSettings]\nX=1\n").unwrap();

    engine_tune(temp.path())
        .args([
            "custom",
            "--section",
            "SystemSettings",
            "--setting",
            "Y",
            "2",
        ])
        .assert()
        .success();

    assert_eq!(engine_ini(temp.path()), "[SystemSettings]\nX=1\nY=2\n");
    assert_eq!(
        fs::read_to_string(temp.path().join("Engine.ini.backup")).unwrap(),
        "[SystemSettings]\nX=1\n"
    );
}

#[test]
fn test_set_maps_ui_options() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["set", "-o", "Bloom=High", "-o", "Fog=Disabled"])
        .assert()
        .success();

    let content = engine_ini(temp.path());
    assert!(content.contains("r.BloomQuality=3"));
    assert!(content.contains("r.Fog=False"));
}

#[test]
fn test_set_rejects_unconvertible_value() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["set", "-o", "Bloom=Extreme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bloom"));

    assert!(!temp.path().join("Engine.ini").exists());
}

#[test]
fn test_set_with_only_unknown_options_changes_nothing() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["set", "-o", "Ray Tracing=On"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring unknown option 'Ray Tracing'"));

    assert!(!temp.path().join("Engine.ini").exists());
    assert!(!temp.path().join("Engine.ini.backup").exists());
}

#[test]
fn test_create_with_unknown_preset_reports_default() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["create", "--preset", "cinematic", "--no-tweaks"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Applied preset: balanced")
                .and(predicate::str::contains("Applied preset: cinematic").not()),
        );

    assert!(engine_ini(temp.path()).contains("r.BloomQuality=3"));
}

#[test]
fn test_custom_rejects_multiline_value() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("Engine.ini"), "[SystemSettings]\nX=1\n").unwrap();

    engine_tune(temp.path())
        .args(["custom", "--section", "SystemSettings", "--setting", "Y", "a\nb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line break"));

    assert_eq!(engine_ini(temp.path()), "[SystemSettings]\nX=1\n");
}

#[test]
fn test_show_missing_file() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Engine.ini does not exist"));
}

#[test]
fn test_show_json() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("Engine.ini"), "[SystemSettings]\nr.Fog=True\n").unwrap();

    engine_tune(temp.path())
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"SystemSettings":{"r.Fog":"True"}}"#));
}

#[test]
fn test_backup_command() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .arg("backup")
        .assert()
        .success()
        .stderr(predicate::str::contains("No Engine.ini found to backup"));

    fs::write(temp.path().join("Engine.ini"), "[S]\nk=v\n").unwrap();
    engine_tune(temp.path())
        .arg("backup")
        .assert()
        .success()
        .stderr(predicate::str::contains("Backup created"));
    assert!(temp.path().join("Engine.ini.backup").exists());
}

#[cfg(unix)]
#[test]
fn test_readonly_blocks_changes_until_disabled() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .args(["create", "--read-only"])
        .assert()
        .success();
    let before = engine_ini(temp.path());

    engine_tune(temp.path())
        .arg("tweaks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("readonly off"));
    assert_eq!(engine_ini(temp.path()), before);

    engine_tune(temp.path())
        .args(["readonly", "off"])
        .assert()
        .success();
    engine_tune(temp.path())
        .args(["custom", "--section", "SystemSettings", "--setting", "r.Fog", "False"])
        .assert()
        .success();
    assert!(engine_ini(temp.path()).contains("r.Fog=False"));
}

#[test]
fn test_presets_list_and_describe() {
    let temp = tempdir().unwrap();

    engine_tune(temp.path())
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("balanced").and(predicate::str::contains("ultra")));

    engine_tune(temp.path())
        .args(["presets", "--describe", "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bloom").and(predicate::str::contains("Low")));
}

#[test]
fn test_custom_catalog() {
    let temp = tempdir().unwrap();
    let catalog = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.yaml");

    engine_tune(temp.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["create", "--preset", "crisp", "--no-tweaks"])
        .assert()
        .success();

    assert_eq!(
        engine_ini(temp.path()),
        "[SystemSettings]\nr.BloomQuality=1\nr.Tonemapper.Sharpen=1.2\n\n\
         [/Script/Engine.RendererSettings]\nr.DefaultFeature.MotionBlur=False\n"
    );
}
