//! End-to-end tests for the `matrifast` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ANA_TOML: &str = r#"
email = "ana@x.com"
kind = "docente"

[form]
nombres = "Ana"
aPaterno = "Ruiz"
fechaNacimiento = "1990-01-01"
sexo = "F"
tipoDocumento = "DNI"
numeroDocumento = "12345678"
"#;

const LUIS_JSON: &str = r#"{
    "email": "luis@x.com",
    "kind": "representante",
    "form": {
        "nombres": "Luis", "aPaterno": "Soto", "fechaNacimiento": "1985-05-20",
        "sexo": "M", "tipoRelacion": "PADRE", "direccion": "Jr. Unión 12",
        "celular": "987654321", "viveConEstudiante": true
    }
}"#;

/// A `matrifast` command isolated from the user's config and environment.
fn matrifast(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("matrifast").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("MATRIFAST_OUTPUT__FORMAT")
        .env_remove("MATRIFAST_REGISTRATION__DEFAULT_KIND")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("validate-document"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_exits_two() {
    let home = TempDir::new().unwrap();
    matrifast(&home).arg("enroll").assert().code(2);
}

// ── validate-document ─────────────────────────────────────────────────────────

#[test]
fn valid_dni_is_accepted() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .args(["--output-format", "plain"])
        .args(["validate-document", "--type", "dni", "--number", "12345678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DNI 12345678 is valid"))
        .stdout(predicate::str::contains("exactly 8 digits"));
}

#[test]
fn short_dni_is_rejected_with_the_document_field() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .args(["validate-document", "-t", "DNI", "-n", "1234"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Documento"))
        .stderr(predicate::str::contains("8 digits"));
}

#[test]
fn validate_document_json_output() {
    let home = TempDir::new().unwrap();
    let output = matrifast(&home)
        .args(["--output-format", "json"])
        .args(["doc", "-t", "CE", "-n", "A23456789"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["type"], "CE");
    assert_eq!(json["number"], "A23456789");
}

// ── register ──────────────────────────────────────────────────────────────────

#[test]
fn register_toml_submission_as_json() {
    let home = TempDir::new().unwrap();
    let form = home.path().join("ana.toml");
    fs::write(&form, ANA_TOML).unwrap();

    let output = matrifast(&home)
        .args(["--output-format", "json", "register"])
        .arg(&form)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["email"], "ana@x.com");
    assert_eq!(records[0]["role"], "DOCENTE");
    assert_eq!(records[0]["userType"], "TEACHER");
}

#[test]
fn register_plain_output_names_the_user() {
    let home = TempDir::new().unwrap();
    let form = home.path().join("luis.json");
    fs::write(&form, LUIS_JSON).unwrap();

    matrifast(&home)
        .args(["--output-format", "plain", "register"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("Luis Soto"))
        .stdout(predicate::str::contains("luis@x.com"));
}

#[test]
fn missing_path_exits_three() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .args(["register", "no-such-form.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn invalid_form_reports_first_failing_field() {
    let home = TempDir::new().unwrap();
    let form = home.path().join("luis.json");
    fs::write(&form, LUIS_JSON.replace("987654321", "98765432")).unwrap();

    matrifast(&home)
        .arg("register")
        .arg(&form)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("celular"));
}

#[test]
fn submission_without_kind_needs_as_flag() {
    let home = TempDir::new().unwrap();
    let form = home.path().join("ana.toml");
    fs::write(&form, ANA_TOML.replace("kind = \"docente\"\n", "")).unwrap();

    matrifast(&home)
        .arg("register")
        .arg(&form)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--as"));

    matrifast(&home)
        .args(["--output-format", "json", "register", "--as", "teacher"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCENTE"));
}

#[test]
fn email_flag_overrides_submission() {
    let home = TempDir::new().unwrap();
    let form = home.path().join("ana.toml");
    fs::write(&form, ANA_TOML).unwrap();

    let output = matrifast(&home)
        .args(["--output-format", "json", "register", "-e", "ana.ruiz@colegio.pe"])
        .arg(&form)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)[0]["email"], "ana.ruiz@colegio.pe");
}

#[test]
fn batch_registers_good_forms_and_fails_on_bad_ones() {
    let home = TempDir::new().unwrap();
    let forms = home.path().join("forms");
    fs::create_dir(&forms).unwrap();
    fs::write(forms.join("a-ana.toml"), ANA_TOML).unwrap();
    fs::write(forms.join("b-luis.json"), LUIS_JSON).unwrap();
    fs::write(
        forms.join("c-dup.toml"),
        ANA_TOML.replace("12345678", "87654321"),
    )
    .unwrap();

    let output = matrifast(&home)
        .args(["--output-format", "plain", "register"])
        .arg(&forms)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Registered 2 user(s)"));
    assert!(stdout.contains("Email already registered"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 3 submissions were rejected"));
}

#[test]
fn clean_batch_succeeds() {
    let home = TempDir::new().unwrap();
    let forms = home.path().join("forms");
    fs::create_dir(&forms).unwrap();
    fs::write(forms.join("ana.toml"), ANA_TOML).unwrap();
    fs::write(forms.join("luis.json"), LUIS_JSON).unwrap();
    fs::write(forms.join("notes.txt"), "ignored").unwrap();

    let output = matrifast(&home)
        .args(["--output-format", "json", "register"])
        .arg(&forms)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let roles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["role"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(roles, ["DOCENTE", "REPRESENTANTE_LEGAL"]);
}

// ── config / init ─────────────────────────────────────────────────────────────

#[test]
fn init_then_read_back() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("matrifast.toml");

    matrifast(&home)
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    matrifast(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.format = \"auto\""));
}

#[test]
fn config_path_reports_explicit_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    fs::write(&config, "").unwrap();

    matrifast(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn missing_explicit_config_exits_four() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("matrifast config path"));
}

#[test]
fn unknown_format_in_config_exits_four() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("matrifast.toml");
    fs::write(&config, "[output]\nformat = \"yaml\"\n").unwrap();

    matrifast(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown output format 'yaml'"));
}

#[test]
fn environment_selects_output_format() {
    let home = TempDir::new().unwrap();
    let output = matrifast(&home)
        .env("MATRIFAST_OUTPUT__FORMAT", "json")
        .args(["validate-document", "-t", "DNI", "-n", "12345678"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["valid"], true);
}

#[test]
fn configured_default_kind_is_used() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("matrifast.toml");
    fs::write(&config, "[registration]\ndefault_kind = \"representante\"\n").unwrap();
    let form = home.path().join("luis.json");
    fs::write(
        &form,
        LUIS_JSON.replace("\"kind\": \"representante\",", ""),
    )
    .unwrap();

    matrifast(&home)
        .arg("--config")
        .arg(&config)
        .args(["--output-format", "json", "register"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("LEGAL_REPRESENTATIVE"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    matrifast(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matrifast"));
}
