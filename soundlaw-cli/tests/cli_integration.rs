//! Integration tests for the soundlaw CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn soundlaw() -> Command {
    Command::cargo_bin("soundlaw").unwrap()
}

#[test]
fn test_syllabify_word_file() {
    soundlaw()
        .args(["syllabify", "-q", "-i"])
        .arg(fixture_path("words.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Galadriel: Ga-lad-ri-el"))
        .stdout(predicate::str::contains("talan: ta-lan"))
        .stdout(predicate::str::contains("# Primitive").not());
}

#[test]
fn test_syllabify_glob_pattern() {
    soundlaw()
        .args(["syllabify", "-q", "-i", "tests/fixtures/*.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("olna: ol-na"));
}

#[test]
fn test_analyse_stress_marks() {
    soundlaw()
        .args(["analyse", "--stress-marks", "talan"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("talan: ˈta-lan\n"))
        .stdout(predicate::str::contains("heavy"));
}

#[test]
fn test_compile_prints_steps() {
    soundlaw()
        .args(["compile", "[-ai|-au] > [-ēø|-ōø]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("position: final"))
        .stdout(predicate::str::contains("variant 2:"))
        .stdout(predicate::str::contains("1. a -> o [U+0304]"));
}

#[test]
fn test_compile_malformed_rule() {
    soundlaw()
        .args(["compile", "[ln] > [l]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compile rule [ln] > [l]"));
}

#[test]
fn test_apply_inline_rules() {
    soundlaw()
        .args(["apply", "-r", "[ln] > [ll]", "-r", "[-{ptk}] > [-{bdg}]"])
        .args(["olna", "orat", "thand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("olna -> olla"))
        .stdout(predicate::str::contains("orat -> orad"))
        .stdout(predicate::str::contains("thand -> thand"));
}

#[test]
fn test_apply_rule_file_with_trace() {
    soundlaw()
        .args(["apply", "--trace", "-q", "--rules"])
        .arg(fixture_path("rules.toml"))
        .arg("-i")
        .arg(fixture_path("words.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("barándā -> brandā"))
        .stdout(predicate::str::contains("  [syncope] barándā -> brandā"))
        .stdout(predicate::str::contains("  [assimilation] olna -> olla"))
        .stdout(predicate::str::contains("talan -> talan"));
}

#[test]
fn test_apply_json_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("derivations.json");

    soundlaw()
        .args(["apply", "-r", "[ln] > [ll]", "-f", "json", "olna", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(json[0]["input"], "olna");
    assert_eq!(json[0]["output"], "olla");
}

#[test]
fn test_apply_prosodic_stress() {
    soundlaw()
        .args(["apply", "--prosodic-stress", "-r", "[V́] > [V̄]", "talan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("talan -> tālan"));
}

#[test]
fn test_apply_with_other_phonology() {
    soundlaw()
        .args(["--phonology", "telerin", "apply", "-r", "[-kʰ] > [-χ]", "ekʰ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ekʰ -> eχ"));
}

#[test]
fn test_no_words_is_an_error() {
    soundlaw()
        .args(["syllabify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No words given"));
}

#[test]
fn test_missing_input_file() {
    soundlaw()
        .args(["syllabify", "-i", "tests/fixtures/does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_file_sets_default_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("soundlaw.toml");
    fs::write(&config_path, "[output]\ndefault_format = \"markdown\"\n").unwrap();

    soundlaw()
        .arg("--config")
        .arg(&config_path)
        .args(["syllabify", "talan", "olna"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **talan**: ta-lan"))
        .stdout(predicate::str::contains("*Total words: 2*"));
}

#[test]
fn test_validate_external_phonology() {
    soundlaw()
        .arg("--phonology")
        .arg(fixture_path("minimal-phonology.toml"))
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Phonology tables are valid!"))
        .stdout(predicate::str::contains("Code: minimal"));
}

#[test]
fn test_validate_rule_file() {
    soundlaw()
        .args(["validate", "--rules"])
        .arg(fixture_path("rules.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Rule file is valid!"))
        .stdout(predicate::str::contains("syncope"));

    let temp_dir = TempDir::new().unwrap();
    let rules_path = temp_dir.path().join("broken.toml");
    fs::write(
        &rules_path,
        "[[rules]]\nname = \"stray\"\nnotation = \"[a-b] > [a-b]\"\n",
    )
    .unwrap();

    soundlaw()
        .args(["validate", "--rules"])
        .arg(&rules_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Validation failed!"))
        .stderr(predicate::str::contains("stray"));
}

#[test]
fn test_generate_config_then_use_it() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("noldorin.toml");

    soundlaw()
        .args(["generate-config", "--code", "noldorin", "--output"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Phonology template generated successfully",
        ));

    soundlaw()
        .arg("--phonology")
        .arg(&output_path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Code: noldorin"));

    soundlaw()
        .arg("--phonology")
        .arg(&output_path)
        .args(["syllabify", "Angband"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Angband: Ang-band"));
}

#[test]
fn test_list_phonologies() {
    soundlaw()
        .args(["list", "phonologies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eldarin"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("telerin"));
}

#[test]
fn test_list_formats() {
    soundlaw()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_unknown_phonology() {
    soundlaw()
        .args(["--phonology", "klingon", "syllabify", "talan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown phonology"));
}
