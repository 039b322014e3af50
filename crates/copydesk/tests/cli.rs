//! Tests that drive the `copydesk` binary as a subprocess.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn stdout_json(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// =============================================================================
// Help, version, info
// =============================================================================

#[test]
fn help_lists_every_subcommand() {
    for flag in ["--help", "-h"] {
        let assert = cmd().arg(flag).assert().success();
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
        for sub in ["copy-edit", "readability", "info"] {
            assert!(stdout.contains(sub), "{flag} is missing {sub}:\n{stdout}");
        }
    }
}

#[test]
fn long_help_documents_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COPYDESK_LANGUAGE"))
        .stdout(predicate::str::contains("RUST_LOG"));
}

#[test]
fn version_flags() {
    for flag in ["--version", "-V"] {
        cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_text_names_the_package() {
    cmd()
        .args(["--color", "never", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("Language"));
}

#[test]
fn info_json_reports_package_and_config() {
    let json = stdout_json(&["info", "--json"]);
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["language"].is_string());
}

// =============================================================================
// Global flags
// =============================================================================

#[test]
fn global_flags_are_accepted_before_and_after_the_subcommand() {
    let flag_sets: &[&[&str]] = &[
        &["--quiet"],
        &["-q"],
        &["--verbose"],
        &["-vv"],
        &["--color", "always"],
        &["--color", "never"],
        &["--color", "auto"],
    ];
    for flags in flag_sets {
        cmd().args(*flags).arg("info").assert().success();
        cmd().arg("info").args(*flags).assert().success();
    }
}

#[test]
fn invalid_color_value_is_rejected() {
    cmd()
        .args(["--color", "sometimes", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Copy-edit Command
// =============================================================================

/// Writes `doc.md` and `words.txt` into a fresh directory.
fn copy_edit_workspace(doc: &str, words: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("doc.md"), doc).unwrap();
    std::fs::write(dir.path().join("words.txt"), words).unwrap();
    dir
}

#[test]
fn copy_edit_json_has_report_keys() {
    let dir = copy_edit_workspace(
        "# Guide\n\nSimply open the settngs panel.\n",
        "guide\nopen\nthe\nsettings\npanel\n",
    );

    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "doc.md", "--dictionary", "words.txt", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("copy-edit --json should output valid JSON");
    assert_eq!(json["spelling"][0]["word"], "settngs");
    assert_eq!(json["spelling"][0]["line"], 3);
    assert_eq!(json["forbiddenWords"][0]["word"], "simply");
    assert_eq!(json["summary"]["total"], 2);
    for key in ["headings", "formatting"] {
        assert!(json[key].is_array(), "missing {key}");
    }
}

#[test]
fn copy_edit_text_output_lists_issues() {
    let dir = copy_edit_workspace(
        "# Guide\n\nOpen the panel \u{2014} then close it.\n",
        "guide\nopen\nthe\npanel\nthen\nclose\n",
    );

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["--color", "never", "copy-edit", "doc.md", "--dictionary", "words.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doc.md:3:"))
        .stdout(predicate::str::contains("Em-dash"))
        .stdout(predicate::str::contains("1 total"));
}

#[test]
fn copy_edit_strict_fails_on_issues() {
    let dir = copy_edit_workspace("Just open it.\n", "just\nopen\n");

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "doc.md", "--dictionary", "words.txt", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("copy-editing issue"));
}

#[test]
fn copy_edit_strict_passes_clean_document() {
    let dir = copy_edit_workspace("# Guide\n\nOpen the panel.\n", "guide\nopen\nthe\npanel\n");

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "doc.md", "--dictionary", "words.txt", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn copy_edit_custom_flagged_word_list() {
    let dir = copy_edit_workspace("Open the panel.\n", "open\nthe\npanel\n");
    std::fs::write(dir.path().join("flagged.txt"), "# house style\npanel \u{2192} pane\n").unwrap();

    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args([
            "--json",
            "copy-edit",
            "doc.md",
            "--dictionary",
            "words.txt",
            "--flagged-words",
            "flagged.txt",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["forbiddenWords"][0]["word"], "panel");
    assert_eq!(json["forbiddenWords"][0]["suggestion"], "pane");
    assert_eq!(json["forbiddenWords"][0]["lineText"], "Open the panel.");
}

#[test]
fn copy_edit_language_flag_accepted() {
    let dir = copy_edit_workspace("Open the panel.\n", "open\nthe\npanel\n");

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "doc.md", "--dictionary", "words.txt", "--language", "en-gb"])
        .assert()
        .success();
}

#[test]
fn copy_edit_unknown_language_rejected() {
    cmd()
        .args(["copy-edit", "doc.md", "--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn copy_edit_missing_file_fails() {
    let dir = copy_edit_workspace("", "word\n");

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "missing.md", "--dictionary", "words.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.md"));
}

#[test]
fn copy_edit_missing_dictionary_fails() {
    let dir = copy_edit_workspace("Text.\n", "word\n");

    cmd()
        .args(["-C", dir.path().to_str().unwrap()])
        .args(["copy-edit", "doc.md", "--dictionary", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dictionary"));
}

// =============================================================================
// Readability Command
// =============================================================================

#[test]
fn readability_json_has_sections_in_order() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        tmp.path(),
        "Intro text here.\n\n## Usage\n\nThe cat sat on the mat.\n\n## Anatomy\n\nThe dog ran fast.\n",
    )
    .unwrap();

    let output = cmd()
        .args(["readability", tmp.path().to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["sections"].as_object().unwrap().len(), 3);
    assert_eq!(json["overall"]["wordCount"], 13);

    // Document order survives serialization.
    let intro = stdout.find("\"(intro)\"").unwrap();
    let usage = stdout.find("\"Usage\"").unwrap();
    let anatomy = stdout.find("\"Anatomy\"").unwrap();
    assert!(intro < usage && usage < anatomy);
    assert!(json["flags"].as_array().unwrap().is_empty());
}

#[test]
fn readability_max_grade_passes() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "The cat sat on the mat. The dog ran fast.").unwrap();
    cmd()
        .args(["readability", tmp.path().to_str().unwrap(), "--max-grade", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn readability_max_grade_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        tmp.path(),
        "Configuration of accessibility parameters necessitates comprehensive \
         validation of dependency relationships across documentation categories.",
    )
    .unwrap();
    cmd()
        .args(["readability", tmp.path().to_str().unwrap(), "--max-grade", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Simplify sentences"));
}

#[test]
fn readability_text_output_shows_flags() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let long = vec!["word"; 30].join(" ");
    std::fs::write(tmp.path(), format!("## Body\n\n{long}.\n")).unwrap();
    cmd()
        .args(["--color", "never", "readability", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("long sentence (30 words)"))
        .stdout(predicate::str::contains("Body"));
}

// =============================================================================
// Usage errors and -C
// =============================================================================

#[test]
fn bare_invocation_prints_usage_and_exits_2() {
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommands_and_flags_are_usage_errors() {
    for arg in ["proofread", "--proofread"] {
        cmd()
            .arg(arg)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("error:"));
    }
}

#[test]
fn chdir_makes_relative_paths_work() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.md"), "Short and plain.\n").unwrap();

    let json = stdout_json(&[
        "-C",
        dir.path().to_str().unwrap(),
        "readability",
        "notes.md",
        "--json",
    ]);
    assert_eq!(json["overall"]["wordCount"], 3);
}

#[test]
fn chdir_to_missing_directory_fails() {
    cmd()
        .args(["-C", "/nonexistent/copydesk/dir", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}
