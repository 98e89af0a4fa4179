//! Integration tests for the amalgam CLI.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn amalgam_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("amalgam");
    cmd.env_remove("AMALGAM_ROOT")
        .env_remove("AMALGAM_INPUT")
        .env_remove("AMALGAM_OUTPUT")
        .env_remove("AMALGAM_HEADER_EXT")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn nested_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "main.cpp",
        "#include <iostream>\n#include \"zuniq.hpp\"\nint main() { game_loop(); }\n",
    );
    write(temp.path(), "zuniq.hpp", "#include \"config.hpp\"\nvoid game_loop() {}\n");
    write(temp.path(), "config.hpp", "constexpr int N = 6;\n");
    temp
}

#[test]
fn test_writes_submission_in_current_dir() {
    let temp = nested_project();

    amalgam_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains("2 includes"));

    let out = std::fs::read_to_string(temp.path().join("main_submit.cpp")).unwrap();
    assert_eq!(
        out,
        "#include <iostream>\nconstexpr int N = 6;\nvoid game_loop() {}\nint main() { game_loop(); }\n"
    );
}

#[test]
fn test_root_flag() {
    let temp = nested_project();

    amalgam_cmd()
        .args(["--root", temp.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(temp.path().join("main_submit.cpp").exists());
}

#[test]
fn test_stdout_writes_no_file() {
    let temp = nested_project();

    amalgam_cmd()
        .current_dir(temp.path())
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::contains("constexpr int N = 6;"))
        .stdout(predicate::str::contains("#include \"").not());

    assert!(!temp.path().join("main_submit.cpp").exists());
}

#[test]
fn test_check_reports_rounds() {
    let temp = nested_project();

    amalgam_cmd()
        .current_dir(temp.path())
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("would inline 2 includes in 2 rounds"));

    assert!(!temp.path().join("main_submit.cpp").exists());
}

#[test]
fn test_check_clean_project() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.cpp", "int main() {}\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("has no local includes"));
}

#[test]
fn test_missing_include_fails_without_output() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.cpp", "#include \"missing.hpp\"\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.hpp"));

    assert!(!temp.path().join("main_submit.cpp").exists());
}

#[test]
fn test_cycle_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.cpp", "#include \"a.hpp\"\n");
    write(temp.path(), "a.hpp", "#include \"a.hpp\"\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cyclic include"));
}

#[test]
fn test_flags_override_config_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "amalgam.json",
        r#"{"input": "bot.cpp", "output": "from_file.cpp"}"#,
    );
    write(temp.path(), "bot.cpp", "#include \"util.h\"\n");
    write(temp.path(), "util.h", "util();\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .args(["--output", "from_flag.cpp", "--ext", "h"])
        .assert()
        .success();

    assert!(!temp.path().join("from_file.cpp").exists());
    assert_eq!(
        std::fs::read_to_string(temp.path().join("from_flag.cpp")).unwrap(),
        "util();\n"
    );
}

#[test]
fn test_warns_when_output_is_input() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.cpp", "int main() {}\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .args(["--output", "main.cpp", "--check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("output.same_as_input"));
}

#[test]
fn test_invalid_extension_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.cpp", "int main() {}\n");

    amalgam_cmd()
        .current_dir(temp.path())
        .args(["--ext", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header extension"));
}
