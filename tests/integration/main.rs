//! Integration tests for rolo

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;

    fn rolo() -> Command {
        cargo_bin_cmd!("rolo")
    }

    #[test]
    fn help_displays() {
        rolo()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Terminal user directory"));
    }

    #[test]
    fn version_displays() {
        rolo()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("rolo"));
    }

    #[test]
    #[serial]
    fn config_path() {
        rolo()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    #[serial]
    fn config_show() {
        rolo()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        rolo()
            .args(["config", "set", "general.unknown", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn edit_requires_a_field_flag() {
        rolo()
            .args(["edit", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nothing to change"));
    }

    #[test]
    fn add_rejects_blank_name() {
        rolo()
            .args([
                "add",
                "--name",
                " ",
                "--email",
                "a@example.com",
                "--phone",
                "555-0100",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("name must not be empty"));
    }
}
