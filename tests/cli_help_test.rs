#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;

    #[test]
    fn test_cli_help_output() {
        let mut cmd = Command::cargo_bin("paycli").unwrap();
        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Commands:"));
        for group in ["beneficiary", "transfer", "auth", "config"] {
            assert!(help_output.contains(group), "missing {}", group);
        }
        assert!(help_output.contains("-v, --verbose"));
        assert!(help_output.contains("-V, --version"));
    }

    #[test]
    fn test_beneficiary_create_help_lists_request_flags() {
        let mut cmd = Command::cargo_bin("paycli").unwrap();
        cmd.args(["beneficiary", "create", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--routing-number"))
            .stdout(predicate::str::contains("--zengin-branch-code"))
            .stdout(predicate::str::contains("--payid-abn"))
            .stdout(predicate::str::contains("--field <PATH=VALUE>"))
            .stdout(predicate::str::contains("--validate"))
            .stdout(predicate::str::contains("--dry-run"));
    }

    #[test]
    fn test_transfer_create_help() {
        let mut cmd = Command::cargo_bin("paycli").unwrap();
        cmd.args(["transfer", "create", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--beneficiary-id"))
            .stdout(predicate::str::contains("--source-amount"))
            .stdout(predicate::str::contains("--swift-code"))
            .stdout(predicate::str::contains("--nickname").not());
    }

    #[test]
    fn test_subcommand_is_required() {
        let mut cmd = Command::cargo_bin("paycli").unwrap();
        cmd.arg("beneficiary").assert().failure();
    }
}
