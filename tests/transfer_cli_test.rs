use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paycli(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paycli").unwrap();
    cmd.env("PAYCLI_CONFIG_DIR", config_dir.path())
        .env_remove("PAYCLI_FORMAT")
        .env_remove("PAYCLI_CLIENT_ID")
        .env_remove("PAYCLI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_transfer_dry_run_to_existing_beneficiary() {
    let config_dir = tempfile::tempdir().unwrap();
    paycli(&config_dir)
        .args([
            "transfer",
            "create",
            "--dry-run",
            "--beneficiary-id",
            "b-1",
            "--source-currency",
            "usd",
            "--transfer-currency",
            "eur",
            "--transfer-amount",
            "250.00",
            "--request-id",
            "req-42",
            "--transfer-method",
            "LOCAL",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""beneficiary_id":"b-1""#))
        .stdout(predicate::str::contains(r#""source_currency":"USD""#))
        .stdout(predicate::str::contains(r#""request_id":"req-42""#))
        .stdout(predicate::str::contains(r#""transfer_method":"LOCAL""#));
}

#[test]
fn test_transfer_amounts_are_mutually_exclusive() {
    let config_dir = tempfile::tempdir().unwrap();
    paycli(&config_dir)
        .args([
            "transfer",
            "create",
            "--dry-run",
            "--beneficiary-id",
            "b-1",
            "--transfer-amount",
            "10",
            "--source-amount",
            "10",
        ])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn test_inline_beneficiary_requires_routing() {
    let config_dir = tempfile::tempdir().unwrap();
    paycli(&config_dir)
        .args(["transfer", "create", "--dry-run", "--source-amount", "10"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("must provide at least one routing method"));
}
