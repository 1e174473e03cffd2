use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

const LIMITS: &str = r#"[{"jurisdiction": null, "threshold": 0.1}, {"jurisdiction": "sp", "threshold": 0.2}]"#;

#[test]
fn test_share_equal_to_jurisdiction_limit_is_admitted() {
    // 20000 / 100000 is exactly 20%; one more unit crosses it.
    let csv = common::requests_csv(&[("80000", "MG"), ("20000", "SP"), ("1", "SP")]);
    let limits = common::limits_json(LIMITS);

    let mut cmd = Command::new(cargo_bin!("loanguard"));
    cmd.arg(csv.path()).arg("--limits").arg(limits.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",20000,SP,"))
        .stdout(predicate::str::contains(",1,SP,").not())
        .stderr(predicate::str::contains(
            "Concentration limit exceeded for SP: 20.00% would exceed 20% limit",
        ));
}

#[test]
fn test_share_equal_to_default_limit_is_admitted() {
    let csv = common::requests_csv(&[("90000", "MG"), ("10000", "rj"), ("1", "rj")]);
    let limits = common::limits_json(LIMITS);

    let mut cmd = Command::new(cargo_bin!("loanguard"));
    cmd.arg(csv.path()).arg("--limits").arg(limits.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",10000,RJ,"))
        .stdout(predicate::str::contains(",1,RJ,").not())
        .stderr(predicate::str::contains(
            "Concentration limit exceeded for RJ: 10.00% would exceed 10% limit",
        ));
}

#[test]
fn test_first_loan_ignores_limits() {
    let csv = common::requests_csv(&[("18446744073709551615", "ac")]);
    let limits = common::limits_json(r#"[{"threshold": 0.0001}]"#);

    let mut cmd = Command::new(cargo_bin!("loanguard"));
    cmd.arg(csv.path()).arg("--limits").arg(limits.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",18446744073709551615,AC,"));
}

#[test]
fn test_overflowing_row_rejected_and_batch_continues() {
    let csv = common::requests_csv(&[
        ("18446744073709551605", "MG"),
        ("100", "SP"),
        ("5", "RJ"),
    ]);

    let mut cmd = Command::new(cargo_bin!("loanguard"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",18446744073709551605,MG,"))
        .stdout(predicate::str::contains(",100,SP,").not())
        .stdout(predicate::str::contains(",5,RJ,"))
        .stderr(predicate::str::contains("Loan rejected: Portfolio amount overflow"));
}

#[test]
fn test_empty_batch_still_writes_header() {
    let csv = common::requests_csv(&[("1000", "XX")]);

    let mut cmd = Command::new(cargo_bin!("loanguard"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stdout("id,amount,jurisdiction,created_at\n");
}
