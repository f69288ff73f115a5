//! Integration tests for the confirmation-log projection.
//!
//! Each test works against its own file under the system temp directory; no
//! running server or database is needed.
//!
//! Run with: `cargo test --test confirmation_log_test`

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use threadwork_backend::confirmation_log::{ConfirmationEntry, ConfirmationLog};

/// A per-test log path that never collides with other tests or runs.
fn temp_log(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "threadwork-confirmations-{}-{name}.txt",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn entry(order_id: &str, client_name: &str, design_price: &str) -> ConfirmationEntry {
    ConfirmationEntry {
        order_id: order_id.to_string(),
        client_name: client_name.to_string(),
        client_email: "client@example.com".to_string(),
        design_price: design_price.to_string(),
        confirmed_on: NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
    }
}

#[test]
fn confirming_appends_exactly_one_well_formed_line() {
    let path = temp_log("append");
    let log = ConfirmationLog::new(&path);

    log.record(&entry("7", "Lina Trabelsi", "19.99")).unwrap();

    let lines = log.entries().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        "OrderID: 7, Name: Lina Trabelsi, Email: client@example.com, \
         DesignPrice: 19.99, ConfirmedAt: 2026-08-08"
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn rejecting_removes_only_the_exact_id() {
    let path = temp_log("exact-id");
    let log = ConfirmationLog::new(&path);

    log.record(&entry("1", "A", "9.99")).unwrap();
    log.record(&entry("12", "B", "19.99")).unwrap();
    log.record(&entry("123", "C", "29.99")).unwrap();

    // Withdrawing 12 must not touch 1 (a prefix) or 123 (an extension).
    assert!(log.withdraw("12").unwrap());

    let lines = log.entries().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("OrderID: 1,"));
    assert!(lines[1].starts_with("OrderID: 123,"));

    // A second withdrawal finds nothing.
    assert!(!log.withdraw("12").unwrap());

    let _ = fs::remove_file(&path);
}

#[test]
fn reconfirming_replaces_the_existing_line() {
    let path = temp_log("reconfirm");
    let log = ConfirmationLog::new(&path);

    log.record(&entry("42", "Before", "19.99")).unwrap();
    log.record(&entry("42", "After", "29.99")).unwrap();

    let lines = log.entries().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Name: After"));
    assert!(lines[0].contains("DesignPrice: 29.99"));

    let _ = fs::remove_file(&path);
}

#[test]
fn withdrawing_from_a_missing_file_is_a_clean_no_op() {
    let path = temp_log("missing");
    let log = ConfirmationLog::new(&path);

    assert!(!log.withdraw("1").unwrap());
    assert!(!path.exists());
}

#[test]
fn confirm_then_reject_round_trip_empties_the_log() {
    let path = temp_log("round-trip");
    let log = ConfirmationLog::new(&path);

    log.record(&entry("9", "Client", "39.99")).unwrap();
    assert!(log.withdraw("9").unwrap());
    assert!(log.entries().unwrap().is_empty());

    let _ = fs::remove_file(&path);
}
