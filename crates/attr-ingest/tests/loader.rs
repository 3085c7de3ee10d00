//! Integration tests for input loading and the fatal-precondition rules.

use std::fs;
use std::path::Path;

use attr_ingest::{IngestError, empty_table, load_referrals, load_secondary, read_table};
use attr_model::{REFERRALS, REWARDS, SECONDARY_TABLES, TRANSACTIONS, USER_LOGS};

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

#[test]
fn referrals_load_with_string_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        dir.path(),
        REFERRALS.file_name,
        "referral_id,referrer_id,referee_id,transaction_id,referral_reward_id,referral_at\n\
         r1,101,201,301,401,2024-01-02 10:00:00\n\
         r2,abc,202,302,402,2024-01-03 11:00:00\n",
    );

    let df = load_referrals(dir.path(), &REFERRALS).expect("load referrals");
    assert_eq!(df.height(), 2);
    // every column reads as text; coercion happens downstream
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &polars::prelude::DataType::String);
    }
}

#[test]
fn missing_referrals_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = load_referrals(dir.path(), &REFERRALS).expect_err("must fail");
    assert!(matches!(error, IngestError::ReferralsMissing { .. }));
}

#[test]
fn empty_referrals_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        dir.path(),
        REFERRALS.file_name,
        "referral_id,referrer_id,referee_id,transaction_id,referral_reward_id,referral_at\n",
    );
    let error = load_referrals(dir.path(), &REFERRALS).expect_err("must fail");
    assert!(matches!(error, IngestError::ReferralsEmpty { .. }));
}

#[test]
fn missing_secondary_substitutes_empty_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    for spec in SECONDARY_TABLES {
        let loaded = load_secondary(dir.path(), &spec).expect("substitute");
        assert!(!loaded.present);
        assert_eq!(loaded.data.height(), 0);
        for required in spec.required_columns {
            assert!(
                loaded.data.column(required).is_ok(),
                "{} missing column {required}",
                spec.name
            );
        }
    }
}

#[test]
fn present_secondary_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        dir.path(),
        TRANSACTIONS.file_name,
        "transaction_id,transaction_status,transaction_at\n301,PAID,2024-01-05\n",
    );
    let loaded = load_secondary(dir.path(), &TRANSACTIONS).expect("load");
    assert!(loaded.present);
    assert_eq!(loaded.data.height(), 1);
}

#[test]
fn empty_table_matches_spec_schema() {
    let df = empty_table(&USER_LOGS).expect("empty table");
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), USER_LOGS.required_columns.len());
}

#[test]
fn blank_cells_read_as_null() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        dir.path(),
        REWARDS.file_name,
        "id,reward_amount\n401,15.5\n402,\n",
    );
    let df = read_table(&dir.path().join(REWARDS.file_name)).expect("read");
    let amounts = df.column("reward_amount").expect("column");
    assert_eq!(amounts.null_count(), 1);
}
