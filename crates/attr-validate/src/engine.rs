//! Short-circuit evaluation of the rule list over an enriched frame.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame};
use serde::Serialize;
use tracing::debug;

use attr_ingest::any_to_string_non_empty;
use attr_model::{CaseInsensitiveLookup, RejectionReason};

use crate::rules::{OrderingRule, PaymentRule, ReferralRule, ReferralView, RewardRule};

/// Evaluates the ordered rule list against enriched referral rows.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ReferralRule + Send + Sync>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// The production rule order: payment, ordering, reward. The first
    /// failing rule determines the rejection reason.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(PaymentRule),
                Box::new(OrderingRule),
                Box::new(RewardRule),
            ],
        }
    }

    /// Build an engine with a custom rule list.
    pub fn with_rules(rules: Vec<Box<dyn ReferralRule + Send + Sync>>) -> Self {
        Self { rules }
    }

    /// Classify one row view: first failing rule wins, all-pass is `Valid`.
    pub fn classify(&self, row: &ReferralView) -> RejectionReason {
        for rule in &self.rules {
            if let Some(reason) = rule.evaluate(row) {
                return reason;
            }
        }
        RejectionReason::Valid
    }

    /// Append `is_valid_referral` and `rejection_reason` columns to the
    /// frame and return the outcome tallies.
    pub fn validate_frame(&self, df: &mut DataFrame) -> Result<ValidationCounts> {
        let views = extract_views(df);
        let mut valid = Vec::with_capacity(views.len());
        let mut reasons = Vec::with_capacity(views.len());
        let mut counts = ValidationCounts::default();
        for view in &views {
            let reason = self.classify(view);
            counts.record(reason);
            valid.push(reason.is_valid());
            reasons.push(reason.as_str());
        }
        df.with_column(Column::new("is_valid_referral".into(), valid))
            .context("append is_valid_referral")?;
        df.with_column(Column::new("rejection_reason".into(), reasons))
            .context("append rejection_reason")?;
        debug!(
            rows = counts.rows,
            valid = counts.valid,
            invalid = counts.invalid,
            "validation columns appended"
        );
        Ok(counts)
    }
}

/// Outcome tallies for one validation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationCounts {
    pub rows: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Rows per reason string, `Valid` included.
    pub reasons: BTreeMap<String, usize>,
}

impl ValidationCounts {
    fn record(&mut self, reason: RejectionReason) {
        self.rows += 1;
        if reason.is_valid() {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
        *self.reasons.entry(reason.as_str().to_string()).or_insert(0) += 1;
    }
}

fn extract_views(df: &DataFrame) -> Vec<ReferralView> {
    let lookup = CaseInsensitiveLookup::new(df.get_column_names_owned());
    let status = resolve(df, &lookup, "transaction_status");
    let transaction_at = resolve(df, &lookup, "transaction_at");
    let referral_at = resolve(df, &lookup, "referral_at");
    // the alternate reward column name wins when both are present
    let reward = resolve(df, &lookup, "reward_value").or_else(|| resolve(df, &lookup, "reward_amount"));

    (0..df.height())
        .map(|idx| ReferralView {
            transaction_status: cell(status, idx),
            transaction_at: cell(transaction_at, idx),
            referral_at: cell(referral_at, idx),
            reward_amount: cell(reward, idx),
        })
        .collect()
}

fn resolve<'a>(
    df: &'a DataFrame,
    lookup: &CaseInsensitiveLookup,
    name: &str,
) -> Option<&'a Column> {
    lookup.get(name).and_then(|actual| df.column(actual).ok())
}

fn cell(column: Option<&Column>, idx: usize) -> Option<String> {
    column.and_then(|col| any_to_string_non_empty(col.get(idx).unwrap_or(AnyValue::Null)))
}
