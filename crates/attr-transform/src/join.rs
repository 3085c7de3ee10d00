//! Left-join assembly of the enriched referral frame.
//!
//! The referral table anchors row identity: every join is a left join seeded
//! from it, and the output row count must equal the referral row count. The
//! activity log joins twice, once per role; each copy has *all* of its
//! columns renamed with the role suffix before joining, so the two results
//! coexist without any collision-dependent renaming.
//!
//! Multiplicity policy: the lookup side of each join is deduplicated on its
//! key (first occurrence wins) before joining, so a duplicated key in a
//! secondary table cannot fan referral rows out. The row-count invariant is
//! still verified after every join.

use std::collections::HashSet;

use anyhow::{Context, Result, ensure};
use polars::prelude::*;
use tracing::debug;

use attr_ingest::any_to_f64;

/// Role suffix for the first log join.
pub const REFERRER_ROLE: &str = "referrer";
/// Role suffix for the second log join.
pub const REFEREE_ROLE: &str = "referee";

/// The four coerced tables feeding enrichment.
#[derive(Debug)]
pub struct EnrichInput<'a> {
    pub referrals: &'a DataFrame,
    pub user_logs: &'a DataFrame,
    pub transactions: &'a DataFrame,
    pub rewards: &'a DataFrame,
}

/// Build one enriched row per referral: both role-tagged log matches, the
/// transaction, and the reward.
pub fn enrich(input: EnrichInput<'_>) -> Result<DataFrame> {
    let logs = dedupe_on_key(input.user_logs, "user_id")?;
    let logs_referrer = suffix_all_columns(&logs, REFERRER_ROLE)?;
    let logs_referee = suffix_all_columns(&logs, REFEREE_ROLE)?;

    let enriched = left_join(
        input.referrals,
        &logs_referrer,
        "referrer_id",
        "user_id_referrer",
    )?;
    let enriched = left_join(&enriched, &logs_referee, "referee_id", "user_id_referee")?;

    let transactions = dedupe_on_key(input.transactions, "transaction_id")?;
    let transactions =
        suffix_colliding_columns(&enriched, &transactions, "transaction_id", "_transaction")?;
    let enriched = left_join(&enriched, &transactions, "transaction_id", "transaction_id")?;

    let rewards = dedupe_on_key(input.rewards, "id")?;
    let rewards = suffix_colliding_columns(&enriched, &rewards, "id", "_reward")?;
    let enriched = left_join(&enriched, &rewards, "referral_reward_id", "id")?;

    debug!(
        rows = enriched.height(),
        columns = enriched.width(),
        "enrichment joins complete"
    );
    Ok(enriched)
}

/// Left join preserving the left frame's row order and count. Null keys
/// never match (the polars default for join keys).
fn left_join(
    left: &DataFrame,
    right: &DataFrame,
    left_on: &str,
    right_on: &str,
) -> Result<DataFrame> {
    let mut args = JoinArgs::new(JoinType::Left);
    args.maintain_order = MaintainOrderJoin::Left;
    let joined = left
        .clone()
        .lazy()
        .join(right.clone().lazy(), [col(left_on)], [col(right_on)], args)
        .collect()
        .with_context(|| format!("left join on {left_on} = {right_on}"))?;
    ensure!(
        joined.height() == left.height(),
        "join on {left_on} = {right_on} changed row count: {} -> {}",
        left.height(),
        joined.height()
    );
    Ok(joined)
}

/// Rename every column of `df` with a `_{role}` suffix.
fn suffix_all_columns(df: &DataFrame, role: &str) -> Result<DataFrame> {
    let mut tagged = df.clone();
    for name in df.get_column_names_owned() {
        let renamed = format!("{name}_{role}");
        tagged
            .rename(name.as_str(), renamed.into())
            .with_context(|| format!("tag column {name} with role {role}"))?;
    }
    Ok(tagged)
}

/// Rename lookup-side columns (other than the join key) that collide with a
/// column already in the enriched frame.
fn suffix_colliding_columns(
    left: &DataFrame,
    right: &DataFrame,
    key: &str,
    suffix: &str,
) -> Result<DataFrame> {
    let existing: HashSet<String> = left
        .get_column_names_owned()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut out = right.clone();
    for name in right.get_column_names_owned() {
        if name.as_str() == key {
            continue;
        }
        if existing.contains(name.as_str()) {
            let renamed = format!("{name}{suffix}");
            out.rename(name.as_str(), renamed.into())
                .with_context(|| format!("suffix colliding column {name}"))?;
        }
    }
    Ok(out)
}

/// Keep the first row per key value. Rows with null keys cannot match a left
/// join and are dropped from the lookup side.
fn dedupe_on_key(df: &DataFrame, key: &str) -> Result<DataFrame> {
    let mut keep: Vec<IdxSize> = Vec::with_capacity(df.height());
    {
        let column = df
            .column(key)
            .with_context(|| format!("dedupe key {key}"))?;
        let mut seen: HashSet<u64> = HashSet::with_capacity(df.height());
        for idx in 0..df.height() {
            let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) else {
                continue;
            };
            if seen.insert(value.to_bits()) {
                keep.push(idx as IdxSize);
            }
        }
    }
    if keep.len() < df.height() {
        debug!(
            key,
            dropped = df.height() - keep.len(),
            "deduplicated lookup table"
        );
    }
    df.take(&IdxCa::from_vec("keep".into(), keep))
        .with_context(|| format!("dedupe on {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs() -> DataFrame {
        DataFrame::new(vec![
            Column::new("user_id".into(), vec![Some(101.0f64), Some(201.0)]),
            Column::new("signup_source".into(), vec!["web", "mobile"]),
        ])
        .expect("logs frame")
    }

    #[test]
    fn role_suffix_applies_to_every_column() {
        let tagged = suffix_all_columns(&logs(), REFERRER_ROLE).expect("suffix");
        let names: Vec<String> = tagged
            .get_column_names_owned()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["user_id_referrer", "signup_source_referrer"]);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let df = DataFrame::new(vec![
            Column::new("id".into(), vec![Some(1.0f64), Some(1.0), None, Some(2.0)]),
            Column::new("reward_amount".into(), vec!["10", "99", "5", "20"]),
        ])
        .expect("frame");
        let deduped = dedupe_on_key(&df, "id").expect("dedupe");
        assert_eq!(deduped.height(), 2);
        let amounts = deduped.column("reward_amount").expect("column");
        assert_eq!(
            amounts.get(0).unwrap_or(AnyValue::Null),
            AnyValue::String("10")
        );
    }

    #[test]
    fn colliding_columns_are_suffixed() {
        let left = DataFrame::new(vec![
            Column::new("referral_reward_id".into(), vec![Some(1.0f64)]),
            Column::new("referral_at".into(), vec!["2024-01-01"]),
        ])
        .expect("left");
        let right = DataFrame::new(vec![
            Column::new("id".into(), vec![Some(1.0f64)]),
            Column::new("referral_at".into(), vec!["2023-12-31"]),
            Column::new("reward_amount".into(), vec!["10"]),
        ])
        .expect("right");
        let renamed = suffix_colliding_columns(&left, &right, "id", "_reward").expect("suffix");
        assert!(renamed.column("referral_at_reward").is_ok());
        assert!(renamed.column("reward_amount").is_ok());
        assert!(renamed.column("id").is_ok());
    }
}
