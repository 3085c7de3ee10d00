//! The ordered business rules deciding referral validity.
//!
//! Each rule is independent and sees the same row view; the engine runs
//! them in priority order and the first failure wins. Keeping them as
//! separate units makes reordering trivial and lets each be tested against
//! a hand-built row.

use attr_model::RejectionReason;
use attr_transform::parse_timestamp;

/// The fields of one enriched referral row that the rules consume. All raw
/// text; interpretation happens inside the rule that needs it.
#[derive(Debug, Default, Clone)]
pub struct ReferralView {
    pub transaction_status: Option<String>,
    pub transaction_at: Option<String>,
    pub referral_at: Option<String>,
    pub reward_amount: Option<String>,
}

/// A single validity rule: passes silently or yields its rejection reason.
pub trait ReferralRule {
    fn name(&self) -> &'static str;
    fn evaluate(&self, row: &ReferralView) -> Option<RejectionReason>;
}

/// The linked transaction must carry status PAID, compared case-
/// insensitively. A missing transaction counts as not paid.
pub struct PaymentRule;

impl ReferralRule for PaymentRule {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn evaluate(&self, row: &ReferralView) -> Option<RejectionReason> {
        let paid = row
            .transaction_status
            .as_deref()
            .map(|status| status.trim().eq_ignore_ascii_case("PAID"))
            .unwrap_or(false);
        (!paid).then_some(RejectionReason::NotPaid)
    }
}

/// The transaction must not predate the referral. When either timestamp is
/// missing or unparseable the comparison is unverifiable and the rule
/// passes.
pub struct OrderingRule;

impl ReferralRule for OrderingRule {
    fn name(&self) -> &'static str {
        "ordering"
    }

    fn evaluate(&self, row: &ReferralView) -> Option<RejectionReason> {
        let transaction_at = row.transaction_at.as_deref().and_then(parse_timestamp);
        let referral_at = row.referral_at.as_deref().and_then(parse_timestamp);
        match (transaction_at, referral_at) {
            (Some(transaction), Some(referral)) if transaction < referral => {
                Some(RejectionReason::TransactionBeforeReferral)
            }
            _ => None,
        }
    }
}

/// A reward amount must be recorded.
pub struct RewardRule;

impl ReferralRule for RewardRule {
    fn name(&self) -> &'static str {
        "reward"
    }

    fn evaluate(&self, row: &ReferralView) -> Option<RejectionReason> {
        row.reward_amount
            .is_none()
            .then_some(RejectionReason::NoReward)
    }
}
