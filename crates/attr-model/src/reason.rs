//! Referral classification outcomes.
//!
//! Every row of the final report carries exactly one of these values in its
//! `rejection_reason` column. `Valid` is the accepted outcome; the remaining
//! variants name the first business rule the row failed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of validating one enriched referral row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// All rules passed.
    #[serde(rename = "Valid")]
    Valid,
    /// The linked transaction is missing or its status is not PAID.
    #[serde(rename = "Not Paid")]
    NotPaid,
    /// The transaction timestamp precedes the referral timestamp.
    #[serde(rename = "Transaction before Referral")]
    TransactionBeforeReferral,
    /// No reward amount is recorded for the referral.
    #[serde(rename = "No Reward")]
    NoReward,
}

impl RejectionReason {
    /// The literal reason string written to the report.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::NotPaid => "Not Paid",
            Self::TransactionBeforeReferral => "Transaction before Referral",
            Self::NoReward => "No Reward",
        }
    }

    /// True only for the accepted outcome. The report invariant is
    /// `is_valid_referral == true` iff the reason is `Valid`.
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_match_report_values() {
        assert_eq!(RejectionReason::Valid.as_str(), "Valid");
        assert_eq!(RejectionReason::NotPaid.as_str(), "Not Paid");
        assert_eq!(
            RejectionReason::TransactionBeforeReferral.as_str(),
            "Transaction before Referral"
        );
        assert_eq!(RejectionReason::NoReward.as_str(), "No Reward");
    }

    #[test]
    fn only_valid_is_valid() {
        assert!(RejectionReason::Valid.is_valid());
        assert!(!RejectionReason::NotPaid.is_valid());
        assert!(!RejectionReason::TransactionBeforeReferral.is_valid());
        assert!(!RejectionReason::NoReward.is_valid());
    }
}
