pub mod engine;
pub mod rules;
pub mod summary;

pub use engine::{ValidationCounts, ValidationEngine};
pub use rules::{OrderingRule, PaymentRule, ReferralRule, ReferralView, RewardRule};
pub use summary::{RunSummary, write_validation_summary_json};
