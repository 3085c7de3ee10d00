//! Fixed schemas: the four input tables and the seven report columns.
//!
//! Input files live under a single data directory with fixed names. Each
//! table declares the minimum columns the pipeline relies on and the subset
//! of identifier columns that must be coerced to a nullable numeric type
//! before joining.

/// One of the raw input tables.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Short table name used in logs and summaries.
    pub name: &'static str,
    /// File name inside the data directory.
    pub file_name: &'static str,
    /// Minimum columns; an absent table is substituted by an empty frame
    /// with exactly these columns.
    pub required_columns: &'static [&'static str],
    /// Join-key columns coerced to nullable Float64.
    pub id_columns: &'static [&'static str],
}

/// The referral table. The one fatal precondition of a run: this table must
/// exist and contain at least one row.
pub const REFERRALS: TableSpec = TableSpec {
    name: "referrals",
    file_name: "user_referrals.csv",
    required_columns: &[
        "referral_id",
        "referrer_id",
        "referee_id",
        "transaction_id",
        "referral_reward_id",
        "referral_at",
    ],
    id_columns: &[
        "referrer_id",
        "referee_id",
        "transaction_id",
        "referral_reward_id",
    ],
};

/// User activity logs, joined twice under the referrer and referee roles.
pub const USER_LOGS: TableSpec = TableSpec {
    name: "user_logs",
    file_name: "user_logs.csv",
    required_columns: &["user_id"],
    id_columns: &["user_id"],
};

/// Paid transactions.
pub const TRANSACTIONS: TableSpec = TableSpec {
    name: "transactions",
    file_name: "paid_transactions.csv",
    required_columns: &["transaction_id", "transaction_status", "transaction_at"],
    id_columns: &["transaction_id"],
};

/// Referral rewards. The amount may arrive as `reward_amount` or under the
/// alternate name `reward_value`.
pub const REWARDS: TableSpec = TableSpec {
    name: "rewards",
    file_name: "referral_rewards.csv",
    required_columns: &["id", "reward_amount"],
    id_columns: &["id"],
};

/// The three tables a run proceeds without.
pub const SECONDARY_TABLES: [TableSpec; 3] = [USER_LOGS, TRANSACTIONS, REWARDS];

/// One column of the final report, with the metadata the data dictionary
/// publishes.
#[derive(Debug, Clone, Copy)]
pub struct ReportColumn {
    pub name: &'static str,
    pub data_type: &'static str,
    pub description: &'static str,
}

/// The report columns in output order. Projection selects whichever of these
/// are present in the validated frame, in this order.
pub const REPORT_COLUMNS: [ReportColumn; 7] = [
    ReportColumn {
        name: "referral_id",
        data_type: "String",
        description: "Unique identifier for the referral record",
    },
    ReportColumn {
        name: "referrer_id",
        data_type: "Integer",
        description: "Unique ID of the referrer",
    },
    ReportColumn {
        name: "referee_id",
        data_type: "Integer",
        description: "Unique ID of the referee",
    },
    ReportColumn {
        name: "is_valid_referral",
        data_type: "Boolean",
        description: "True if referral meets valid criteria, else False",
    },
    ReportColumn {
        name: "rejection_reason",
        data_type: "String",
        description: "Reason why referral is invalid (if applicable)",
    },
    ReportColumn {
        name: "reward_amount",
        data_type: "Float",
        description: "Reward value",
    },
    ReportColumn {
        name: "transaction_status",
        data_type: "String",
        description: "Transaction status (e.g., PAID)",
    },
];
