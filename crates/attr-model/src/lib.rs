pub mod lookup;
pub mod reason;
pub mod schema;

pub use lookup::CaseInsensitiveLookup;
pub use reason::RejectionReason;
pub use schema::{
    REFERRALS, REPORT_COLUMNS, REWARDS, ReportColumn, SECONDARY_TABLES, TRANSACTIONS, TableSpec,
    USER_LOGS,
};
