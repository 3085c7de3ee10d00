pub mod coerce;
pub mod datetime;
pub mod join;

pub use coerce::{coerce_id_columns, coerce_numeric_column};
pub use datetime::parse_timestamp;
pub use join::{EnrichInput, REFEREE_ROLE, REFERRER_ROLE, enrich};
