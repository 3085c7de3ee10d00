pub mod discovery;
pub mod error;
pub mod loader;
pub mod values;

pub use discovery::list_csv_files;
pub use error::{IngestError, Result};
pub use loader::{
    LoadedTable, empty_table, load_referrals, load_secondary, read_table, read_table_inferred,
};
pub use values::{any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
