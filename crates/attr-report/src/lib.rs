pub mod dictionary;
pub mod profile;
pub mod projection;
pub mod writer;

pub use dictionary::{DICTIONARY_FILE_NAME, write_data_dictionary};
pub use profile::{
    ColumnProfile, PROFILE_FILE_NAME, profile_directory, profile_table, write_profile_csv,
};
pub use projection::project_report;
pub use writer::{REPORT_FILE_NAME, write_report_csv};
