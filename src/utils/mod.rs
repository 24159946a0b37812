pub mod date;
pub mod formatting;
pub mod path;

pub use date::{UNKNOWN_YEAR, extract_date_range, extract_year};
