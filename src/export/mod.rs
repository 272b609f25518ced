//! Report serialization.
//!
//! The export layer serializes whatever [`crate::types::FoodTable`] it is
//! handed; the caller filters first ([`crate::types::FoodTable::filter_by_date_range`],
//! [`crate::types::FoodTable::select_nutrients`]) and exports second. Output is
//! a byte buffer suitable for a file download; there is no partial-success
//! mode.

pub mod csv;
pub mod xlsx;

pub use csv::export_csv;
pub use xlsx::export_xlsx;
