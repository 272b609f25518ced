//! `diet-tracker-core` is the data engine of a dietary dashboard: it ingests an
//! uploaded food-log spreadsheet into an in-memory [`types::FoodTable`],
//! aggregates nutrient columns against a recommended-daily-allowance reference,
//! reshapes the data into chart-ready series, and serializes a (possibly
//! filtered) report back to spreadsheet bytes for download.
//!
//! The rendering UI is not part of this crate; a web frontend calls these
//! functions per session. Nothing is persisted: every table, totals map, and
//! report lives only as long as the session that built it.
//!
//! ## Pipeline
//!
//! 1. **Ingestion** ([`ingest`]): parse uploaded bytes (`.xlsx`/`.xls`/`.xlsm`/
//!    `.xlsb`/`.ods` or `.csv`, auto-detected by extension) into a
//!    [`types::FoodTable`]. Column roles (date, free-text food descriptors,
//!    numeric nutrient columns) are discovered from the header and data;
//!    uploads need no declared schema.
//! 2. **Aggregation** ([`analysis`]): sum or average nutrient columns, whole
//!    table or per day, and compare totals against an [`analysis::RdaReference`].
//! 3. **Presentation** ([`present`]): reshape per-day totals into ordered
//!    `(date, value)` series per nutrient.
//! 4. **Export** ([`export`]): serialize the current table to XLSX or CSV bytes.
//!
//! Ingestion feeds aggregation; presentation and export both consume
//! aggregation's output but not each other's.
//!
//! ## Quick example: ingest an upload
//!
//! ```no_run
//! use diet_tracker_core::ingest::{ingest_upload, UploadOptions};
//!
//! # fn main() -> Result<(), diet_tracker_core::DietError> {
//! let bytes = std::fs::read("food_log.xlsx")?;
//! let table = ingest_upload("food_log.xlsx", &bytes, &UploadOptions::default())?;
//! println!("rows={}", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Aggregate and compare against the RDA table
//!
//! ```rust
//! use chrono::NaiveDate;
//! use diet_tracker_core::analysis::{
//!     compare_with_rda, nutrient_totals, AggregateMode, RdaReference,
//! };
//! use diet_tracker_core::types::{Cell, Column, ColumnRole, FoodTable, TableSchema};
//!
//! let schema = TableSchema::new(vec![
//!     Column::new("date", ColumnRole::Date),
//!     Column::new("food", ColumnRole::Text),
//!     Column::new("sodium", ColumnRole::Nutrient),
//! ]);
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let table = FoodTable::new(schema, vec![
//!     vec![Cell::Date(day), Cell::Text("Soup".to_string()), Cell::Number(650.0)],
//!     vec![Cell::Date(day), Cell::Text("Crackers".to_string()), Cell::Number(500.0)],
//! ]);
//!
//! let totals = nutrient_totals(&table, AggregateMode::Sum);
//! let comparisons = compare_with_rda(&totals, RdaReference::builtin());
//! assert_eq!(comparisons[0].actual, 1150.0);
//! assert_eq!(comparisons[0].percent_of_rda, Some(50.0));
//! ```
//!
//! ## Filter a report and export it
//!
//! ```rust
//! use chrono::NaiveDate;
//! use diet_tracker_core::export::export_xlsx;
//! use diet_tracker_core::types::{Cell, Column, ColumnRole, FoodTable, TableSchema};
//!
//! # fn main() -> Result<(), diet_tracker_core::DietError> {
//! let schema = TableSchema::new(vec![
//!     Column::new("date", ColumnRole::Date),
//!     Column::new("calories", ColumnRole::Nutrient),
//! ]);
//! let table = FoodTable::new(schema, vec![
//!     vec![
//!         Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
//!         Cell::Number(500.0),
//!     ],
//! ]);
//!
//! let report = table.filter_by_date_range(
//!     Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
//!     None,
//! );
//! let bytes = export_xlsx(&report)?;
//! assert!(!bytes.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: unified upload ingestion and format-specific implementations
//! - [`types`]: the food table, schema, and entry-view types
//! - [`analysis`]: totals, RDA comparison, scoring, statistics
//! - [`present`]: chart-ready series and rankings
//! - [`export`]: XLSX/CSV report serialization
//! - [`error`]: the shared error type

pub mod analysis;
pub mod error;
pub mod export;
pub mod ingest;
pub mod present;
pub mod types;

pub use error::{DietError, DietResult};
