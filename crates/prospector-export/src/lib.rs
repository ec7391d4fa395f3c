//! Prospector Export - destinations for consolidated leads.
//!
//! Leads are flattened to six columns ([`HEADER`]) for spreadsheets, or
//! written whole as JSON when no spreadsheet credential is configured.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod row;
pub mod sheets;
pub mod sink;

pub use error::{ExportError, Result};
pub use row::{sheet_values, LeadRow, HEADER};
pub use sheets::SheetsExporter;
pub use sink::{JsonFileSink, LeadSink};
