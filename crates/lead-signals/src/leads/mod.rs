//! Lead lists in, enriched profiles out.

mod batch;
mod export;
mod parser;
mod summary;

pub use batch::enrich_leads;
pub use export::{
    write_batch_csv, write_json, write_profile_csv, ExportError, BATCH_CSV_HEADERS,
};
pub use summary::{BatchSummary, TierCount};

use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// One row of a lead list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    pub domain: String,
    pub company_name: Option<String>,
    /// Every column other than the domain and name, passed through untouched.
    pub standard_data: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("lead CSV must have a 'domain' column")]
    MissingDomainColumn,
    #[error("no leads found in input")]
    Empty,
}

pub struct LeadImporter;

impl LeadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeadRecord>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadRecord>, LeadImportError> {
        let leads = parser::parse_leads(reader)?;
        if leads.is_empty() {
            return Err(LeadImportError::Empty);
        }
        Ok(leads)
    }
}
