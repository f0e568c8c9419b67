use super::{LeadImportError, LeadRecord};
use serde_json::{Map, Value};
use std::io::Read;
use tracing::warn;

const DOMAIN_COLUMN: &str = "domain";
const NAME_COLUMNS: [&str; 2] = ["company_name", "name"];

pub(crate) fn parse_leads<R: Read>(reader: R) -> Result<Vec<LeadRecord>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let domain_idx = headers
        .iter()
        .position(|header| header == DOMAIN_COLUMN)
        .ok_or(LeadImportError::MissingDomainColumn)?;
    let name_idx = NAME_COLUMNS
        .iter()
        .find_map(|column| headers.iter().position(|header| header == column));

    let mut leads = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;

        let domain = record.get(domain_idx).unwrap_or_default().to_string();
        if domain.is_empty() {
            warn!(row = row + 1, "skipping lead without a domain");
            continue;
        }

        let company_name = name_idx
            .and_then(|idx| record.get(idx))
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let mut standard_data = Map::new();
        for (idx, header) in headers.iter().enumerate() {
            if idx == domain_idx || Some(idx) == name_idx {
                continue;
            }
            let value = record.get(idx).unwrap_or_default();
            standard_data.insert(header.clone(), Value::String(value.to_string()));
        }

        leads.push(LeadRecord {
            domain,
            company_name,
            standard_data,
        });
    }

    Ok(leads)
}
