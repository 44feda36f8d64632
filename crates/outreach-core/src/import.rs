//! CSV lead import
//!
//! Parsing is a naive comma split with no quoting support; that is the
//! documented contract of the import flow, so the usual CSV machinery is
//! deliberately not involved.

use outreach_common::{Error, Result};
use outreach_store::service::NewLead;
use serde::Deserialize;
use std::collections::HashMap;

/// A lead field a CSV column can be mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Email,
    FirstName,
    LastName,
    Company,
    Title,
    Phone,
    Website,
    Linkedin,
    /// Ignore this column
    Skip,
}

/// Header-name to lead-field mapping supplied by the caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldMapping(pub HashMap<String, LeadField>);

impl FieldMapping {
    fn field_for(&self, header: &str) -> Option<LeadField> {
        self.0.get(header).copied()
    }

    fn maps_email(&self) -> bool {
        self.0.values().any(|f| *f == LeadField::Email)
    }
}

/// Header row plus the first few data rows, for the mapping step
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Number of data rows shown in the preview
const PREVIEW_ROWS: usize = 5;

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Parse the header row and a short preview of the data
pub fn parse_csv_preview(text: &str) -> Result<CsvPreview> {
    let mut lines = text.lines();
    let headers = lines
        .next()
        .filter(|l| !l.trim().is_empty())
        .map(split_row)
        .ok_or_else(|| Error::Import("CSV file is empty".to_string()))?;

    let rows = lines
        .filter(|l| !l.trim().is_empty())
        .take(PREVIEW_ROWS)
        .map(split_row)
        .collect();

    Ok(CsvPreview { headers, rows })
}

/// Parse the full file into leads using the supplied column mapping.
///
/// Columns mapped to `skip` (or not mapped at all) are ignored; rows that end
/// up without an email are dropped.
pub fn parse_leads(text: &str, mapping: &FieldMapping) -> Result<Vec<NewLead>> {
    if !mapping.maps_email() {
        return Err(Error::Import("Email column mapping is required".to_string()));
    }

    let mut lines = text.lines();
    let headers = lines
        .next()
        .filter(|l| !l.trim().is_empty())
        .map(split_row)
        .ok_or_else(|| Error::Import("CSV file is empty".to_string()))?;

    let mut leads = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(line);
        let mut lead = NewLead::default();

        for (i, header) in headers.iter().enumerate() {
            let value = cells.get(i).cloned().unwrap_or_default();
            match mapping.field_for(header) {
                Some(LeadField::Email) => lead.email = value,
                Some(LeadField::FirstName) => lead.first_name = non_empty(value),
                Some(LeadField::LastName) => lead.last_name = non_empty(value),
                Some(LeadField::Company) => lead.company = non_empty(value),
                Some(LeadField::Title) => lead.title = non_empty(value),
                Some(LeadField::Phone) => lead.phone = non_empty(value),
                Some(LeadField::Website) => lead.website = non_empty(value),
                Some(LeadField::Linkedin) => lead.linkedin = non_empty(value),
                Some(LeadField::Skip) | None => {}
            }
        }

        if !lead.email.is_empty() {
            leads.push(lead);
        }
    }

    Ok(leads)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Email,First,Last,Notes\n\
                       ada@example.com,Ada,Lovelace,math\n\
                       ,Charles,Babbage,engines\n\
                       grace@example.com,Grace,Hopper,compilers\n";

    fn mapping() -> FieldMapping {
        let mut m = HashMap::new();
        m.insert("Email".to_string(), LeadField::Email);
        m.insert("First".to_string(), LeadField::FirstName);
        m.insert("Last".to_string(), LeadField::LastName);
        m.insert("Notes".to_string(), LeadField::Skip);
        FieldMapping(m)
    }

    #[test]
    fn test_preview_limits_rows() {
        let mut text = "a,b\n".to_string();
        for i in 0..10 {
            text.push_str(&format!("x{},y{}\n", i, i));
        }
        let preview = parse_csv_preview(&text).unwrap();
        assert_eq!(preview.headers, vec!["a", "b"]);
        assert_eq!(preview.rows.len(), 5);
    }

    #[test]
    fn test_preview_empty_file() {
        assert!(parse_csv_preview("").is_err());
        assert!(parse_csv_preview("   \n").is_err());
    }

    #[test]
    fn test_parse_leads_applies_mapping_and_drops_rows_without_email() {
        let leads = parse_leads(CSV, &mapping()).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].email, "ada@example.com");
        assert_eq!(leads[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(leads[1].email, "grace@example.com");
        // Skip columns never land anywhere
        assert!(leads[0].company.is_none());
    }

    #[test]
    fn test_parse_leads_requires_email_mapping() {
        let mut m = HashMap::new();
        m.insert("First".to_string(), LeadField::FirstName);
        let err = parse_leads(CSV, &FieldMapping(m)).unwrap_err();
        assert!(err.to_string().contains("Email column mapping"));
    }

    #[test]
    fn test_parse_leads_tolerates_short_rows() {
        let leads = parse_leads("Email,First\nada@example.com\n", &mapping()).unwrap();
        assert_eq!(leads.len(), 1);
        assert!(leads[0].first_name.is_none());
    }

    #[test]
    fn test_no_quoting_support_is_contractual() {
        // A quoted comma splits anyway; the import is a naive comma split.
        let mut m = HashMap::new();
        m.insert("Email".to_string(), LeadField::Email);
        m.insert("Company".to_string(), LeadField::Company);
        let leads =
            parse_leads("Email,Company\nada@example.com,\"Lovelace, Ltd\"\n", &FieldMapping(m))
                .unwrap();
        assert_eq!(leads[0].company.as_deref(), Some("\"Lovelace"));
    }
}
