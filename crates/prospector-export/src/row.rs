//! Flat, six-column view of a lead.

use prospector_core::LeadRecord;

/// Column titles, in row order.
pub const HEADER: [&str; 6] = [
    "Company Name",
    "Website",
    "Description",
    "Emails",
    "LinkedIn Profiles",
    "Verification Status",
];

/// One spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    /// Company name
    pub company_name: String,
    /// Website
    pub website: String,
    /// Description
    pub description: String,
    /// Format-valid addresses joined with `", "`
    pub emails: String,
    /// Profile URLs joined with `", "`
    pub linkedin_profiles: String,
    /// Overall lead status
    pub verification_status: String,
}

impl LeadRow {
    /// Cell values in [`HEADER`] order.
    #[must_use]
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.company_name,
            self.website,
            self.description,
            self.emails,
            self.linkedin_profiles,
            self.verification_status,
        ]
    }
}

impl From<&LeadRecord> for LeadRow {
    fn from(lead: &LeadRecord) -> Self {
        Self {
            company_name: lead.company_name.clone(),
            website: lead.website.clone(),
            description: lead.description.clone(),
            emails: lead.format_valid_emails().collect::<Vec<_>>().join(", "),
            linkedin_profiles: lead.linkedin_profiles.join(", "),
            verification_status: lead.verification_status.clone(),
        }
    }
}

/// Header row followed by one row per lead.
#[must_use]
pub fn sheet_values(leads: &[LeadRecord]) -> Vec<Vec<String>> {
    std::iter::once(HEADER.iter().map(ToString::to_string).collect())
        .chain(leads.iter().map(|lead| LeadRow::from(lead).into_cells()))
        .collect()
}
