//! Job export of the XTRF translation management platform.
//!
//! Only the fields needed to bill a job are modelled; everything else in the
//! export is ignored.

use crate::error::{FakturaError, Result};
use crate::models::ItemDraft;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XtrfJob {
    pub overview: JobOverview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOverview {
    pub id_number: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub source_language: Language,
    #[serde(default)]
    pub target_languages: Vec<Language>,
    /// Milliseconds since the epoch
    pub delivery_date: i64,
    pub job_value: JobValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobValue {
    pub value: f64,
}

/// Parse a JSON array of jobs
pub fn parse_export(json: &str) -> Result<Vec<XtrfJob>> {
    Ok(serde_json::from_str(json)?)
}

/// Map jobs to item drafts: "type source target" as description, delivery
/// date in seconds as work date, job value as net amount.
pub fn to_item_drafts(jobs: &[XtrfJob]) -> Result<Vec<ItemDraft>> {
    jobs.iter().map(to_item_draft).collect()
}

fn to_item_draft(job: &XtrfJob) -> Result<ItemDraft> {
    let overview = &job.overview;
    let target = overview
        .target_languages
        .first()
        .ok_or_else(|| FakturaError::MissingField {
            field: "targetLanguages",
            item: overview.id_number.clone(),
        })?;

    let description = [
        overview.job_type.as_str(),
        overview.source_language.name.as_str(),
        target.name.as_str(),
    ]
    .join(" ");

    Ok(ItemDraft::new(
        overview.delivery_date / 1000,
        overview.id_number.clone(),
        description,
        overview.job_value.value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"[
        {
            "overview": {
                "idNumber": "2024/118-1",
                "type": "Translation",
                "sourceLanguage": {"name": "English"},
                "targetLanguages": [{"name": "Norwegian"}, {"name": "Swedish"}],
                "deliveryDate": 1717243200000,
                "jobValue": {"value": 1250.5, "currency": "NOK"},
                "status": "CLOSED"
            }
        }
    ]"#;

    #[test]
    fn maps_overview_to_item_draft() {
        let jobs = parse_export(EXPORT).unwrap();
        let drafts = to_item_drafts(&jobs).unwrap();

        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.job_id.as_deref(), Some("2024/118-1"));
        assert_eq!(draft.description.as_deref(), Some("Translation English Norwegian"));
        assert_eq!(draft.work_date, Some(1_717_243_200));
        assert_eq!(draft.net, Some(1250.5));
        assert_eq!(draft.vat, None);
    }

    #[test]
    fn job_without_target_language_is_rejected() {
        let mut jobs = parse_export(EXPORT).unwrap();
        jobs[0].overview.target_languages.clear();

        let err = to_item_drafts(&jobs).unwrap_err();
        assert!(matches!(err, FakturaError::MissingField { field: "targetLanguages", .. }));
    }
}
