use crate::error::{FakturaError, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored work item (invoice_items)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub pk: i64,
    pub work_date: i64,        // dato
    pub job_id: String,        // id, external job reference
    pub description: String,   // beskrivelse
    pub net: f64,              // netto
    pub vat: Option<f64>,      // None = client VAT
    pub client: i64,
    pub invoice: Option<i64>,  // None until assigned
}

/// Item ready for insert. Always stored unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub work_date: i64,
    pub job_id: String,
    pub description: String,
    pub net: f64,
    pub vat: Option<f64>,
    pub client: i64,
}

/// Item line of an assembled invoice
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ItemLine {
    #[serde(rename = "dato")]
    pub work_date: i64,
    #[serde(rename = "id")]
    pub job_id: String,
    #[serde(rename = "beskrivelse")]
    pub description: String,
    #[serde(rename = "netto")]
    pub net: f64,
    pub vat: Option<f64>,
}

/// Loosely typed batch record, as read from an import file or produced by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(rename = "dato", default, skip_serializing_if = "Option::is_none")]
    pub work_date: Option<i64>,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(rename = "beskrivelse", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "netto", default, skip_serializing_if = "Option::is_none")]
    pub net: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<f64>,
}

impl ItemDraft {
    pub fn new(work_date: i64, job_id: impl Into<String>, description: impl Into<String>, net: f64) -> Self {
        Self {
            work_date: Some(work_date),
            job_id: Some(job_id.into()),
            description: Some(description.into()),
            net: Some(net),
            vat: None,
        }
    }

    /// Check the mandatory keys and bind the item to a client.
    pub fn validate(&self, client: i64) -> Result<NewItem> {
        let work_date = self.work_date.ok_or_else(|| self.missing("dato"))?;
        let job_id = self.job_id.clone().ok_or_else(|| self.missing("id"))?;
        let description = self.description.clone().ok_or_else(|| self.missing("beskrivelse"))?;
        let net = self.net.ok_or_else(|| self.missing("netto"))?;

        Ok(NewItem {
            work_date,
            job_id,
            description,
            net,
            vat: self.vat,
            client,
        })
    }

    fn missing(&self, field: &'static str) -> FakturaError {
        let item = serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self));
        FakturaError::MissingField { field, item }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_draft_validates() {
        let draft = ItemDraft::new(1_717_200_000, "J1", "Translation", 1000.0);
        let item = draft.validate(7).unwrap();
        assert_eq!(item.client, 7);
        assert_eq!(item.job_id, "J1");
        assert_eq!(item.vat, None);
    }

    #[test]
    fn missing_key_is_named_with_the_record() {
        let draft: ItemDraft =
            serde_json::from_str(r#"{"dato": 1717200000, "id": "J2", "netto": 50.0}"#).unwrap();
        match draft.validate(1) {
            Err(FakturaError::MissingField { field, item }) => {
                assert_eq!(field, "beskrivelse");
                assert!(item.contains("\"id\":\"J2\""));
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
