use serde::Serialize;
use serde_json::Value;

use super::domain::FormRecord;
use super::transport::{BusinessKey, IntakeGateway, TransportError};

/// JSON key carrying the server-issued identifier on every section payload.
pub const FOREIGN_KEY_FIELD: &str = "foreign_key";

/// The backend sections submitted after the creation call, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    SocialMedia,
    Goals,
    Target,
    BrandVoice,
    Content,
    Workflow,
    Marketing,
    Additional,
}

impl SectionKind {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::SocialMedia,
            Self::Goals,
            Self::Target,
            Self::BrandVoice,
            Self::Content,
            Self::Workflow,
            Self::Marketing,
            Self::Additional,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SocialMedia => "Social Media Presence",
            Self::Goals => "Goals & Objectives",
            Self::Target => "Target Audience",
            Self::BrandVoice => "Brand Voice",
            Self::Content => "Content Preferences",
            Self::Workflow => "Workflow & Communication",
            Self::Marketing => "Marketing Budget & Expectations",
            Self::Additional => "Additional Information",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::SocialMedia => "social_media_info/submit_social_info.php",
            Self::Goals => "submit_goals_info/submit_goals_info.php",
            Self::Target => "submit_target_info/submit_target_info.php",
            Self::BrandVoice => "submit_brand_voice/submit_brand_voice.php",
            Self::Content => "submit_content_info/submit_content_info.php",
            Self::Workflow => "submit_workflow_info/submit_workflow_info.php",
            Self::Marketing => "submit_marketing_info/submit_marketing_info.php",
            Self::Additional => "submit_additional_info/submit_additional_info.php",
        }
    }
}

/// One section POST: destination plus its payload builder over the record
/// and the accumulated business key.
pub struct PlanEntry {
    pub section: SectionKind,
    build: fn(&FormRecord, &BusinessKey) -> Value,
}

/// Fixed ordered pipeline executed at final submit: the creation POST, then
/// every section strictly sequentially. A saga without compensation —
/// sections already accepted by the backend are never rolled back.
pub struct SubmissionPlan {
    entries: Vec<PlanEntry>,
}

impl SubmissionPlan {
    pub fn standard() -> Self {
        let entries = SectionKind::ordered()
            .into_iter()
            .map(|section| PlanEntry {
                section,
                build: match section {
                    SectionKind::Additional => additional_payload,
                    _ => full_record_payload,
                },
            })
            .collect();
        Self { entries }
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.entries.iter().map(|entry| entry.section)
    }

    /// Run the plan to completion or first failure. Entry *i + 1* is not
    /// issued until entry *i*'s response has been parsed, because every
    /// entry after the first carries the creation key.
    pub async fn execute<G>(
        &self,
        record: &FormRecord,
        gateway: &G,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        G: IntakeGateway + ?Sized,
    {
        let envelope = gateway
            .create_business(&record.to_json())
            .await
            .map_err(SubmissionError::creation)?;

        if !envelope.success {
            return Err(SubmissionError::Creation {
                reason: envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }
        let Some(id) = envelope.id else {
            return Err(SubmissionError::Creation {
                reason: "backend response carried no identifier".to_string(),
            });
        };
        let key = BusinessKey(id);

        for entry in &self.entries {
            let payload = (entry.build)(record, &key);
            let envelope = gateway
                .submit_section(entry.section.path(), &payload)
                .await
                .map_err(|err| SubmissionError::section(entry.section, err))?;

            if !envelope.success {
                return Err(SubmissionError::Section {
                    section: entry.section,
                    reason: envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
                });
            }
        }

        Ok(SubmissionReceipt { business_key: key })
    }
}

impl Default for SubmissionPlan {
    fn default() -> Self {
        Self::standard()
    }
}

/// Proof of a fully accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub business_key: BusinessKey,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Error submitting Business Info: {reason}")]
    Creation { reason: String },
    #[error("Error submitting {}: {reason}", .section.label())]
    Section {
        section: SectionKind,
        reason: String,
    },
}

impl SubmissionError {
    fn creation(err: TransportError) -> Self {
        Self::Creation {
            reason: err.to_string(),
        }
    }

    fn section(section: SectionKind, err: TransportError) -> Self {
        Self::Section {
            section,
            reason: err.to_string(),
        }
    }
}

fn full_record_payload(record: &FormRecord, key: &BusinessKey) -> Value {
    let mut payload = match record.to_json() {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    payload.insert(FOREIGN_KEY_FIELD.to_string(), key.0.clone());
    Value::Object(payload)
}

fn additional_payload(record: &FormRecord, key: &BusinessKey) -> Value {
    let mut payload = record.additional_info();
    payload.insert(FOREIGN_KEY_FIELD.to_string(), key.0.clone());
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::onboarding::domain::{fields, FormPatch};

    #[test]
    fn plan_covers_every_section_once_in_order() {
        let plan = SubmissionPlan::standard();
        let sections: Vec<_> = plan.sections().collect();
        assert_eq!(sections, SectionKind::ordered());
    }

    #[test]
    fn section_payload_carries_the_foreign_key() {
        let mut record = FormRecord::template();
        record.apply(FormPatch::new().text(fields::BUSINESS_NAME, "Acme"));
        let key = BusinessKey(Value::from(7));

        let payload = full_record_payload(&record, &key);
        assert_eq!(payload[FOREIGN_KEY_FIELD], Value::from(7));
        assert_eq!(payload[fields::BUSINESS_NAME], Value::from("Acme"));
    }

    #[test]
    fn additional_payload_is_the_sub_record_only() {
        let mut record = FormRecord::template();
        record.apply(
            FormPatch::new()
                .text(fields::ADMIRE_ACCOUNTS, "@craftlab")
                .text(fields::BUSINESS_NAME, "Acme"),
        );
        let payload = additional_payload(&record, &BusinessKey(Value::from("9")));

        assert_eq!(payload[fields::ADMIRE_ACCOUNTS], Value::from("@craftlab"));
        assert!(payload.get(fields::BUSINESS_NAME).is_none());
        assert_eq!(payload[FOREIGN_KEY_FIELD], Value::from("9"));
    }

    #[test]
    fn section_error_names_the_failing_step() {
        let err = SubmissionError::Section {
            section: SectionKind::Target,
            reason: "duplicate row".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error submitting Target Audience: duplicate row"
        );
    }
}
