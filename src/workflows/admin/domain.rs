use std::fmt;

use chrono::NaiveDate;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for submitted businesses. The backend emits both
/// numeric and string ids, so deserialization accepts either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BusinessId(pub String);

impl<'de> Deserialize<'de> for BusinessId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(Self(raw)),
            Value::Number(raw) => Ok(Self(raw.to_string())),
            other => Err(D::Error::custom(format!(
                "business id must be a string or number, got {other}"
            ))),
        }
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    Active,
    #[default]
    Pending,
}

impl BusinessStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Pending,
            Self::Pending => Self::Active,
        }
    }
}

/// One row of the business directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub id: BusinessId,
    pub business_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: BusinessStatus,
    #[serde(default)]
    pub submitted_at: Option<NaiveDate>,
}

/// A full business record with the nested per-section objects. Sections the
/// backend has not stored come back absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessDetail {
    pub id: BusinessId,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub social_media_info: Option<SocialMediaInfo>,
    #[serde(default)]
    pub goals_info: Option<GoalsInfo>,
    #[serde(default)]
    pub target_info: Option<TargetInfo>,
    #[serde(default)]
    pub brand_voice: Option<BrandVoiceInfo>,
    #[serde(default)]
    pub content_preferences: Option<ContentInfo>,
    #[serde(default)]
    pub workflow_info: Option<WorkflowInfo>,
    #[serde(default)]
    pub marketing_info: Option<MarketingInfo>,
    #[serde(default)]
    pub additional_info: Option<AdditionalInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialMediaInfo {
    #[serde(default)]
    pub social_accounts_exist: Option<String>,
    #[serde(default)]
    pub selected_platforms: Vec<String>,
    #[serde(default)]
    pub other_platform: Option<String>,
    #[serde(default)]
    pub setup_redesign: Option<String>,
    #[serde(default)]
    pub setup_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalsInfo {
    #[serde(default)]
    pub selected_goals: Vec<String>,
    #[serde(default)]
    pub other_goal_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetInfo {
    #[serde(default)]
    pub selected_ages: Vec<String>,
    #[serde(default)]
    pub selected_genders: Vec<String>,
    #[serde(default)]
    pub target_location: Option<String>,
    #[serde(default)]
    pub target_interests: Option<String>,
    #[serde(default)]
    pub target_profession: Option<String>,
    #[serde(default)]
    pub target_other_details: Option<String>,
    #[serde(default)]
    pub target_industries: Option<String>,
    #[serde(default)]
    pub target_pain_points: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandVoiceInfo {
    #[serde(default)]
    pub selected_voices: Vec<String>,
    #[serde(default)]
    pub other_voice: Option<String>,
    #[serde(default)]
    pub brand_phrases: Option<String>,
    #[serde(default)]
    pub brand_exclusions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentInfo {
    #[serde(default)]
    pub selected_content_types: Vec<String>,
    #[serde(default)]
    pub other_content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowInfo {
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub reviewer_location: Option<String>,
    #[serde(default)]
    pub reviewer_phone: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub preferred_contact_modes: Vec<String>,
    #[serde(default)]
    pub other_contact_method: Option<String>,
    #[serde(default)]
    pub report_frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketingInfo {
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub selected_kpis: Vec<String>,
    #[serde(default)]
    pub other_kpi: Option<String>,
    #[serde(default)]
    pub expected_results: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(default)]
    pub admire_accounts: Option<String>,
    #[serde(default)]
    pub competitors: Option<String>,
    #[serde(default)]
    pub upcoming_launches: Option<String>,
    #[serde(default)]
    pub other_info: Option<String>,
}

impl Default for BusinessId {
    fn default() -> Self {
        Self(String::new())
    }
}

/// Credentials posted to the backend login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_id_accepts_numbers_and_strings() {
        let numeric: BusinessId = serde_json::from_str("17").expect("number parses");
        assert_eq!(numeric, BusinessId("17".to_string()));
        let text: BusinessId = serde_json::from_str("\"17\"").expect("string parses");
        assert_eq!(text, numeric);
        assert!(serde_json::from_str::<BusinessId>("[17]").is_err());
    }

    #[test]
    fn summary_tolerates_sparse_rows() {
        let summary: BusinessSummary =
            serde_json::from_str(r#"{"id": 3, "business_name": "Acme"}"#).expect("parses");
        assert_eq!(summary.status, BusinessStatus::Pending);
        assert!(summary.location.is_none());
    }

    #[test]
    fn detail_sections_default_to_absent() {
        let detail: BusinessDetail =
            serde_json::from_str(r#"{"id": "3", "business_name": "Acme"}"#).expect("parses");
        assert!(detail.social_media_info.is_none());
        assert!(detail.additional_info.is_none());
    }

    #[test]
    fn status_toggle_round_trips() {
        assert_eq!(BusinessStatus::Active.toggled(), BusinessStatus::Pending);
        assert_eq!(BusinessStatus::Pending.toggled(), BusinessStatus::Active);
    }
}
