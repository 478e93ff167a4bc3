use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered steps of the onboarding wizard. Order defines both the UI
/// sequence and the required-completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BusinessInfo,
    SocialMediaPresence,
    GoalsAndObjectives,
    TargetAudience,
    BrandVoice,
    ContentPreferences,
    WorkflowAndCommunication,
    MarketingBudget,
    AdditionalInformation,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::BusinessInfo,
            Self::SocialMediaPresence,
            Self::GoalsAndObjectives,
            Self::TargetAudience,
            Self::BrandVoice,
            Self::ContentPreferences,
            Self::WorkflowAndCommunication,
            Self::MarketingBudget,
            Self::AdditionalInformation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BusinessInfo => "Business Info",
            Self::SocialMediaPresence => "Social Media Presence",
            Self::GoalsAndObjectives => "Goals & Objectives",
            Self::TargetAudience => "Target Audience",
            Self::BrandVoice => "Brand Voice",
            Self::ContentPreferences => "Content Preferences",
            Self::WorkflowAndCommunication => "Workflow & Communication",
            Self::MarketingBudget => "Marketing Budget & Expectations",
            Self::AdditionalInformation => "Additional Information",
        }
    }

    /// Field namespace owned by this step. A step's rules never read outside
    /// its own namespace.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::BusinessInfo => &[
                fields::BUSINESS_NAME,
                fields::LOCATION,
                fields::ZIP_CODE,
                fields::PHONE_NUMBER,
                fields::EMAIL,
                fields::WEBSITE,
                fields::CONTACT_NAME,
                fields::CONTACT_NUMBER,
            ],
            Self::SocialMediaPresence => &[
                fields::SOCIAL_ACCOUNTS_EXIST,
                fields::SELECTED_PLATFORMS,
                fields::OTHER_PLATFORM,
                fields::SETUP_REDESIGN,
                fields::SETUP_DETAILS,
            ],
            Self::GoalsAndObjectives => &[fields::SELECTED_GOALS, fields::OTHER_GOAL_DETAILS],
            Self::TargetAudience => &[
                fields::SELECTED_AGES,
                fields::SELECTED_GENDERS,
                fields::TARGET_LOCATION,
                fields::TARGET_INTERESTS,
                fields::TARGET_PROFESSION,
                fields::TARGET_OTHER_DETAILS,
                fields::TARGET_INDUSTRIES,
                fields::TARGET_PAIN_POINTS,
            ],
            Self::BrandVoice => &[
                fields::SELECTED_VOICES,
                fields::OTHER_VOICE,
                fields::BRAND_PHRASES,
                fields::BRAND_EXCLUSIONS,
            ],
            Self::ContentPreferences => {
                &[fields::SELECTED_CONTENT_TYPES, fields::OTHER_CONTENT_TYPE]
            }
            Self::WorkflowAndCommunication => &[
                fields::REVIEWER_NAME,
                fields::REVIEWER_LOCATION,
                fields::REVIEWER_PHONE,
                fields::COUNTRY_CODE,
                fields::PREFERRED_CONTACT_MODES,
                fields::OTHER_CONTACT_METHOD,
                fields::REPORT_FREQUENCY,
            ],
            Self::MarketingBudget => &[
                fields::BUDGET,
                fields::SELECTED_KPIS,
                fields::OTHER_KPI,
                fields::EXPECTED_RESULTS,
            ],
            Self::AdditionalInformation => &[
                fields::ADMIRE_ACCOUNTS,
                fields::COMPETITORS,
                fields::UPCOMING_LAUNCHES,
                fields::OTHER_INFO,
            ],
        }
    }
}

/// Wire names of every form field, matching the backend's JSON contract.
pub mod fields {
    pub const BUSINESS_NAME: &str = "businessName";
    pub const LOCATION: &str = "location";
    pub const ZIP_CODE: &str = "zipCode";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const EMAIL: &str = "email";
    pub const WEBSITE: &str = "website";
    pub const CONTACT_NAME: &str = "contactName";
    pub const CONTACT_NUMBER: &str = "contactNumber";

    pub const SOCIAL_ACCOUNTS_EXIST: &str = "socialAccountsExist";
    pub const SELECTED_PLATFORMS: &str = "selectedPlatforms";
    pub const OTHER_PLATFORM: &str = "otherPlatform";
    pub const SETUP_REDESIGN: &str = "setupRedesign";
    pub const SETUP_DETAILS: &str = "setupDetails";

    pub const SELECTED_GOALS: &str = "selectedGoals";
    pub const OTHER_GOAL_DETAILS: &str = "otherGoalDetails";

    pub const SELECTED_AGES: &str = "selectedAges";
    pub const SELECTED_GENDERS: &str = "selectedGenders";
    pub const TARGET_LOCATION: &str = "targetLocation";
    pub const TARGET_INTERESTS: &str = "targetInterests";
    pub const TARGET_PROFESSION: &str = "targetProfession";
    pub const TARGET_OTHER_DETAILS: &str = "targetOtherDetails";
    pub const TARGET_INDUSTRIES: &str = "targetIndustries";
    pub const TARGET_PAIN_POINTS: &str = "targetPainPoints";

    pub const SELECTED_VOICES: &str = "selectedVoices";
    pub const OTHER_VOICE: &str = "otherVoice";
    pub const BRAND_PHRASES: &str = "brandPhrases";
    pub const BRAND_EXCLUSIONS: &str = "brandExclusions";

    pub const SELECTED_CONTENT_TYPES: &str = "selectedContentTypes";
    pub const OTHER_CONTENT_TYPE: &str = "otherContentType";

    pub const REVIEWER_NAME: &str = "reviewerName";
    pub const REVIEWER_LOCATION: &str = "reviewerLocation";
    pub const REVIEWER_PHONE: &str = "reviewerPhone";
    pub const COUNTRY_CODE: &str = "countryCode";
    pub const PREFERRED_CONTACT_MODES: &str = "preferredContactModes";
    pub const OTHER_CONTACT_METHOD: &str = "otherContactMethod";
    pub const REPORT_FREQUENCY: &str = "reportFrequency";

    pub const BUDGET: &str = "budget";
    pub const SELECTED_KPIS: &str = "selectedKPIs";
    pub const OTHER_KPI: &str = "otherKPI";
    pub const EXPECTED_RESULTS: &str = "expectedResults";

    pub const ADMIRE_ACCOUNTS: &str = "admireAccounts";
    pub const COMPETITORS: &str = "competitors";
    pub const UPCOMING_LAUNCHES: &str = "upcomingLaunches";
    pub const OTHER_INFO: &str = "otherInfo";
}

/// Option catalogs presented by the wizard steps.
pub mod options {
    pub const PLATFORMS: &[&str] = &[
        "Facebook",
        "Instagram",
        "LinkedIn",
        "TikTok",
        "Pinterest",
        "Twitter/X",
        "Youtube",
        "Others",
    ];
    pub const GOALS: &[&str] = &[
        "Brand Awareness",
        "Lead generation",
        "Increase Sales",
        "Website Traffic",
        "Engagement",
        "Customer Support",
        "Others",
    ];
    pub const AGE_RANGES: &[&str] = &["18-30", "30-40", "40-50", "50+"];
    pub const GENDERS: &[&str] = &["Male", "Female", "Others"];
    pub const VOICES: &[&str] = &[
        "Friendly",
        "Professional",
        "Humorous",
        "Inspirational",
        "Informative",
        "Others",
    ];
    pub const CONTENT_TYPES: &[&str] = &[
        "Educational",
        "Promotional",
        "Articles",
        "Infographics",
        "Client Testimonials",
        "Product Highlights",
        "Industry News",
        "Memes / Relatable content",
        "Video / Reels / Stories",
        "Polls/Quizzes",
        "Others",
    ];
    pub const CONTACT_MODES: &[&str] =
        &["Whats App", "Viber", "Mail", "Messenger", "Phone", "Others"];
    pub const REPORT_FREQUENCIES: &[&str] = &["Weekly", "Bi-weekly", "Monthly", "Quarterly"];
    pub const BUDGET_BRACKETS: &[&str] =
        &["Below 1000", "1000 - 5000", "5000 - 10000", "10000+"];
    pub const KPIS: &[&str] = &[
        "Follower Growth",
        "Engagement Rate",
        "Click-Through Rate (CTR)",
        "Leads/Conversions",
        "Others, specify",
    ];
    pub const RESULT_TIMEFRAMES: &[&str] =
        &["1 - 3 months", "3 - 6 months", "6 - 12 months", "12+ months"];

    /// Literal option that makes a paired free-text field required.
    pub const OTHERS: &str = "Others";
    /// The marketing step spells its escape hatch differently.
    pub const OTHERS_SPECIFY: &str = "Others, specify";
}

/// A single answer: free text or a multi-select set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Selection(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(value) => value,
            FieldValue::Selection(_) => "",
        }
    }

    pub fn as_selection(&self) -> &[String] {
        match self {
            FieldValue::Text(_) => &[],
            FieldValue::Selection(values) => values,
        }
    }
}

/// Multi-select fields of the template; everything else holds text.
const SELECTION_FIELDS: &[&str] = &[
    fields::SELECTED_PLATFORMS,
    fields::SELECTED_GOALS,
    fields::SELECTED_AGES,
    fields::SELECTED_GENDERS,
    fields::SELECTED_VOICES,
    fields::SELECTED_CONTENT_TYPES,
    fields::PREFERRED_CONTACT_MODES,
    fields::SELECTED_KPIS,
];

/// The accumulated answer set across all nine steps.
///
/// Keys are fixed by the template: values are only ever overwritten, never
/// inserted or removed, until the record is reset after a successful
/// submission or explicitly cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    entries: BTreeMap<&'static str, FieldValue>,
}

impl FormRecord {
    /// Default record: every selection empty, every scalar blank, except the
    /// country code which starts at "+1".
    pub fn template() -> Self {
        let mut entries = BTreeMap::new();
        for step in WizardStep::ordered() {
            for &field in step.fields() {
                let value = if SELECTION_FIELDS.contains(&field) {
                    FieldValue::Selection(Vec::new())
                } else if field == fields::COUNTRY_CODE {
                    FieldValue::Text("+1".to_string())
                } else {
                    FieldValue::Text(String::new())
                };
                entries.insert(field, value);
            }
        }
        Self { entries }
    }

    fn canonical_key(key: &str) -> Option<&'static str> {
        WizardStep::ordered()
            .iter()
            .flat_map(|step| step.fields().iter())
            .find(|known| **known == key)
            .copied()
    }

    pub fn text(&self, field: &str) -> &str {
        self.entries.get(field).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn selection(&self, field: &str) -> &[String] {
        self.entries
            .get(field)
            .map(FieldValue::as_selection)
            .unwrap_or(&[])
    }

    pub fn selected(&self, field: &str, option: &str) -> bool {
        self.selection(field).iter().any(|value| value == option)
    }

    /// Shallow last-write-wins merge. Keys outside the template are dropped;
    /// a patch value of the wrong shape for its field is dropped too, so the
    /// fixed-key invariant survives arbitrary input.
    pub fn apply(&mut self, patch: FormPatch) {
        for (key, value) in patch.entries {
            let Some(field) = Self::canonical_key(&key) else {
                continue;
            };
            let wants_selection = SELECTION_FIELDS.contains(&field);
            let compatible = matches!(
                (&value, wants_selection),
                (FieldValue::Text(_), false) | (FieldValue::Selection(_), true)
            );
            if compatible {
                self.entries.insert(field, value);
            }
        }
    }

    /// The additional-information slice, submitted on its own per the
    /// backend contract.
    pub fn additional_info(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut slice = serde_json::Map::new();
        for &field in WizardStep::AdditionalInformation.fields() {
            slice.insert(
                field.to_string(),
                serde_json::Value::String(self.text(field).to_string()),
            );
        }
        slice
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("form record serializes")
    }
}

impl Default for FormRecord {
    fn default() -> Self {
        Self::template()
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        let mut record = Self::template();
        for (key, value) in raw {
            let Some(field) = Self::canonical_key(&key) else {
                continue;
            };
            let wants_selection = SELECTION_FIELDS.contains(&field);
            match (&value, wants_selection) {
                (FieldValue::Text(_), false) | (FieldValue::Selection(_), true) => {
                    record.entries.insert(field, value);
                }
                _ => {
                    return Err(D::Error::custom(format!(
                        "field {key} holds the wrong value shape"
                    )))
                }
            }
        }
        Ok(record)
    }
}

/// Partial update applied to a [`FormRecord`] with last-write-wins
/// semantics per key.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    entries: BTreeMap<String, FieldValue>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: &str, value: impl Into<String>) -> Self {
        self.entries
            .insert(field.to_string(), FieldValue::Text(value.into()));
        self
    }

    pub fn selection<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.entries.insert(
            field.to_string(),
            FieldValue::Selection(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
