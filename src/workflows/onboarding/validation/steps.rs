use super::super::domain::{fields, options, WizardStep};
use super::rules::{
    Condition, Rule, EMAIL_PATTERN, LETTERS_PATTERN, LOCATION_PATTERN, NAME_PATTERN,
    PHONE_PATTERN, ZIP_PATTERN,
};
use super::{FieldCheck, StepRuleSet};

pub(super) fn standard_rule_sets() -> Vec<StepRuleSet> {
    vec![
        StepRuleSet {
            step: WizardStep::BusinessInfo,
            checks: vec![
                FieldCheck::new(
                    fields::BUSINESS_NAME,
                    Rule::Required {
                        message: "Business name is required",
                    },
                ),
                FieldCheck::new(
                    fields::BUSINESS_NAME,
                    Rule::Matches {
                        pattern: &NAME_PATTERN,
                        message: "Only letters are allowed",
                    },
                ),
                FieldCheck::new(
                    fields::LOCATION,
                    Rule::Required {
                        message: "Location is required",
                    },
                ),
                FieldCheck::new(
                    fields::LOCATION,
                    Rule::Matches {
                        pattern: &LOCATION_PATTERN,
                        message: "Only letters, numbers & , . & - allowed",
                    },
                ),
                FieldCheck::new(
                    fields::ZIP_CODE,
                    Rule::Required {
                        message: "Zip code is required",
                    },
                ),
                FieldCheck::new(
                    fields::ZIP_CODE,
                    Rule::Matches {
                        pattern: &ZIP_PATTERN,
                        message: "Zip code must be digits only (max 10)",
                    },
                ),
                FieldCheck::new(
                    fields::PHONE_NUMBER,
                    Rule::Required {
                        message: "Phone number is required",
                    },
                ),
                FieldCheck::new(
                    fields::PHONE_NUMBER,
                    Rule::Matches {
                        pattern: &PHONE_PATTERN,
                        message: "Invalid phone number format",
                    },
                ),
                FieldCheck::new(
                    fields::EMAIL,
                    Rule::Required {
                        message: "Email is required",
                    },
                ),
                FieldCheck::new(
                    fields::EMAIL,
                    Rule::Matches {
                        pattern: &EMAIL_PATTERN,
                        message: "Invalid email format",
                    },
                ),
                FieldCheck::new(
                    fields::CONTACT_NAME,
                    Rule::Required {
                        message: "Contact name is required",
                    },
                ),
                FieldCheck::new(
                    fields::CONTACT_NUMBER,
                    Rule::Required {
                        message: "Phone number is required",
                    },
                ),
                FieldCheck::new(
                    fields::CONTACT_NUMBER,
                    Rule::Matches {
                        pattern: &PHONE_PATTERN,
                        message: "Invalid phone number format",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::SocialMediaPresence,
            checks: vec![
                FieldCheck::new(
                    fields::SOCIAL_ACCOUNTS_EXIST,
                    Rule::Required {
                        message: "Please choose yes or no",
                    },
                ),
                FieldCheck::when(
                    fields::SELECTED_PLATFORMS,
                    vec![Condition::Equals {
                        field: fields::SOCIAL_ACCOUNTS_EXIST,
                        value: "yes",
                    }],
                    Rule::AtLeastOne {
                        message: "Please select at least one platform",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_PLATFORM,
                    vec![
                        Condition::Equals {
                            field: fields::SOCIAL_ACCOUNTS_EXIST,
                            value: "yes",
                        },
                        Condition::Selected {
                            field: fields::SELECTED_PLATFORMS,
                            option: options::OTHERS,
                        },
                    ],
                    Rule::NonBlank {
                        message: "Please enter the other platform name",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_PLATFORM,
                    vec![
                        Condition::Equals {
                            field: fields::SOCIAL_ACCOUNTS_EXIST,
                            value: "yes",
                        },
                        Condition::Selected {
                            field: fields::SELECTED_PLATFORMS,
                            option: options::OTHERS,
                        },
                    ],
                    Rule::Matches {
                        pattern: &LETTERS_PATTERN,
                        message: "Only letters and spaces are allowed",
                    },
                ),
                FieldCheck::new(
                    fields::SETUP_REDESIGN,
                    Rule::Required {
                        message: "Please choose yes or no",
                    },
                ),
                FieldCheck::when(
                    fields::SETUP_DETAILS,
                    vec![Condition::Equals {
                        field: fields::SETUP_REDESIGN,
                        value: "yes",
                    }],
                    Rule::NonBlank {
                        message: "Please specify which accounts need attention",
                    },
                ),
                FieldCheck::when(
                    fields::SETUP_DETAILS,
                    vec![Condition::Equals {
                        field: fields::SETUP_REDESIGN,
                        value: "yes",
                    }],
                    Rule::Matches {
                        pattern: &LETTERS_PATTERN,
                        message: "Only letters and spaces are allowed",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::GoalsAndObjectives,
            checks: vec![
                FieldCheck::new(
                    fields::SELECTED_GOALS,
                    Rule::AtLeastOne {
                        message: "Please select at least one goal.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_GOAL_DETAILS,
                    vec![Condition::Selected {
                        field: fields::SELECTED_GOALS,
                        option: options::OTHERS,
                    }],
                    Rule::NonBlank {
                        message: "Please specify other goals.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_GOAL_DETAILS,
                    vec![Condition::Selected {
                        field: fields::SELECTED_GOALS,
                        option: options::OTHERS,
                    }],
                    Rule::Matches {
                        pattern: &LETTERS_PATTERN,
                        message: "Only letters and spaces are allowed.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::TargetAudience,
            checks: vec![
                FieldCheck::new(
                    fields::SELECTED_AGES,
                    Rule::AtLeastOne {
                        message: "Please select at least one age range.",
                    },
                ),
                FieldCheck::new(
                    fields::SELECTED_GENDERS,
                    Rule::AtLeastOne {
                        message: "Please select at least one gender.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::BrandVoice,
            checks: vec![
                FieldCheck::new(
                    fields::SELECTED_VOICES,
                    Rule::AtLeastOne {
                        message: "Please select at least one tone/voice.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_VOICE,
                    vec![Condition::Selected {
                        field: fields::SELECTED_VOICES,
                        option: options::OTHERS,
                    }],
                    Rule::NonBlank {
                        message: "Please specify the other tone/voice.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::ContentPreferences,
            checks: vec![
                FieldCheck::new(
                    fields::SELECTED_CONTENT_TYPES,
                    Rule::AtLeastOne {
                        message: "Please select at least one content type.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_CONTENT_TYPE,
                    vec![Condition::Selected {
                        field: fields::SELECTED_CONTENT_TYPES,
                        option: options::OTHERS,
                    }],
                    Rule::NonBlank {
                        message: "Please specify the other content type.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::WorkflowAndCommunication,
            checks: vec![
                FieldCheck::new(
                    fields::REVIEWER_NAME,
                    Rule::NonBlank {
                        message: "Reviewer name is required.",
                    },
                ),
                FieldCheck::new(
                    fields::REVIEWER_LOCATION,
                    Rule::NonBlank {
                        message: "Location is required.",
                    },
                ),
                FieldCheck::new(
                    fields::REVIEWER_PHONE,
                    Rule::Required {
                        message: "Phone number is required.",
                    },
                ),
                FieldCheck::new(
                    fields::PREFERRED_CONTACT_MODES,
                    Rule::AtLeastOne {
                        message: "Select at least one preferred contact mode.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_CONTACT_METHOD,
                    vec![Condition::Selected {
                        field: fields::PREFERRED_CONTACT_MODES,
                        option: options::OTHERS,
                    }],
                    Rule::NonBlank {
                        message: "Specify other contact method.",
                    },
                ),
                FieldCheck::new(
                    fields::REPORT_FREQUENCY,
                    Rule::Required {
                        message: "Please select report frequency.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::MarketingBudget,
            checks: vec![
                FieldCheck::new(
                    fields::BUDGET,
                    Rule::Required {
                        message: "Select your monthly ad budget.",
                    },
                ),
                FieldCheck::new(
                    fields::SELECTED_KPIS,
                    Rule::AtLeastOne {
                        message: "Select at least one KPI.",
                    },
                ),
                FieldCheck::when(
                    fields::OTHER_KPI,
                    vec![Condition::Selected {
                        field: fields::SELECTED_KPIS,
                        option: options::OTHERS_SPECIFY,
                    }],
                    Rule::NonBlank {
                        message: "Specify other KPI.",
                    },
                ),
                FieldCheck::new(
                    fields::EXPECTED_RESULTS,
                    Rule::Required {
                        message: "Select expected results timeframe.",
                    },
                ),
            ],
        },
        StepRuleSet {
            step: WizardStep::AdditionalInformation,
            checks: vec![FieldCheck::new(
                fields::ADMIRE_ACCOUNTS,
                Rule::NonBlank {
                    message: "Please share accounts you admire.",
                },
            )],
        },
    ]
}
