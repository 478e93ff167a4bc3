//! Step validation as data: one generic rule-set abstraction configured
//! nine times, instead of nine parallel validator implementations.

mod rules;
mod steps;

pub use rules::{Condition, Rule};

use std::collections::BTreeMap;

use super::domain::{FormRecord, WizardStep};

/// One check: a field, the conditions gating it, and the rule to apply.
/// With no conditions the check always runs.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub field: &'static str,
    pub when: Vec<Condition>,
    pub rule: Rule,
}

impl FieldCheck {
    fn applies(&self, record: &FormRecord) -> bool {
        self.when.iter().all(|condition| condition.holds(record))
    }

    pub(crate) fn new(field: &'static str, rule: Rule) -> Self {
        Self {
            field,
            when: Vec::new(),
            rule,
        }
    }

    pub(crate) fn when(field: &'static str, when: Vec<Condition>, rule: Rule) -> Self {
        Self { field, when, rule }
    }
}

/// Ordered checks owned by one wizard step.
#[derive(Debug, Clone)]
pub struct StepRuleSet {
    pub step: WizardStep,
    pub checks: Vec<FieldCheck>,
}

impl StepRuleSet {
    /// Evaluate every applicable check, keeping the first failure per field.
    pub fn evaluate(&self, record: &FormRecord) -> StepReport {
        let mut errors = BTreeMap::new();
        for check in &self.checks {
            if !check.applies(record) {
                continue;
            }
            if let Some(message) = check.rule.check(record, check.field) {
                errors.entry(check.field).or_insert(message);
            }
        }
        StepReport {
            step: self.step,
            errors,
        }
    }

    /// Evaluate only the checks bound to one field, used for inline
    /// per-keystroke feedback.
    pub fn evaluate_field(&self, record: &FormRecord, field: &str) -> Option<&'static str> {
        self.checks
            .iter()
            .filter(|check| check.field == field && check.applies(record))
            .find_map(|check| check.rule.check(record, check.field))
    }
}

/// Outcome of evaluating one step's rule set.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: WizardStep,
    pub errors: BTreeMap<&'static str, &'static str>,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The composed set of all nine step rule sets.
#[derive(Debug, Clone)]
pub struct Rulebook {
    sets: Vec<StepRuleSet>,
}

impl Rulebook {
    pub fn standard() -> Self {
        Self {
            sets: steps::standard_rule_sets(),
        }
    }

    pub fn step_rules(&self, step: WizardStep) -> &StepRuleSet {
        self.sets
            .iter()
            .find(|set| set.step == step)
            .expect("every wizard step carries a rule set")
    }

    pub fn validate_step(&self, step: WizardStep, record: &FormRecord) -> StepReport {
        self.step_rules(step).evaluate(record)
    }

    pub fn validate_field(
        &self,
        step: WizardStep,
        record: &FormRecord,
        field: &str,
    ) -> Option<&'static str> {
        self.step_rules(step).evaluate_field(record, field)
    }
}

impl Default for Rulebook {
    fn default() -> Self {
        Self::standard()
    }
}
