//! Answers accumulated across the wizard steps

use crate::core::error::UnknownFieldError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The accumulated user input across all wizard steps.
///
/// Every text field uses the empty string for "unset". `features` is an
/// ordered, duplicate-free selection; use [`WizardAnswers::toggle_feature`]
/// to change it.
///
/// Serializes with camelCase keys, which is the payload shape handed to the
/// submission collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardAnswers {
    pub service_type: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    features: Vec<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_details: String,
}

impl WizardAnswers {
    /// Overwrite a text field. No validation is performed at write time.
    pub fn set(&mut self, field: AnswerField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Read a text field.
    pub fn get(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::ServiceType => &self.service_type,
            AnswerField::ProjectType => &self.project_type,
            AnswerField::Budget => &self.budget,
            AnswerField::Timeline => &self.timeline,
            AnswerField::Name => &self.name,
            AnswerField::Email => &self.email,
            AnswerField::Phone => &self.phone,
            AnswerField::Company => &self.company,
            AnswerField::ProjectDetails => &self.project_details,
        }
    }

    fn slot_mut(&mut self, field: AnswerField) -> &mut String {
        match field {
            AnswerField::ServiceType => &mut self.service_type,
            AnswerField::ProjectType => &mut self.project_type,
            AnswerField::Budget => &mut self.budget,
            AnswerField::Timeline => &mut self.timeline,
            AnswerField::Name => &mut self.name,
            AnswerField::Email => &mut self.email,
            AnswerField::Phone => &mut self.phone,
            AnswerField::Company => &mut self.company,
            AnswerField::ProjectDetails => &mut self.project_details,
        }
    }

    /// Add `feature` if it is not selected, remove it otherwise.
    ///
    /// Returns `true` if the feature is selected after the call.
    pub fn toggle_feature(&mut self, feature: impl AsRef<str>) -> bool {
        let feature = feature.as_ref();
        if let Some(pos) = self.features.iter().position(|f| f == feature) {
            self.features.remove(pos);
            false
        } else {
            self.features.push(feature.to_string());
            true
        }
    }

    /// Selected features in selection order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Rebuild answers from untrusted input (e.g. a JSON file), dropping
    /// repeated features so the set invariant holds.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.features.len());
        for feature in self.features.drain(..) {
            if !seen.contains(&feature) {
                seen.push(feature);
            }
        }
        self.features = seen;
        self
    }

    /// Whether every field is at its default value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Names of the text fields of [`WizardAnswers`] (everything except `features`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    ServiceType,
    ProjectType,
    Budget,
    Timeline,
    Name,
    Email,
    Phone,
    Company,
    ProjectDetails,
}

impl AnswerField {
    pub const ALL: [AnswerField; 9] = [
        AnswerField::ServiceType,
        AnswerField::ProjectType,
        AnswerField::Budget,
        AnswerField::Timeline,
        AnswerField::Name,
        AnswerField::Email,
        AnswerField::Phone,
        AnswerField::Company,
        AnswerField::ProjectDetails,
    ];

    /// camelCase name, as used in the serialized answers.
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerField::ServiceType => "serviceType",
            AnswerField::ProjectType => "projectType",
            AnswerField::Budget => "budget",
            AnswerField::Timeline => "timeline",
            AnswerField::Name => "name",
            AnswerField::Email => "email",
            AnswerField::Phone => "phone",
            AnswerField::Company => "company",
            AnswerField::ProjectDetails => "projectDetails",
        }
    }
}

impl std::fmt::Display for AnswerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerField {
    type Err = UnknownFieldError;

    /// Accepts camelCase (`serviceType`), snake_case (`service_type`) and
    /// kebab-case (`service-type`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "servicetype" | "service" => Ok(AnswerField::ServiceType),
            "projecttype" => Ok(AnswerField::ProjectType),
            "budget" => Ok(AnswerField::Budget),
            "timeline" => Ok(AnswerField::Timeline),
            "name" => Ok(AnswerField::Name),
            "email" => Ok(AnswerField::Email),
            "phone" => Ok(AnswerField::Phone),
            "company" => Ok(AnswerField::Company),
            "projectdetails" | "details" => Ok(AnswerField::ProjectDetails),
            _ => Err(UnknownFieldError(s.to_string())),
        }
    }
}
