//! Quote options catalog.
//!
//! The choices offered on each wizard step. This is presentation data: the
//! wizard stores whatever id the host passes and never checks it against
//! the catalog.

use crate::wizard::answers::AnswerField;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTypeOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOption {
    pub id: String,
    pub range: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A single selectable choice, independent of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<'a> {
    pub id: &'a str,
    pub label: &'a str,
}

/// Everything the wizard offers for selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteOptions {
    pub services: Vec<ServiceOption>,
    pub project_types: Vec<ProjectTypeOption>,
    pub budget_ranges: Vec<BudgetOption>,
    pub timelines: Vec<TimelineOption>,
    pub features: Vec<String>,
}

impl QuoteOptions {
    pub fn service(&self, id: &str) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn project_type(&self, id: &str) -> Option<&ProjectTypeOption> {
        self.project_types.iter().find(|p| p.id == id)
    }

    pub fn budget(&self, id: &str) -> Option<&BudgetOption> {
        self.budget_ranges.iter().find(|b| b.id == id)
    }

    pub fn timeline(&self, id: &str) -> Option<&TimelineOption> {
        self.timelines.iter().find(|t| t.id == id)
    }

    /// Choices for a single-select answer field, in display order.
    ///
    /// Free-text fields (contact details, project details) have no choices.
    pub fn choices(&self, field: AnswerField) -> Vec<Choice<'_>> {
        match field {
            AnswerField::ServiceType => self
                .services
                .iter()
                .map(|s| Choice {
                    id: &s.id,
                    label: &s.name,
                })
                .collect(),
            AnswerField::ProjectType => self
                .project_types
                .iter()
                .map(|p| Choice {
                    id: &p.id,
                    label: &p.name,
                })
                .collect(),
            AnswerField::Budget => self
                .budget_ranges
                .iter()
                .map(|b| Choice {
                    id: &b.id,
                    label: &b.range,
                })
                .collect(),
            AnswerField::Timeline => self
                .timelines
                .iter()
                .map(|t| Choice {
                    id: &t.id,
                    label: &t.name,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Id of the choice at a 1-based menu position for `field`.
    pub fn choice_at(&self, field: AnswerField, position: usize) -> Option<&str> {
        let index = position.checked_sub(1)?;
        self.choices(field).get(index).map(|c| c.id)
    }

    /// Human readable label for an id chosen on any step, if known.
    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.service(id)
            .map(|s| s.name.as_str())
            .or_else(|| self.project_type(id).map(|p| p.name.as_str()))
            .or_else(|| self.budget(id).map(|b| b.range.as_str()))
            .or_else(|| self.timeline(id).map(|t| t.name.as_str()))
    }

    /// Feature at a 1-based menu position.
    pub fn feature_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.features.get(i))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.project_types.is_empty()
            && self.budget_ranges.is_empty()
            && self.timelines.is_empty()
            && self.features.is_empty()
    }
}
