use serde::Serialize;
use std::fmt;

use crate::api::scenario_dto::IncidentReportDto;
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};

/// Incident buckets, declared in the default allocation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Fire,
    Medical,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Fire, Category::Medical, Category::Other];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Fire => "Fire",
            Category::Medical => "Medical",
            Category::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        };
        write!(f, "{}", name)
    }
}

/// A validated incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentReport {
    /// Position of the record in the input sequence.
    pub sequence: usize,
    pub description: String,
    pub node: NodeId,
}

impl IncidentReport {
    pub fn new(sequence: usize, description: impl Into<String>, node: impl Into<String>) -> Self {
        Self { sequence, description: description.into(), node: NodeId::new(node) }
    }

    /// Validates a raw record. Missing or blank fields yield `Error::MalformedIncident`.
    ///
    /// Values are kept as given; the node id is opaque, so `" 3"` is not grid node `"3"`.
    pub fn from_dto(sequence: usize, dto: &IncidentReportDto) -> Result<Self> {
        let description = match dto.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            Some(_) => return Err(malformed(sequence, "description is blank")),
            None => return Err(malformed(sequence, "description is missing")),
        };

        let node = match dto.node.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            Some(_) => return Err(malformed(sequence, "node is blank")),
            None => return Err(malformed(sequence, "node is missing")),
        };

        Ok(IncidentReport::new(sequence, description, node))
    }
}

fn malformed(index: usize, reason: &str) -> Error {
    Error::MalformedIncident { index, reason: reason.to_string() }
}

/// An incident after classification. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizedIncident {
    pub sequence: usize,
    /// Lower-cased description, the form the rules were matched against.
    pub description: String,
    pub node: NodeId,
    pub category: Category,
    pub severity: Severity,
}

/// Classifier output: one list per category, each in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorizedIncidents {
    pub fire: Vec<CategorizedIncident>,
    pub medical: Vec<CategorizedIncident>,
    pub other: Vec<CategorizedIncident>,
}

impl CategorizedIncidents {
    pub fn get(&self, category: Category) -> &[CategorizedIncident] {
        match category {
            Category::Fire => &self.fire,
            Category::Medical => &self.medical,
            Category::Other => &self.other,
        }
    }

    pub fn push(&mut self, incident: CategorizedIncident) {
        match incident.category {
            Category::Fire => self.fire.push(incident),
            Category::Medical => self.medical.push(incident),
            Category::Other => self.other.push(incident),
        }
    }

    pub fn len(&self) -> usize {
        self.fire.len() + self.medical.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All incidents, bucket by bucket in `Category::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &CategorizedIncident> {
        Category::ALL.into_iter().flat_map(move |category| self.get(category).iter())
    }
}
