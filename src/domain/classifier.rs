use crate::domain::incident::{Category, CategorizedIncident, CategorizedIncidents, IncidentReport, Severity};
use crate::domain::matcher;

/// One classification rule: any keyword hit assigns `category` and `severity`.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub keywords: Vec<String>,
    pub category: Category,
    pub severity: Severity,
}

impl ClassificationRule {
    pub fn new(keywords: &[&str], category: Category, severity: Severity) -> Self {
        Self { keywords: keywords.iter().map(|k| k.to_lowercase()).collect(), category, severity }
    }

    fn matches(&self, description: &str) -> bool {
        self.keywords.iter().any(|keyword| matcher::contains(description, keyword))
    }
}

/// Keyword classifier. Rules are evaluated top to bottom and the first hit wins;
/// a description no rule matches falls back to Other/Low.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_rules(vec![
            ClassificationRule::new(&["fire"], Category::Fire, Severity::High),
            ClassificationRule::new(&["medical", "ambulance"], Category::Medical, Severity::Medium),
        ])
    }
}

impl Classifier {
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Category and severity for a description. Both always come from the same rule.
    pub fn assess(&self, description: &str) -> (Category, Severity) {
        let description = description.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&description))
            .map(|rule| (rule.category, rule.severity))
            .unwrap_or((Category::Other, Severity::Low))
    }

    pub fn categorize(&self, report: &IncidentReport) -> CategorizedIncident {
        let (category, severity) = self.assess(&report.description);

        CategorizedIncident {
            sequence: report.sequence,
            description: report.description.to_lowercase(),
            node: report.node.clone(),
            category,
            severity,
        }
    }

    /// Buckets the reports by category, keeping input order inside each bucket.
    pub fn classify(&self, reports: &[IncidentReport]) -> CategorizedIncidents {
        let mut categorized = CategorizedIncidents::default();

        for report in reports {
            let incident = self.categorize(report);
            log::debug!(
                "Incident #{} at node {} classified as {} ({} severity).",
                incident.sequence,
                incident.node,
                incident.category,
                incident.severity
            );
            categorized.push(incident);
        }

        log::info!(
            "Classified {} incidents: {} fire, {} medical, {} other.",
            categorized.len(),
            categorized.fire.len(),
            categorized.medical.len(),
            categorized.other.len()
        );

        categorized
    }
}
