use serde::Deserialize;

/// Raw scenario document as supplied by the input side.
///
/// Everything except `incidents` is optional; `Scenario::from_dto` fills in the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub emergency_units: Option<Vec<String>>,
    #[serde(default)]
    pub resources: Option<Vec<ResourceDto>>,
    #[serde(default)]
    pub allocation_order: Option<String>,
    pub incidents: Vec<IncidentReportDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDto {
    pub name: String,
    pub capacity: u32,
}

/// Both fields are optional here so a single broken record can be rejected on its own
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentReportDto {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
}

impl IncidentReportDto {
    pub fn new(description: impl Into<String>, node: impl Into<String>) -> Self {
        Self { description: Some(description.into()), node: Some(node.into()) }
    }
}
