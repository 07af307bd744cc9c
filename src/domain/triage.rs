use serde::Serialize;

use crate::api::scenario_dto::{IncidentReportDto, ScenarioDto};
use crate::domain::allocator::{AllocationOrderType, AllocationTable, Allocator};
use crate::domain::classifier::Classifier;
use crate::domain::incident::{CategorizedIncidents, IncidentReport};
use crate::domain::network::edge_source::{EdgeAttributeSource, SeededEdgeSource};
use crate::domain::network::road_network::RoadNetwork;
use crate::domain::network::router::{FlowOutcome, PathOutcome, RouteTable, Router};
use crate::domain::resource::resource_pool::ResourcePool;
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};

/// Unit locations used when a scenario does not name its own.
pub const DEFAULT_EMERGENCY_UNITS: [&str; 3] = ["1", "5", "9"];

/// Everything one triage run needs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub seed: Option<u64>,
    pub emergency_units: Vec<NodeId>,
    pub pool: ResourcePool,
    pub allocation_order: AllocationOrderType,
    /// Raw records; validated at the start of the run.
    pub incidents: Vec<IncidentReportDto>,
}

impl Scenario {
    /// Scenario with default units, pool and ordering.
    pub fn new(incidents: Vec<IncidentReportDto>) -> Self {
        Self {
            seed: None,
            emergency_units: DEFAULT_EMERGENCY_UNITS.iter().map(|&u| NodeId::new(u)).collect(),
            pool: ResourcePool::default(),
            allocation_order: AllocationOrderType::default(),
            incidents,
        }
    }

    pub fn from_dto(dto: ScenarioDto) -> Result<Self> {
        let mut scenario = Scenario::new(dto.incidents);
        scenario.seed = dto.seed;

        if let Some(units) = dto.emergency_units {
            if units.is_empty() {
                return Err(Error::InvalidConfiguration("emergencyUnits must name at least one node".to_string()));
            }
            scenario.emergency_units = units.into_iter().map(NodeId::new).collect();
        }

        if let Some(resources) = dto.resources {
            scenario.pool = ResourcePool::from_dto(&resources)?;
        }

        if let Some(order) = dto.allocation_order {
            scenario.allocation_order = order.parse()?;
        }

        Ok(scenario)
    }
}

/// An input record that failed validation and was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedIncident {
    pub index: usize,
    pub reason: String,
}

/// Output of one run, handed to the presentation side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    pub seed: Option<u64>,
    pub rejected: Vec<RejectedIncident>,
    pub categorized: CategorizedIncidents,
    pub allocations: AllocationTable,
    /// Pool state after the allocation pass.
    pub remaining: ResourcePool,
    pub shortest_paths: RouteTable<PathOutcome>,
    pub flows: RouteTable<FlowOutcome>,
}

/// Splits raw records into valid reports and rejections. Processing of the valid ones is unaffected.
pub fn validate_incidents(dtos: &[IncidentReportDto]) -> (Vec<IncidentReport>, Vec<RejectedIncident>) {
    let mut reports = Vec::new();
    let mut rejected = Vec::new();

    for (index, dto) in dtos.iter().enumerate() {
        match IncidentReport::from_dto(index, dto) {
            Ok(report) => reports.push(report),
            Err(Error::MalformedIncident { index, reason }) => {
                log::warn!("Rejected incident #{}: {}", index, reason);
                rejected.push(RejectedIncident { index, reason });
            }
            Err(e) => {
                log::warn!("Rejected incident #{}: {}", index, e);
                rejected.push(RejectedIncident { index, reason: e.to_string() });
            }
        }
    }

    (reports, rejected)
}

#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    classifier: Classifier,
}

impl TriageEngine {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Runs a scenario, building the road network from a `StdRng` seeded with the scenario seed.
    pub fn run(&self, scenario: Scenario) -> TriageReport {
        let mut source = SeededEdgeSource::new(scenario.seed);
        self.run_with_source(scenario, &mut source)
    }

    /// Runs a scenario with an explicit edge attribute source.
    ///
    /// Classification and allocation happen sequentially on this thread; the routing tables are
    /// computed afterwards against the finished, read-only network.
    pub fn run_with_source(&self, scenario: Scenario, source: &mut dyn EdgeAttributeSource) -> TriageReport {
        let Scenario { seed, emergency_units, mut pool, allocation_order, incidents } = scenario;

        log::info!("Starting triage run: {} incident records, {} emergency units.", incidents.len(), emergency_units.len());

        let (reports, rejected) = validate_incidents(&incidents);

        let categorized = self.classifier.classify(&reports);
        let allocations = Allocator::new(allocation_order).allocate(&mut pool, &categorized);

        let incident_nodes: Vec<NodeId> = reports.iter().map(|r| r.node.clone()).collect();
        let network = RoadNetwork::build(incident_nodes.iter().chain(emergency_units.iter()), source);

        let router = Router::new(&network);
        let shortest_paths = router.shortest_path_table(&emergency_units, &incident_nodes);
        let flows = router.flow_table(&emergency_units, &incident_nodes);

        log::info!("Triage run finished: {} accepted, {} rejected.", reports.len(), rejected.len());

        TriageReport { seed, rejected, categorized, allocations, remaining: pool, shortest_paths, flows }
    }
}
