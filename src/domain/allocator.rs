//! Greedy, order-dependent resource allocation.
//!
//! Incidents are served one after another and every grant is taken out of the pool before the next
//! incident is looked at. Nothing is rolled back and nothing is re-ordered to improve the overall
//! outcome, so an incident late in the order can end up with zero units of a kind that an earlier
//! incident drained. That is the intended policy: the serving order is part of the contract and is
//! chosen through an [`AllocationOrder`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::incident::{Category, CategorizedIncident, CategorizedIncidents, Severity};
use crate::domain::resource::resource_pool::{ResourceKind, ResourcePool};
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};

/// Maximum units of `kind` a single incident of `severity` may receive.
pub fn ceiling(severity: Severity, kind: ResourceKind) -> u32 {
    match (severity, kind) {
        (Severity::High, ResourceKind::FireTruck) => 3,
        (Severity::High, ResourceKind::Ambulance) => 2,
        (Severity::High, ResourceKind::PoliceCar) => 1,
        (Severity::Medium, ResourceKind::FireTruck) => 0,
        (Severity::Medium, ResourceKind::Ambulance) => 3,
        (Severity::Medium, ResourceKind::PoliceCar) => 2,
        (Severity::Low, ResourceKind::FireTruck) => 0,
        (Severity::Low, ResourceKind::Ambulance) => 1,
        (Severity::Low, ResourceKind::PoliceCar) => 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceGrant {
    pub resource: ResourceKind,
    pub units: u32,
}

/// Units granted to one incident, one entry per kind in the pool (zero when nothing was granted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRecord {
    pub sequence: usize,
    pub node: NodeId,
    pub grants: Vec<ResourceGrant>,
}

impl AllocationRecord {
    pub fn units(&self, kind: ResourceKind) -> u32 {
        self.grants.iter().find(|g| g.resource == kind).map(|g| g.units).unwrap_or(0)
    }

    pub fn total_units(&self) -> u32 {
        self.grants.iter().map(|g| g.units).sum()
    }
}

impl fmt::Display for AllocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.grants.iter().map(|g| format!("'{}': {}", g.resource, g.units)).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Allocation result keyed by category. Only categories that had incidents appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationTable {
    pub entries: BTreeMap<Category, Vec<AllocationRecord>>,
}

impl AllocationTable {
    pub fn get(&self, category: Category) -> &[AllocationRecord] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &Vec<AllocationRecord>)> {
        self.entries.iter()
    }

    /// Sum of units of `kind` handed out over the whole table.
    pub fn total_granted(&self, kind: ResourceKind) -> u32 {
        self.entries.values().flatten().map(|record| record.units(kind)).sum()
    }
}

/// Decides the sequence in which incidents are served.
pub trait AllocationOrder: fmt::Debug {
    fn sequence<'a>(&self, incidents: &'a CategorizedIncidents) -> Vec<&'a CategorizedIncident>;
}

/// Fire first, then Medical, then Other; input order inside each category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryPriority;

impl AllocationOrder for CategoryPriority {
    fn sequence<'a>(&self, incidents: &'a CategorizedIncidents) -> Vec<&'a CategorizedIncident> {
        incidents.iter().collect()
    }
}

/// Strict arrival order, ignoring category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalOrder;

impl AllocationOrder for ArrivalOrder {
    fn sequence<'a>(&self, incidents: &'a CategorizedIncidents) -> Vec<&'a CategorizedIncident> {
        let mut ordered: Vec<&CategorizedIncident> = incidents.iter().collect();
        ordered.sort_by_key(|incident| incident.sequence);
        ordered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationOrderType {
    #[default]
    CategoryPriority,
    ArrivalOrder,
}

impl AllocationOrderType {
    pub fn get_instance(self) -> Box<dyn AllocationOrder> {
        match self {
            AllocationOrderType::CategoryPriority => Box::new(CategoryPriority),
            AllocationOrderType::ArrivalOrder => Box::new(ArrivalOrder),
        }
    }
}

impl FromStr for AllocationOrderType {
    type Err = Error;

    fn from_str(name: &str) -> Result<AllocationOrderType> {
        match name {
            "CategoryPriority" => Ok(AllocationOrderType::CategoryPriority),
            "ArrivalOrder" => Ok(AllocationOrderType::ArrivalOrder),
            _ => Err(Error::UnknownAllocationOrder(name.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct Allocator {
    order: Box<dyn AllocationOrder>,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(AllocationOrderType::default())
    }
}

impl Allocator {
    pub fn new(order: AllocationOrderType) -> Self {
        Self { order: order.get_instance() }
    }

    pub fn with_order(order: Box<dyn AllocationOrder>) -> Self {
        Self { order }
    }

    /// Runs one greedy pass over `incidents`, depleting `pool` as it goes.
    pub fn allocate(&self, pool: &mut ResourcePool, incidents: &CategorizedIncidents) -> AllocationTable {
        let mut table = AllocationTable::default();

        for incident in self.order.sequence(incidents) {
            let record = Self::allocate_incident(pool, incident);
            table.entries.entry(incident.category).or_default().push(record);
        }

        log::info!(
            "Allocation pass finished for {} incidents. Remaining: {}.",
            incidents.len(),
            pool.resources().iter().map(|r| format!("{} {}/{}", r.name(), r.remaining_capacity(), r.capacity())).collect::<Vec<_>>().join(", ")
        );

        table
    }

    fn allocate_incident(pool: &mut ResourcePool, incident: &CategorizedIncident) -> AllocationRecord {
        let mut grants = Vec::new();

        for resource in pool.resources_mut() {
            let wanted = ceiling(incident.severity, resource.kind);
            let had_units = resource.remaining_capacity() > 0;
            let units = resource.take(wanted);

            if units < wanted {
                log::debug!(
                    "Incident #{} ({} severity) capped on {}: wanted {}, granted {}.",
                    incident.sequence,
                    incident.severity,
                    resource.name(),
                    wanted,
                    units
                );
            }
            if had_units && resource.remaining_capacity() == 0 {
                log::warn!("Resource '{}' exhausted while serving incident #{}.", resource.name(), incident.sequence);
            }

            grants.push(ResourceGrant { resource: resource.kind, units });
        }

        let record = AllocationRecord { sequence: incident.sequence, node: incident.node.clone(), grants };
        log::debug!("Incident #{} at node {} ({}) granted {}.", incident.sequence, incident.node, incident.category, record);

        record
    }
}

/// Allocation with the default category-priority order.
pub fn allocate(pool: &mut ResourcePool, incidents: &CategorizedIncidents) -> AllocationTable {
    Allocator::default().allocate(pool, incidents)
}
