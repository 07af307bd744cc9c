use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::api::scenario_dto::ResourceDto;
use crate::error::{Error, Result};

/// Responder unit kinds known to the allocation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ResourceKind {
    #[serde(rename = "Ambulance")]
    Ambulance,
    #[serde(rename = "Fire Truck")]
    FireTruck,
    #[serde(rename = "Police Car")]
    PoliceCar,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Ambulance => "Ambulance",
            ResourceKind::FireTruck => "Fire Truck",
            ResourceKind::PoliceCar => "Police Car",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<ResourceKind> {
        match name {
            "Ambulance" => Ok(ResourceKind::Ambulance),
            "Fire Truck" => Ok(ResourceKind::FireTruck),
            "Police Car" => Ok(ResourceKind::PoliceCar),
            _ => Err(Error::UnknownResourceKind(name.to_string())),
        }
    }
}

/// One depletable resource kind.
///
/// `remaining_capacity` starts at `capacity` and only ever goes down during an allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub kind: ResourceKind,
    capacity: u32,
    remaining_capacity: u32,
}

impl Resource {
    pub fn new(kind: ResourceKind, capacity: u32) -> Self {
        Self { kind, capacity, remaining_capacity: capacity }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.remaining_capacity
    }

    /// Takes up to `requested` units and returns how many were actually granted.
    pub fn take(&mut self, requested: u32) -> u32 {
        let granted = requested.min(self.remaining_capacity);
        self.remaining_capacity -= granted;
        granted
    }
}

/// The shared set of responder resources for one allocation run.
///
/// Kinds keep the order they were configured in; allocation records list them in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl Default for ResourcePool {
    /// Eight ambulances, seven fire trucks, seven police cars.
    fn default() -> Self {
        Self {
            resources: vec![
                Resource::new(ResourceKind::Ambulance, 8),
                Resource::new(ResourceKind::FireTruck, 7),
                Resource::new(ResourceKind::PoliceCar, 7),
            ],
        }
    }
}

impl ResourcePool {
    /// Builds a pool; a kind listed twice is a configuration error.
    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        for (i, resource) in resources.iter().enumerate() {
            if resources[..i].iter().any(|r| r.kind == resource.kind) {
                return Err(Error::InvalidConfiguration(format!("resource kind '{}' is listed more than once", resource.kind)));
            }
        }

        Ok(Self { resources })
    }

    pub fn from_dto(dtos: &[ResourceDto]) -> Result<Self> {
        let resources = dtos
            .iter()
            .map(|dto| Ok(Resource::new(dto.name.parse::<ResourceKind>()?, dto.capacity)))
            .collect::<Result<Vec<Resource>>>()?;

        ResourcePool::new(resources)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> impl Iterator<Item = &mut Resource> {
        self.resources.iter_mut()
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&Resource> {
        self.resources.iter().find(|r| r.kind == kind)
    }

    pub fn remaining(&self, kind: ResourceKind) -> u32 {
        self.get(kind).map(Resource::remaining_capacity).unwrap_or(0)
    }
}
