use incident_triage::domain::allocator::{AllocationOrder, AllocationOrderType, Allocator, allocate, ceiling};
use incident_triage::domain::classifier::Classifier;
use incident_triage::domain::incident::{Category, CategorizedIncident, CategorizedIncidents, IncidentReport, Severity};
use incident_triage::domain::resource::resource_pool::{Resource, ResourceKind, ResourcePool};
use incident_triage::error::Error;

fn classify(incidents: &[(&str, &str)]) -> CategorizedIncidents {
    let reports: Vec<IncidentReport> =
        incidents.iter().enumerate().map(|(i, (description, node))| IncidentReport::new(i, *description, *node)).collect();

    Classifier::default().classify(&reports)
}

fn pool(ambulances: u32, fire_trucks: u32, police_cars: u32) -> ResourcePool {
    ResourcePool::new(vec![
        Resource::new(ResourceKind::Ambulance, ambulances),
        Resource::new(ResourceKind::FireTruck, fire_trucks),
        Resource::new(ResourceKind::PoliceCar, police_cars),
    ])
    .unwrap()
}

#[test]
fn test_ceiling_table() {
    assert_eq!(ceiling(Severity::High, ResourceKind::FireTruck), 3);
    assert_eq!(ceiling(Severity::High, ResourceKind::Ambulance), 2);
    assert_eq!(ceiling(Severity::High, ResourceKind::PoliceCar), 1);
    assert_eq!(ceiling(Severity::Medium, ResourceKind::FireTruck), 0);
    assert_eq!(ceiling(Severity::Medium, ResourceKind::Ambulance), 3);
    assert_eq!(ceiling(Severity::Medium, ResourceKind::PoliceCar), 2);
    assert_eq!(ceiling(Severity::Low, ResourceKind::FireTruck), 0);
    assert_eq!(ceiling(Severity::Low, ResourceKind::Ambulance), 1);
    assert_eq!(ceiling(Severity::Low, ResourceKind::PoliceCar), 2);
}

#[test]
fn test_scarce_pool_example() {
    let incidents = classify(&[("fire in building 3", "3"), ("ambulance needed", "7")]);
    let mut pool = pool(1, 1, 1);

    let table = allocate(&mut pool, &incidents);

    let fire = table.get(Category::Fire);
    assert_eq!(fire.len(), 1);
    assert_eq!(fire[0].units(ResourceKind::FireTruck), 1, "High ceiling is 3 but only one truck exists");
    assert_eq!(fire[0].units(ResourceKind::Ambulance), 1, "High ceiling is 2 but only one ambulance exists");
    assert_eq!(fire[0].units(ResourceKind::PoliceCar), 1);

    let medical = table.get(Category::Medical);
    assert_eq!(medical.len(), 1);
    assert_eq!(medical[0].units(ResourceKind::Ambulance), 0, "The fire incident already took the only ambulance");
    assert_eq!(medical[0].units(ResourceKind::PoliceCar), 0);
    assert_eq!(medical[0].units(ResourceKind::FireTruck), 0);

    assert!(table.get(Category::Other).is_empty());
    assert!(!table.entries.contains_key(&Category::Other), "Categories without incidents are not listed");
}

#[test]
fn test_records_list_every_kind() {
    let incidents = classify(&[("medical emergency", "2")]);
    let mut pool = ResourcePool::default();

    let table = allocate(&mut pool, &incidents);
    let record = &table.get(Category::Medical)[0];

    let kinds: Vec<ResourceKind> = record.grants.iter().map(|g| g.resource).collect();
    assert_eq!(kinds, vec![ResourceKind::Ambulance, ResourceKind::FireTruck, ResourceKind::PoliceCar]);
    assert_eq!(record.units(ResourceKind::FireTruck), 0);
    assert_eq!(record.units(ResourceKind::Ambulance), 3);
    assert_eq!(record.units(ResourceKind::PoliceCar), 2);
}

#[test]
fn test_first_processed_wins_contested_unit() {
    let incidents = classify(&[("noise complaint", "1"), ("stolen bike", "2")]);
    let mut pool = pool(0, 0, 1);

    let table = allocate(&mut pool, &incidents);
    let other = table.get(Category::Other);

    assert_eq!(other[0].units(ResourceKind::PoliceCar), 1);
    assert_eq!(other[1].units(ResourceKind::PoliceCar), 0);
    assert_eq!(pool.remaining(ResourceKind::PoliceCar), 0);
}

#[test]
fn test_category_priority_serves_fire_before_earlier_other() {
    let incidents = classify(&[("stolen bike", "1"), ("kitchen fire", "2")]);
    let mut pool = pool(1, 0, 0);

    let table = Allocator::new(AllocationOrderType::CategoryPriority).allocate(&mut pool, &incidents);

    assert_eq!(table.get(Category::Fire)[0].units(ResourceKind::Ambulance), 1);
    assert_eq!(table.get(Category::Other)[0].units(ResourceKind::Ambulance), 0);
}

#[test]
fn test_arrival_order_serves_input_order() {
    let incidents = classify(&[("stolen bike", "1"), ("kitchen fire", "2")]);
    let mut pool = pool(1, 0, 0);

    let table = Allocator::new(AllocationOrderType::ArrivalOrder).allocate(&mut pool, &incidents);

    assert_eq!(table.get(Category::Other)[0].units(ResourceKind::Ambulance), 1);
    assert_eq!(table.get(Category::Fire)[0].units(ResourceKind::Ambulance), 0);
}

#[test]
fn test_default_pool_depletes_monotonically() {
    let incidents = classify(&[("fire 1", "1"), ("fire 2", "2"), ("fire 3", "3")]);
    let mut pool = ResourcePool::default();

    let table = allocate(&mut pool, &incidents);
    let fire = table.get(Category::Fire);

    assert_eq!(fire[0].units(ResourceKind::FireTruck), 3);
    assert_eq!(fire[1].units(ResourceKind::FireTruck), 3);
    assert_eq!(fire[2].units(ResourceKind::FireTruck), 1);
    assert_eq!(fire[2].units(ResourceKind::Ambulance), 2);

    assert_eq!(pool.remaining(ResourceKind::FireTruck), 0);
    assert_eq!(pool.remaining(ResourceKind::Ambulance), 2);
    assert_eq!(pool.remaining(ResourceKind::PoliceCar), 4);
}

#[test]
fn test_grants_never_exceed_initial_capacity() {
    let incidents = classify(&[
        ("fire downtown", "1"),
        ("ambulance please", "2"),
        ("medical help", "3"),
        ("car crash", "4"),
        ("fire at school", "5"),
        ("burglary", "6"),
        ("medical", "7"),
        ("fire", "8"),
        ("riot", "9"),
    ]);
    let initial = ResourcePool::default();
    let mut pool = initial.clone();

    let table = allocate(&mut pool, &incidents);

    for resource in initial.resources() {
        let granted = table.total_granted(resource.kind);
        assert!(granted <= resource.capacity(), "{} over-allocated: {} > {}", resource.name(), granted, resource.capacity());
        assert_eq!(pool.remaining(resource.kind), resource.capacity() - granted);
    }

    for (_, records) in table.iter() {
        for record in records {
            let severity = incidents.iter().find(|i| i.sequence == record.sequence).map(|i| i.severity).unwrap();
            for grant in &record.grants {
                assert!(grant.units <= ceiling(severity, grant.resource));
            }
        }
    }
}

#[test]
fn test_pool_rejects_duplicate_and_unknown_kinds() {
    let duplicate = ResourcePool::new(vec![Resource::new(ResourceKind::Ambulance, 1), Resource::new(ResourceKind::Ambulance, 2)]);
    assert!(matches!(duplicate, Err(Error::InvalidConfiguration(_))));

    let unknown = "Helicopter".parse::<ResourceKind>();
    assert!(matches!(unknown, Err(Error::UnknownResourceKind(name)) if name == "Helicopter"));

    assert_eq!("Fire Truck".parse::<ResourceKind>().unwrap(), ResourceKind::FireTruck);
}

#[test]
fn test_resource_take_caps_at_remaining() {
    let mut resource = Resource::new(ResourceKind::Ambulance, 3);

    assert_eq!(resource.take(2), 2);
    assert_eq!(resource.take(2), 1);
    assert_eq!(resource.take(2), 0);
    assert_eq!(resource.remaining_capacity(), 0);
    assert_eq!(resource.capacity(), 3);
}

/// Serves the most recently reported incident first.
#[derive(Debug)]
struct LatestFirst;

impl AllocationOrder for LatestFirst {
    fn sequence<'a>(&self, incidents: &'a CategorizedIncidents) -> Vec<&'a CategorizedIncident> {
        let mut ordered: Vec<&CategorizedIncident> = incidents.iter().collect();
        ordered.sort_by_key(|incident| std::cmp::Reverse(incident.sequence));
        ordered
    }
}

#[test]
fn test_custom_order_strategy() {
    let incidents = classify(&[("noise complaint", "1"), ("stolen bike", "2")]);
    let mut pool = pool(0, 0, 2);

    let table = Allocator::with_order(Box::new(LatestFirst)).allocate(&mut pool, &incidents);
    let other = table.get(Category::Other);

    assert_eq!(other.iter().map(|r| r.sequence).collect::<Vec<_>>(), vec![1, 0], "Records follow the serving order");
    assert_eq!(other[0].units(ResourceKind::PoliceCar), 2);
    assert_eq!(other[1].units(ResourceKind::PoliceCar), 0);
}
