//! End-to-end registry tests over a real file-backed store

use tempfile::TempDir;

use sectorstore::{
    FileStore, RecordFilter, SectorId, SectorRegistry, SectorStatus, Topology, Transition,
};

fn open(temp: &TempDir) -> SectorRegistry {
    let topology = Topology::embedded().unwrap();
    let store = FileStore::new(temp.path().join("snapshot.json"));
    SectorRegistry::new(topology, Box::new(store))
}

#[test]
fn test_fresh_registry_covers_whole_catalog() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    let topology = Topology::embedded().unwrap();
    assert_eq!(registry.all().len(), topology.sector_count());
    assert!(registry.all().iter().all(|r| r.is_pristine()));

    let stats = registry.statistics();
    assert_eq!(stats.pending, stats.total);
    assert_eq!(stats.completion_percentage, 0);
}

#[test]
fn test_mutations_survive_reload() {
    let temp = TempDir::new().unwrap();
    let uti = SectorId::new("BLOCO A", "1º Pavimento", "UTI");
    let cozinha = SectorId::new("ANEXO", "Térreo", "Cozinha");

    {
        let mut registry = open(&temp);
        assert!(registry.checkin(&uti, "João", "Maria").unwrap().is_applied());
        assert!(
            registry
                .complete_directly(&cozinha, "Ana", "Beto", Some(vec!["ref-1".to_string()]))
                .unwrap()
                .is_applied()
        );
    }

    let registry = open(&temp);

    let uti_record = registry.sector(&uti).unwrap();
    assert_eq!(uti_record.status, SectorStatus::InProgress);
    assert_eq!(uti_record.executor.as_deref(), Some("João"));
    assert_eq!(uti_record.responsible.as_deref(), Some("Maria"));
    assert!(uti_record.checkin_time.is_some());

    let cozinha_record = registry.sector(&cozinha).unwrap();
    assert_eq!(cozinha_record.status, SectorStatus::Completed);
    assert_eq!(cozinha_record.duration_minutes, Some(0));
    assert_eq!(cozinha_record.checkin_time, cozinha_record.checkout_time);
    assert_eq!(cozinha_record.photos.as_deref().map(|p| p.len()), Some(1));

    // Never-mutated sectors stay pending
    let other = registry.sector(&SectorId::new("BLOCO B", "Térreo", "Farmácia")).unwrap();
    assert!(other.is_pristine());
}

#[test]
fn test_snapshot_entries_outside_catalog_are_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");

    std::fs::write(
        &path,
        r#"[
            {"block":"BLOCO Z","floor":"Subsolo","name":"Fantasma","status":"completed"},
            {"block":"BLOCO A","floor":"1º Pavimento","name":"UTI","status":"in-progress",
             "checkin_time":"2025-03-10T12:00:00Z","executor":"João","responsible":"Maria"}
        ]"#,
    )
    .unwrap();

    let registry = open(&temp);
    assert_eq!(
        registry
            .sector(&SectorId::new("BLOCO A", "1º Pavimento", "UTI"))
            .unwrap()
            .status,
        SectorStatus::InProgress
    );
    assert!(registry.sector(&SectorId::new("BLOCO Z", "Subsolo", "Fantasma")).is_none());
    // The ghost entry contributed nothing to statistics
    assert_eq!(registry.statistics().completed, 0);
}

#[test]
fn test_corrupt_snapshot_degrades_to_fresh_state() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("snapshot.json"), "{{{ not json").unwrap();

    let registry = open(&temp);
    assert!(registry.all().iter().all(|r| r.is_pristine()));
}

#[test]
fn test_full_service_cycle_and_filters() {
    let temp = TempDir::new().unwrap();
    let mut registry = open(&temp);
    let uti = SectorId::new("BLOCO A", "1º Pavimento", "UTI");

    registry.checkin(&uti, "João Silva", "Maria").unwrap();
    assert_eq!(registry.checkout(&uti).unwrap(), Transition::Applied);

    let filter = RecordFilter {
        block: Some("BLOCO A".to_string()),
        name: Some("uti".to_string()),
        ..Default::default()
    };
    let matched = registry.filtered(&filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, uti);
    assert_eq!(matched[0].status, SectorStatus::Completed);

    // today() sees the fresh check-in
    assert!(registry.today().iter().any(|r| r.id == uti));

    registry.reset_all().unwrap();
    assert_eq!(registry.statistics().pending, registry.all().len());
}
