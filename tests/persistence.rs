mod common;

use common::SessionBuilder;
use vivarium_core::SandboxConfig;
use vivarium_io::{KeyValueStore, MemoryStore, PatternOrder};
use vivarium_lib::Session;

#[test]
fn test_settings_survive_restart() {
    let mut session = Session::with_seed(
        SandboxConfig::default(),
        Box::new(MemoryStore::new()),
        1,
    )
    .expect("Failed to build session");

    session.resize(14).unwrap();
    session.set_wrap_edges(false).unwrap();
    session.set_randomize_chance(0.8).unwrap();
    session.set_grid_scale(2.5).unwrap();
    session.toggle_cell(0, 0).unwrap();
    session.save_pattern("Dot").unwrap();

    let store = session.into_store();
    let restored =
        Session::with_seed(SandboxConfig::default(), store, 2).expect("Failed to rebuild session");

    assert_eq!(restored.board().size(), 14);
    assert!(!restored.wrap_edges());
    assert_eq!(restored.randomize_chance(), 0.8);
    assert_eq!(restored.grid_scale(), 2.5);
    assert_eq!(restored.patterns().len(), 1);
    assert!(restored.patterns().get("Dot").is_some());
}

#[test]
fn test_unreadable_stored_settings_fall_back_to_config() {
    let mut store = MemoryStore::new();
    store.set("grid_size", "garbage".into()).unwrap();
    store.set("wrap_edges", r#"{"val":"not a bool"}"#.into()).unwrap();

    let session = Session::with_seed(SandboxConfig::default(), Box::new(store), 3)
        .expect("Failed to build session");

    assert_eq!(session.board().size(), 10);
    assert!(session.wrap_edges());
}

#[test]
fn test_out_of_bounds_stored_size_falls_back() {
    let mut store = MemoryStore::new();
    store.set("grid_size", r#"{"val":99}"#.into()).unwrap();

    let session = Session::with_seed(SandboxConfig::default(), Box::new(store), 4)
        .expect("Failed to build session");
    assert_eq!(session.board().size(), 10);
}

#[test]
fn test_save_existing_name_replaces_and_moves_to_front() {
    let mut session = SessionBuilder::new().build();
    session.toggle_cell(1, 1).unwrap();
    session.save_pattern("Glider").unwrap();
    session.save_pattern("Other").unwrap();

    session.toggle_cell(2, 2).unwrap();
    session.save_pattern("Glider").unwrap();

    assert_eq!(session.patterns().len(), 2);
    let names: Vec<_> = session.patterns().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Glider", "Other"]);
    // the replacement carries the newer board
    assert_eq!(
        session.patterns().get("Glider").unwrap().state.cells,
        vec![[1, 1], [2, 2]]
    );
}

#[test]
fn test_invalid_names_rejected_without_saving() {
    let mut session = SessionBuilder::new().build();
    assert!(session.save_pattern("   ").is_err());
    assert!(session.save_pattern("***").is_err());
    assert!(session.save_pattern(&"n".repeat(65)).is_err());
    assert!(session.patterns().is_empty());
}

#[test]
fn test_saved_pattern_round_trip() {
    let mut session = SessionBuilder::new()
        .with_cells(&[(0, 1), (1, 2), (2, 0)])
        .build();
    let original = session.board().clone();

    session.save_pattern("Checkpoint").unwrap();
    session.clear();
    assert!(!session.any_alive());

    session.load_pattern("Checkpoint").unwrap();
    assert_eq!(*session.board(), original);
    // loading is not undoable into the cleared board
    assert!(!session.can_undo());
}

#[test]
fn test_delete_and_clear_patterns() {
    let mut session = SessionBuilder::new().build();
    session.toggle_cell(0, 0).unwrap();
    session.save_pattern("One").unwrap();
    session.save_pattern("Two").unwrap();

    session.delete_pattern("One").unwrap();
    assert!(session.patterns().get("One").is_none());
    // deleting a missing pattern is a no-op
    session.delete_pattern("One").unwrap();

    session.clear_patterns().unwrap();
    assert!(session.patterns().is_empty());

    // the cleared library is what restarts see
    let store = session.into_store();
    let restored = Session::with_seed(SandboxConfig::default(), store, 5)
        .expect("Failed to rebuild session");
    assert!(restored.patterns().is_empty());
}

#[test]
fn test_pattern_ordering_views() {
    let mut session = SessionBuilder::new().build();
    session.toggle_cell(0, 0).unwrap();
    session.save_pattern("beta").unwrap();
    session.toggle_cell(0, 1).unwrap();
    session.save_pattern("Alpha").unwrap();

    let by_name: Vec<_> = session
        .patterns()
        .sorted_by(PatternOrder::NameAscending)
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(by_name, vec!["Alpha", "beta"]);

    let by_density: Vec<_> = session
        .patterns()
        .sorted_by(PatternOrder::CellCountDescending)
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(by_density, vec!["Alpha", "beta"]);

    assert_eq!(session.patterns().search("ALPHA").len(), 1);
    assert_eq!(session.patterns().search("a").len(), 2);
}
