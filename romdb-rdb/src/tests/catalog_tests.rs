use super::*;

fn make_record(name: &str, crc32: u32) -> GameRecord {
    GameRecord {
        name: name.to_string(),
        crc32,
        ..Default::default()
    }
}

#[test]
fn test_lookup_crc() {
    let catalog = Catalog::from_records(vec![
        make_record("Game A", 0xAAAA_0001),
        make_record("Game B", 0xBBBB_0002),
    ]);

    assert_eq!(catalog.lookup_crc(0xAAAA_0001).unwrap().name, "Game A");
    assert_eq!(catalog.lookup_crc(0xBBBB_0002).unwrap().name, "Game B");
    assert!(catalog.lookup_crc(0x1234_5678).is_none());
}

#[test]
fn test_zero_crc_is_listed_but_not_indexed() {
    let catalog = Catalog::from_records(vec![
        make_record("No Checksum", 0),
        make_record("Also None", 0),
        make_record("Indexed", 7),
    ]);

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.crc_count(), 1);
    assert!(catalog.lookup_crc(0).is_none());
}

#[test]
fn test_duplicate_crc_keeps_last() {
    let catalog = Catalog::from_records(vec![
        make_record("First", 0x0000_0001),
        make_record("Second", 0x0000_0001),
    ]);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.crc_count(), 1);
    assert_eq!(catalog.lookup_crc(1).unwrap().name, "Second");
}

#[test]
fn test_records_keep_stream_order() {
    let catalog = Catalog::from_records(vec![
        make_record("C", 3),
        make_record("A", 1),
        make_record("B", 0),
    ]);
    let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert_eq!(catalog.records()[1].name, "A");
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::empty();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
    assert_eq!(catalog.crc_count(), 0);
    assert!(catalog.lookup_crc(1).is_none());
}

#[test]
fn test_builder_counts() {
    let mut builder = CatalogBuilder::new();
    assert!(builder.is_empty());
    builder.push(make_record("A", 1));
    builder.push(make_record("B", 0));
    assert_eq!(builder.len(), 2);

    let catalog = builder.build();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.crc_count(), 1);
}

#[test]
fn test_game_lookup_trait() {
    let catalog = Catalog::from_records(vec![make_record("Game", 42)]);
    let lookup: &dyn GameLookup = &catalog;

    assert_eq!(lookup.find_by_crc(42).unwrap().name, "Game");
    assert!(lookup.find_by_crc(43).is_none());
    assert_eq!(lookup.record_count(), 1);
}
