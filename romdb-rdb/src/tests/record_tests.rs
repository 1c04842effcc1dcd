use super::*;

fn feed(acc: &mut RecordAccumulator, fields: &[RawField<'_>]) -> Vec<Step> {
    fields.iter().map(|f| acc.accept(*f)).collect()
}

#[test]
fn test_has_data() {
    let mut record = GameRecord::default();
    assert!(!record.has_data());

    record.developer = "Nintendo".to_string();
    assert!(!record.has_data());

    record.crc32 = 1;
    assert!(record.has_data());

    let named = GameRecord {
        name: "Tetris (World)".to_string(),
        ..Default::default()
    };
    assert!(named.has_data());
}

#[test]
fn test_crc_hex_is_padded() {
    let record = GameRecord {
        crc32: 0x00AB_CDEF,
        ..Default::default()
    };
    assert_eq!(record.crc_hex(), "00abcdef");
}

#[test]
fn test_key_value_assignment() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::MapBoundary(3),
            RawField::Text(b"name"),
            RawField::Text(b"Super Game (USA)"),
            RawField::Text(b"releaseyear"),
            RawField::UnsignedInt(&[0x07, 0xE7]),
            RawField::Text(b"crc"),
            RawField::Bytes(&[0xDE, 0xAD, 0xBE, 0xEF]),
        ],
    );

    let record = acc.in_progress();
    assert_eq!(record.name, "Super Game (USA)");
    assert_eq!(record.release_year, 2023);
    assert_eq!(record.crc32, 0xDEAD_BEEF);
}

#[test]
fn test_all_text_fields() {
    let pairs = [
        ("name", "N"),
        ("description", "D"),
        ("genre", "G"),
        ("developer", "Dev"),
        ("publisher", "Pub"),
        ("franchise", "F"),
        ("esrb_rating", "E"),
        ("rom_name", "R.sfc"),
        ("serial", "S-1"),
    ];
    let mut acc = RecordAccumulator::new();
    for (key, value) in pairs {
        acc.accept(RawField::Text(key.as_bytes()));
        acc.accept(RawField::Text(value.as_bytes()));
    }

    let record = acc.finish().unwrap();
    assert_eq!(record.name, "N");
    assert_eq!(record.description, "D");
    assert_eq!(record.genre, "G");
    assert_eq!(record.developer, "Dev");
    assert_eq!(record.publisher, "Pub");
    assert_eq!(record.franchise, "F");
    assert_eq!(record.esrb_rating, "E");
    assert_eq!(record.rom_name, "R.sfc");
    assert_eq!(record.serial, "S-1");
}

#[test]
fn test_numeric_fields_accept_any_width() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(b"size"),
            RawField::UnsignedInt(&[0, 0, 0, 0, 0, 0x08, 0x00, 0x00]),
            RawField::Text(b"releasemonth"),
            RawField::UnsignedInt(&[11]),
            RawField::Text(b"crc"),
            RawField::UnsignedInt(&[0x12, 0x34, 0x56, 0x78]),
        ],
    );

    let record = acc.in_progress();
    assert_eq!(record.size, 0x0008_0000);
    assert_eq!(record.release_month, 11);
    assert_eq!(record.crc32, 0x1234_5678);
}

#[test]
fn test_crc_truncates_to_32_bits() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(b"crc"),
            RawField::UnsignedInt(&[0x01, 0x02, 0x03, 0x04, 0xAA, 0xBB, 0xCC, 0xDD]),
        ],
    );
    assert_eq!(acc.in_progress().crc32, 0xAABB_CCDD);
}

#[test]
fn test_unknown_key_is_ignored() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(b"coop"),
            RawField::Text(b"yes"),
            RawField::Text(b"name"),
            RawField::Text(b"Game"),
        ],
    );
    assert_eq!(acc.in_progress().name, "Game");
    assert!(acc.expecting_key());
}

#[test]
fn test_skip_does_not_toggle_alternation() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Skip,
            RawField::Text(b"name"),
            RawField::Skip,
            RawField::Skip,
            RawField::Text(b"Padded"),
        ],
    );
    assert_eq!(acc.in_progress().name, "Padded");
}

#[test]
fn test_invalid_utf8_value_is_empty() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(b"name"),
            RawField::Text(&[0xFF, 0xFE]),
            RawField::Text(b"genre"),
            RawField::Text(b"Puzzle"),
        ],
    );
    assert_eq!(acc.in_progress().name, "");
    assert_eq!(acc.in_progress().genre, "Puzzle");
}

#[test]
fn test_invalid_utf8_key_matches_nothing() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(&[0xC3, 0x28]),
            RawField::Text(b"ignored"),
            RawField::Text(b"name"),
            RawField::Text(b"Kept"),
        ],
    );
    assert_eq!(acc.in_progress().name, "Kept");
}

#[test]
fn test_boundary_emits_record_with_data() {
    let mut acc = RecordAccumulator::new();
    let steps = feed(
        &mut acc,
        &[
            RawField::MapBoundary(1),
            RawField::Text(b"name"),
            RawField::Text(b"First"),
            RawField::MapBoundary(1),
        ],
    );

    match steps.last() {
        Some(Step::Emit(record)) => assert_eq!(record.name, "First"),
        other => panic!("expected Emit, got {other:?}"),
    }
    assert_eq!(acc.in_progress(), &GameRecord::default());
}

#[test]
fn test_boundary_drops_record_without_data() {
    let mut acc = RecordAccumulator::new();
    let steps = feed(
        &mut acc,
        &[
            RawField::MapBoundary(1),
            RawField::Text(b"genre"),
            RawField::Text(b"Action"),
            RawField::MapBoundary(1),
        ],
    );
    assert!(steps.iter().all(|s| *s == Step::Continue));
    assert_eq!(acc.in_progress().genre, "");
}

#[test]
fn test_boundary_resets_key_expectation() {
    let mut acc = RecordAccumulator::new();
    feed(
        &mut acc,
        &[
            RawField::Text(b"name"),
            RawField::Text(b"Dangling"),
            RawField::Text(b"orphan_key"),
            RawField::MapBoundary(1),
            RawField::Text(b"name"),
            RawField::Text(b"Second"),
        ],
    );
    assert_eq!(acc.in_progress().name, "Second");
}

#[test]
fn test_nil_stops() {
    let mut acc = RecordAccumulator::new();
    assert_eq!(acc.accept(RawField::Nil), Step::Stop);
}

#[test]
fn test_finish_without_data_is_none() {
    let acc = RecordAccumulator::new();
    assert!(acc.finish().is_none());
}
