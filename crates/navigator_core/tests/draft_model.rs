use navigator_core::{
    Domain, Draft, DraftError, Entry, EntryId, EntryValidationError, Score, ToggleOutcome,
    ValuePoint, ValuePointError, ValuePointId,
};
use serde_json::json;

fn score(raw: i64) -> Score {
    Score::new(raw).unwrap()
}

#[test]
fn toggle_asks_for_score_then_removes_selected_value() {
    let mut draft = Draft::new();
    assert_eq!(
        draft.toggle(Domain::Relationships, "Trust"),
        ToggleOutcome::NeedsScore
    );

    let id = draft.add(Domain::Relationships, "Trust", score(4)).unwrap();
    assert_eq!(draft.len(), 1);

    match draft.toggle(Domain::Relationships, "  Trust ") {
        ToggleOutcome::Removed(point) => assert_eq!(point.id, id),
        other => panic!("unexpected toggle outcome: {other:?}"),
    }
    assert!(draft.is_empty());
}

#[test]
fn adding_existing_value_updates_its_score() {
    let mut draft = Draft::new();
    let first = draft.add(Domain::Leisure, "Joy", score(2)).unwrap();
    let second = draft.add(Domain::Leisure, "Joy", score(5)).unwrap();

    assert_eq!(first, second);
    assert_eq!(draft.len(), 1);
    assert_eq!(draft.points()[0].score, score(5));
}

#[test]
fn same_label_in_another_domain_is_a_separate_value() {
    let mut draft = Draft::new();
    draft.add(Domain::Leisure, "Balance", score(2)).unwrap();
    draft.add(Domain::WorkEducation, "Balance", score(3)).unwrap();
    assert_eq!(draft.len(), 2);
}

#[test]
fn blank_labels_are_rejected() {
    let mut draft = Draft::new();
    let err = draft.add(Domain::Leisure, "   ", score(3)).unwrap_err();
    assert_eq!(err, DraftError::InvalidPoint(ValuePointError::EmptyLabel));
}

#[test]
fn set_score_and_remove_require_a_known_point() {
    let mut draft = Draft::new();
    let id = draft.add(Domain::WorkEducation, "Focus", score(1)).unwrap();

    draft.set_score(id, score(3)).unwrap();
    assert_eq!(draft.points()[0].layer().value(), 3);

    let unknown = ValuePointId::new();
    assert_eq!(
        draft.set_score(unknown, score(2)),
        Err(DraftError::PointNotFound(unknown))
    );
    assert_eq!(draft.remove(unknown), Err(DraftError::PointNotFound(unknown)));

    let removed = draft.remove(id).unwrap();
    assert_eq!(removed.label, "Focus");
    assert!(draft.is_empty());
}

#[test]
fn freezing_empty_draft_fails() {
    assert_eq!(Draft::new().freeze(1).unwrap_err(), DraftError::EmptyDraft);
}

#[test]
fn freeze_copies_points_and_keeps_draft() {
    let mut draft = Draft::new();
    draft.add(Domain::Relationships, "Trust", score(5)).unwrap();
    draft.add(Domain::Leisure, "Rest", score(2)).unwrap();

    let entry = draft.freeze(1_700_000_000_000).unwrap();
    assert_eq!(entry.timestamp_ms(), 1_700_000_000_000);
    assert_eq!(entry.value_points(), draft.points());
    assert_eq!(entry.points_in(Domain::Leisure).count(), 1);
    assert!(entry.validate().is_ok());

    draft.clear();
    assert!(draft.is_empty());
    assert_eq!(entry.value_points().len(), 2);
}

#[test]
fn seeded_draft_reuses_values_with_fresh_ids() {
    let mut draft = Draft::new();
    draft.add(Domain::Relationships, "Trust", score(5)).unwrap();
    let entry = draft.freeze(10).unwrap();

    let seeded = Draft::seeded_from(&entry);
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded.points()[0].label, "Trust");
    assert_eq!(seeded.points()[0].score, score(5));
    assert_ne!(seeded.points()[0].id, entry.value_points()[0].id);
}

#[test]
fn entry_validation_rejects_duplicate_ids() {
    let id = ValuePointId::new();
    let a = ValuePoint::with_id(id, "Trust", Domain::Relationships, score(5)).unwrap();
    let b = ValuePoint::with_id(id, "Rest", Domain::Leisure, score(1)).unwrap();

    let entry = Entry::from_parts(EntryId::new(), 0, vec![a, b]);
    assert_eq!(
        entry.validate(),
        Err(EntryValidationError::DuplicatePointId(id))
    );
    assert_eq!(
        Entry::from_parts(EntryId::new(), 0, Vec::new()).validate(),
        Err(EntryValidationError::NoValuePoints)
    );
}

#[test]
fn entry_serializes_with_display_names_and_no_layer() {
    let mut draft = Draft::new();
    draft
        .add(Domain::PersonalGrowthHealth, "Bravery", score(4))
        .unwrap();
    let entry = draft.freeze(42).unwrap();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["timestamp"], 42);
    let point = &json["valuePoints"][0];
    assert_eq!(point["domain"], "Personal Growth & Health");
    assert_eq!(point["score"], 4);
    assert_eq!(point["label"], "Bravery");
    assert!(point.get("layer").is_none());
}

#[test]
fn legacy_layer_field_is_ignored_on_read() {
    let raw = json!({
        "id": "0b7c8f3e-4c1a-4e55-9a63-2f0a6f7f1d10",
        "timestamp": 1_000,
        "valuePoints": [{
            "id": "6a1d1c35-7f6e-4f4b-8d6e-6e2b5d3c9a01",
            "label": "  Trust ",
            "domain": "Relationships",
            "score": 5,
            "layer": 5
        }]
    });

    let entry: Entry = serde_json::from_value(raw).unwrap();
    let point = &entry.value_points()[0];
    assert_eq!(point.label, "Trust");
    assert_eq!(point.layer().value(), 1);
}

#[test]
fn invalid_documents_are_rejected() {
    let bad_score = json!({
        "id": "6a1d1c35-7f6e-4f4b-8d6e-6e2b5d3c9a01",
        "label": "Trust",
        "domain": "Relationships",
        "score": 0
    });
    assert!(serde_json::from_value::<ValuePoint>(bad_score).is_err());

    let unknown_domain = json!({
        "id": "6a1d1c35-7f6e-4f4b-8d6e-6e2b5d3c9a01",
        "label": "Trust",
        "domain": "Hobbies",
        "score": 3
    });
    assert!(serde_json::from_value::<ValuePoint>(unknown_domain).is_err());

    let nil_id = json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "label": "Trust",
        "domain": "Relationships",
        "score": 3
    });
    assert!(serde_json::from_value::<ValuePoint>(nil_id).is_err());
}

#[test]
fn from_points_keeps_ids_and_order() {
    let trust = ValuePoint::new("Trust", Domain::Relationships, score(5)).unwrap();
    let rest = ValuePoint::new("Rest", Domain::Leisure, score(2)).unwrap();

    let draft = Draft::from_points(vec![trust.clone(), rest.clone()]).unwrap();
    let entry = draft.freeze(7).unwrap();

    let ids: Vec<ValuePointId> = entry.value_points().iter().map(|point| point.id).collect();
    assert_eq!(ids, vec![trust.id, rest.id]);
}

#[test]
fn from_points_rejects_repeated_ids() {
    let id = ValuePointId::new();
    let a = ValuePoint::with_id(id, "Trust", Domain::Relationships, score(5)).unwrap();
    let b = ValuePoint::with_id(id, "Rest", Domain::Leisure, score(1)).unwrap();

    assert_eq!(
        Draft::from_points(vec![a, b]),
        Err(DraftError::DuplicatePointId(id))
    );
}

#[test]
fn from_points_rejects_repeated_values_in_one_domain() {
    let a = ValuePoint::new("Joy", Domain::Leisure, score(5)).unwrap();
    let b = ValuePoint::new(" Joy ", Domain::Leisure, score(1)).unwrap();

    assert_eq!(
        Draft::from_points(vec![a, b]),
        Err(DraftError::DuplicateValue {
            domain: Domain::Leisure,
            label: "Joy".to_string(),
        })
    );

    let work = ValuePoint::new("Balance", Domain::WorkEducation, score(3)).unwrap();
    let leisure = ValuePoint::new("Balance", Domain::Leisure, score(3)).unwrap();
    assert_eq!(Draft::from_points(vec![work, leisure]).unwrap().len(), 2);
}
