use pretty_assertions::assert_eq;

use crate::{ArgumentKind, ArgumentNode, ArgumentValue};

pub fn slot(action: &ArgumentNode, index: usize) -> &ArgumentNode {
    match &action.payload {
        ArgumentValue::Nodes(slots) => slots
            .get(index)
            .unwrap_or_else(|| panic!("Action has no slot {index} ({} slots)", slots.len())),
        other => panic!("Action payload should be a sequence, found {}", other.shape()),
    }
}

pub fn slot_labels(action: &ArgumentNode) -> Vec<Option<String>> {
    match &action.payload {
        ArgumentValue::Nodes(slots) => slots.iter().map(|s| s.label.clone()).collect(),
        _ => Vec::new(),
    }
}

pub fn assert_slot_label(action: &ArgumentNode, index: usize, label: &str) {
    let node = slot(action, index);
    assert_eq!(
        node.label.as_deref(),
        Some(label),
        "Slot {index} should be labeled {label}"
    );
}

pub fn assert_slot_ignored(action: &ArgumentNode, index: usize) {
    let node = slot(action, index);
    assert_eq!(
        node.kind,
        ArgumentKind::Ignore,
        "Slot {index} should be marked ignore"
    );
}

pub fn assert_slot_payload(action: &ArgumentNode, index: usize, expected: &str) {
    let node = slot(action, index);
    assert_eq!(
        node.payload.to_string(),
        expected,
        "Slot {index} should display {expected}"
    );
}

pub fn assert_slot_labels(action: &ArgumentNode, expected: &[Option<&str>]) {
    let actual = slot_labels(action);
    let expected: Vec<Option<String>> = expected.iter().map(|l| l.map(str::to_string)).collect();
    assert_eq!(actual, expected, "Mismatch in slot labels");
}
