use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use pretty_assertions::assert_eq;

use super::{calls, counted};
use crate::{Frozen, LazyMap, Placeholder, Slot};

#[test]
fn pending_value_renders_placeholder() {
    let counter = Arc::new(AtomicUsize::new(0));
    let map = LazyMap::from_raw([("a", Slot::eager(1)), ("b", counted(&counter, 2))]);

    let shown = map.to_display_string();
    assert!(shown.contains(r#""a": 1"#), "{shown}");
    assert!(shown.contains(r#""b": <unrealized>"#), "{shown}");
    assert_eq!(calls(&counter), 0);
}

#[test]
fn realized_value_renders_itself() {
    let map = LazyMap::new().insert_slot("b", Slot::deferred(|| 2));
    assert_eq!(map.to_display_string(), r#"{"b": <unrealized>}"#);

    assert_eq!(map.get("b"), Some(&2));
    assert_eq!(map.to_display_string(), r#"{"b": 2}"#);
}

#[test]
fn pretty_debug_keeps_placeholder_unquoted() {
    let map = LazyMap::new().insert_slot("k", Slot::deferred(|| String::from("v")));
    let pretty = format!("{map:#?}");
    assert_eq!(pretty, "{\n    \"k\": <unrealized>,\n}");
}

#[test]
fn nested_maps_stay_lazy() {
    let counter = Arc::new(AtomicUsize::new(0));
    let inner = LazyMap::from_raw([("x", counted(&counter, 1))]);
    let outer = LazyMap::new().insert("inner", inner);

    assert_eq!(
        outer.to_display_string(),
        r#"{"inner": {"x": <unrealized>}}"#
    );
    assert_eq!(calls(&counter), 0);
}

#[test]
fn entry_renders_as_pair() {
    let map = LazyMap::new().insert_slot("b", Slot::deferred(|| 2));
    let entry = map.get_entry("b").expect("entry present");

    assert_eq!(entry.to_display_string(), r#"["b", <unrealized>]"#);
    let _ = entry.value();
    assert_eq!(entry.to_display_string(), r#"["b", 2]"#);
}

#[test]
fn placeholder_text_is_raw() {
    let custom = Placeholder::new("<pending>");
    assert_eq!(custom.text(), "<pending>");
    assert_eq!(format!("{custom}"), "<pending>");
    assert_eq!(format!("{custom:?}"), "<pending>");
    assert_eq!(Placeholder::default(), Placeholder::UNREALIZED);
    assert_eq!(Placeholder::UNREALIZED.to_string(), "<unrealized>");
}

#[test]
fn frozen_view_uses_given_placeholder() {
    let marker = Placeholder::new("?");
    let map = LazyMap::new()
        .insert("a", 1)
        .insert_slot("b", Slot::deferred(|| 2));

    let mut view: Vec<(&str, Frozen<&i32>)> = map
        .frozen_view(&marker)
        .map(|(k, v)| (*k, v))
        .collect();
    view.sort_by_key(|(k, _)| *k);

    assert_eq!(
        view,
        vec![("a", Frozen::Realized(&1)), ("b", Frozen::Unrealized(marker.clone()))]
    );
    assert_eq!(format!("{:?}", view[1].1), "?");
    assert_eq!(map.is_realized("b"), Some(false));
}
