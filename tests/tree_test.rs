//! Tests for tree rendering and traversal order

use rstag::store::TagStore;

/// root "work" with children "urgent" and "later", "urgent" with child
/// "today", plus a second root "home"
fn three_level_store() -> TagStore {
    let mut store = TagStore::new();
    let work = store.new_tag("work", None).id();
    let urgent = store.new_tag("urgent", Some(work)).id();
    store.new_tag("later", Some(work));
    store.new_tag("today", Some(urgent));
    store.new_tag("home", None);
    store
}

fn offset(rendered: &str, name: &str) -> usize {
    let needle = format!("Tag \"{}\"", name);
    rendered
        .find(&needle)
        .unwrap_or_else(|| panic!("'{name}' missing from rendering:\n{rendered}"))
}

#[test]
fn given_three_level_tree_when_rendering_then_parent_precedes_children() {
    let store = three_level_store();
    let rendered = store.tree_string();

    assert!(offset(&rendered, "work") < offset(&rendered, "urgent"));
    assert!(offset(&rendered, "urgent") < offset(&rendered, "today"));
    assert!(offset(&rendered, "today") < offset(&rendered, "later"));
    assert!(offset(&rendered, "later") < offset(&rendered, "home"));
}

#[test]
fn given_three_level_tree_when_rendering_then_depth_shows_as_indentation() {
    let store = three_level_store();
    let rendered = store.tree_string();

    let column = |name: &str| {
        let line = rendered
            .lines()
            .find(|l| l.contains(&format!("Tag \"{}\"", name)))
            .unwrap_or_else(|| panic!("'{name}' missing from rendering"));
        line.find("Tag \"").expect("line carries a tag label")
    };

    assert_eq!(column("work"), 0, "roots start at column zero");
    assert_eq!(column("home"), 0);
    assert!(column("urgent") > column("work"));
    assert!(column("today") > column("urgent"));
    assert_eq!(column("later"), column("urgent"));
}

#[test]
fn given_three_level_tree_when_rendering_then_every_tag_appears_once() {
    let store = three_level_store();
    let rendered = store.tree_string();

    assert_eq!(rendered.lines().count(), 5);
    for name in ["work", "urgent", "today", "later", "home"] {
        let needle = format!("Tag \"{}\"", name);
        assert_eq!(rendered.matches(&needle).count(), 1, "{name} rendered once");
    }
}

#[test]
fn given_rendered_tree_when_reading_lines_then_ids_are_embedded() {
    let store = three_level_store();
    let rendered = store.tree_string();
    let work_id = store.get("work").expect("lookup").id().to_string();

    assert!(rendered.contains(&work_id));
}

#[test]
fn given_forest_when_iterating_then_order_is_preorder() {
    let store = three_level_store();

    let names: Vec<&str> = store.iter().map(|tag| tag.name()).collect();
    assert_eq!(names, vec!["work", "urgent", "today", "later", "home"]);
}

#[test]
fn given_empty_store_when_rendering_then_output_is_empty() {
    let store = TagStore::new();
    assert!(store.tree_string().is_empty());
}
