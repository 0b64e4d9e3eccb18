//! Integration test: a realistic views directory on disk → loaded
//! definitions, matching the layout the seeder ships.

use std::fs;

use views::{MAP_SOURCE_FILE, REDUCE_SOURCE_FILE, ViewLoader};

#[test]
fn mixed_reduce_and_map_only_views_load_in_order() {
    let root = tempfile::tempdir().unwrap();

    let by_age = root.path().join("tests").join("by_age");
    fs::create_dir_all(&by_age).unwrap();
    fs::write(
        by_age.join(MAP_SOURCE_FILE),
        "function (doc) { emit(doc.age, doc.name); }",
    )
    .unwrap();
    fs::write(by_age.join(REDUCE_SOURCE_FILE), "_count").unwrap();

    let by_weight = root.path().join("tests").join("by_weight");
    fs::create_dir_all(&by_weight).unwrap();
    fs::write(
        by_weight.join(MAP_SOURCE_FILE),
        "function (doc) { emit(doc.weight, doc.height); }",
    )
    .unwrap();

    let views = ViewLoader::new(root.path()).read_views().unwrap();

    assert_eq!(views.len(), 2);

    assert_eq!(views[0].design_document(), "tests");
    assert_eq!(views[0].view_name(), "by_age");
    assert!(views[0].map_source().contains("doc.age"));
    assert_eq!(views[0].reduce_source(), Some("_count"));

    assert_eq!(views[1].design_document(), "tests");
    assert_eq!(views[1].view_name(), "by_weight");
    assert!(views[1].map_source().contains("doc.weight"));
    assert_eq!(views[1].reduce_source(), None, "map-only view keeps no reduce component");
}
