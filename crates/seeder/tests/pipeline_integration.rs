//! Integration tests: full pipeline runs against the in-memory store
//! using the view sources shipped in the repository.

use serde_json::json;

use doc_store::{InMemoryDocumentStore, ViewRow};
use fixtures::{FixtureGenerator, WordLists};
use seeder::{Seeder, summary_lines};

const DESIGN_DOC: &str = "tests";

fn repo_views_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../views").to_string()
}

fn test_generator() -> FixtureGenerator {
    let words = WordLists {
        forenames: vec!["Mary".to_string(), "John".to_string()],
        surnames: vec!["Williams".to_string(), "Smith".to_string()],
        occupations: vec!["Baker".to_string()],
        races: vec!["Mixed".to_string()],
        places: vec!["London".to_string()],
    };
    FixtureGenerator::with_seed(words, 2024)
}

/// Sixteen young customers for the age selection to pass over, plus
/// the two it should pick.
fn age_rows() -> Vec<ViewRow> {
    let mut rows: Vec<ViewRow> = (1..=16)
        .map(|age| {
            ViewRow::emitted(
                format!("young-{age}"),
                json!(age),
                json!(format!("Young Customer {age}")),
            )
        })
        .collect();
    rows.push(ViewRow::emitted("adult-a", json!(20), json!("Adult A")));
    rows.push(ViewRow::emitted("adult-b", json!(30), json!("Adult B")));
    rows
}

#[tokio::test]
async fn age_selection_queues_one_visit_per_row_past_the_slice() {
    let store = InMemoryDocumentStore::new();
    store.set_view_rows(DESIGN_DOC, "customer_names_by_age", age_rows()).await;
    store
        .set_view_rows(DESIGN_DOC, "customer_heights_by_weight", vec![])
        .await;
    store
        .set_view_rows(DESIGN_DOC, "visits_by_timestamp_by_ip", vec![])
        .await;

    let mut seeder = Seeder::new(store.clone(), test_generator())
        .views_dir(repo_views_dir())
        .customer_count(3);
    let summary = seeder.run().await.unwrap();

    // two rows survive the positional slice, the weight view adds none
    assert_eq!(summary.visits_created, 2);

    let visits = store.documents_of_type("visit").await;
    assert_eq!(visits.len(), 2);
    let referenced: Vec<&str> = visits
        .iter()
        .map(|visit| visit["customer"].as_str().unwrap())
        .collect();
    assert!(referenced.contains(&"adult-a"));
    assert!(referenced.contains(&"adult-b"));
}

#[tokio::test]
async fn full_run_reports_each_observation_from_its_own_query() {
    let store = InMemoryDocumentStore::new();

    store.set_view_rows(DESIGN_DOC, "customer_names_by_age", age_rows()).await;

    // one customer inside the weight band, one outside it
    store
        .set_view_rows(
            DESIGN_DOC,
            "customer_heights_by_weight",
            vec![
                ViewRow::emitted("adult-a", json!(55), json!(170)),
                ViewRow::emitted("adult-b", json!(95), json!(190)),
            ],
        )
        .await;

    store
        .set_view_rows(
            DESIGN_DOC,
            "customers_by_family",
            vec![
                ViewRow::emitted("young-1", json!("Smith"), json!("Young Customer 1")),
                ViewRow::emitted("adult-a", json!("Williams"), json!("Adult A")),
                ViewRow::emitted("adult-b", json!("Williams"), json!("Adult B")),
            ],
        )
        .await;

    // one visit before 2016, one inside it, one after; the latest row
    // stages its join document because the linked customer is not a
    // stored document
    store
        .set_view_rows(
            DESIGN_DOC,
            "visits_by_timestamp_by_ip",
            vec![
                ViewRow::emitted(
                    "visit-1",
                    json!(["2015-11-30 22:00:00", "1.1.1.1"]),
                    json!({ "_id": "adult-a" }),
                ),
                ViewRow::emitted(
                    "visit-2",
                    json!(["2016-06-01 12:00:00", "2.2.2.2"]),
                    json!({ "_id": "adult-a" }),
                ),
                ViewRow {
                    id: Some("visit-3".into()),
                    key: json!(["2017-03-05 09:15:00", "9.8.7.6"]),
                    value: json!({ "_id": "adult-b" }),
                    doc: Some(json!({ "type": "customer", "name": "Adult B" })),
                },
            ],
        )
        .await;

    let mut seeder = Seeder::new(store.clone(), test_generator())
        .views_dir(repo_views_dir())
        .customer_count(3);
    let summary = seeder.run().await.unwrap();

    assert_eq!(summary.customers_created, 3);
    assert_eq!(store.documents_of_type("customer").await.len(), 3);

    // 2 from the age slice + 1 from the weight band
    assert_eq!(summary.visits_created, 3);
    assert_eq!(store.documents_of_type("visit").await.len(), 3);

    let observations = &summary.observations;
    assert_eq!(observations.williams_customers, 2);
    // sixteen staged customers sit at or below the age cutoff
    assert_eq!(observations.child_customers, 16);
    // the 2016 count comes from the timestamp query, not the children count
    assert_eq!(observations.visits_in_2016, 1);

    let latest = observations.latest_visit.as_ref().unwrap();
    assert_eq!(latest.customer_name, "Adult B");
    assert_eq!(latest.ip_address, "9.8.7.6");

    let lines = summary_lines(&summary);
    assert!(lines.contains(&"  - 2 customers have the surname \"Williams\"".to_string()));
    assert!(lines.contains(&"  - 16 customers are children".to_string()));
    assert!(lines.contains(&"  - 1 visits occurred in 2016".to_string()));
    assert!(lines.contains(&"  - The latest visit is from Adult B (9.8.7.6)".to_string()));
}

#[tokio::test]
async fn run_syncs_every_shipped_view_once() {
    let store = InMemoryDocumentStore::new();
    store.set_view_rows(DESIGN_DOC, "customer_names_by_age", vec![]).await;
    store
        .set_view_rows(DESIGN_DOC, "customer_heights_by_weight", vec![])
        .await;
    store
        .set_view_rows(DESIGN_DOC, "visits_by_timestamp_by_ip", vec![])
        .await;

    let mut seeder = Seeder::new(store.clone(), test_generator())
        .views_dir(repo_views_dir())
        .customer_count(0);
    seeder.run().await.unwrap();

    for view in [
        "customer_names_by_age",
        "customer_heights_by_weight",
        "customers_by_family",
        "visits_by_timestamp_by_ip",
    ] {
        assert_eq!(
            store.view_version(DESIGN_DOC, view).await,
            Some(1),
            "{view} should be synced exactly once"
        );
    }
}
