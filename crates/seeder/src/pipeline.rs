//! The sequential seeding pipeline.

use std::path::PathBuf;

use serde_json::{Value, json};

use common::DocumentId;
use doc_store::{DocumentStore, DocumentStoreExt, ViewQuery, ViewRow};
use fixtures::FixtureGenerator;
use views::ViewLoader;

use crate::{Result, SeederError};

/// Design document holding every seeded view.
const DESIGN_DOC: &str = "tests";

/// (customer id → name) keyed by age, `_count` reduce.
const CUSTOMERS_BY_AGE: &str = "customer_names_by_age";

/// (customer id → height) keyed by weight, map only.
const CUSTOMERS_BY_WEIGHT: &str = "customer_heights_by_weight";

/// (customer id → name) keyed by family surname, `_count` reduce.
const CUSTOMERS_BY_FAMILY: &str = "customers_by_family";

/// Visits keyed by `[timestamp, ip]`, value linking the customer.
const VISITS_BY_TIMESTAMP: &str = "visits_by_timestamp_by_ip";

/// How many of the youngest customers the age selection passes over.
/// The slice is positional over the view's result order, not an age
/// threshold.
const AGE_SELECTION_SKIP: u64 = 16;

/// The most recent visit, joined with its customer document.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestVisit {
    pub customer_name: String,
    pub ip_address: String,
}

/// The aggregate values the final queries produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    /// Customers whose family name is "Williams".
    pub williams_customers: i64,

    /// Customers at or below the child age cutoff in the age view.
    pub child_customers: i64,

    /// Visits whose timestamp falls inside calendar year 2016.
    pub visits_in_2016: i64,

    /// The most recent visit, absent when no visits exist.
    pub latest_visit: Option<LatestVisit>,
}

/// Everything a completed run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSummary {
    pub customers_created: usize,
    pub visits_created: usize,
    pub observations: Observations,
}

/// Runs the whole bootstrap against a document store.
///
/// Strictly sequential: view sync, then customer saves, then the two
/// selection queries and the visit bulk-write, then the observation
/// queries. Each store call is a blocking round trip and the first
/// failure aborts the run with no rollback.
pub struct Seeder<S> {
    store: S,
    generator: FixtureGenerator,
    views_dir: PathBuf,
    customer_count: usize,
}

impl<S: DocumentStore> Seeder<S> {
    /// Creates a seeder with the default views directory and customer
    /// count.
    pub fn new(store: S, generator: FixtureGenerator) -> Self {
        Self {
            store,
            generator,
            views_dir: PathBuf::from("views"),
            customer_count: 500,
        }
    }

    /// Sets the directory view sources are read from.
    pub fn views_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.views_dir = dir.into();
        self
    }

    /// Sets how many customers to generate.
    pub fn customer_count(mut self, count: usize) -> Self {
        self.customer_count = count;
        self
    }

    /// Runs the full pipeline and returns the summary.
    #[tracing::instrument(skip(self))]
    pub async fn run(&mut self) -> Result<SeedSummary> {
        tracing::info!("dropping and recreating the database");
        self.store.recreate_database().await?;

        self.write_views().await?;
        let customers_created = self.create_customers().await?;
        let visits_created = self.create_visits().await?;
        let observations = self.observe().await?;

        Ok(SeedSummary {
            customers_created,
            visits_created,
            observations,
        })
    }

    /// Loads view definitions from disk and syncs them in loader
    /// order.
    #[tracing::instrument(skip(self))]
    async fn write_views(&self) -> Result<()> {
        tracing::info!(dir = %self.views_dir.display(), "writing views to the database");
        let definitions = ViewLoader::new(&self.views_dir).read_views()?;
        for definition in &definitions {
            tracing::info!(view = %definition.qualified_name(), "syncing view");
            self.store.sync_view(definition).await?;
        }
        Ok(())
    }

    /// Generates and saves customers one document at a time.
    #[tracing::instrument(skip(self))]
    async fn create_customers(&mut self) -> Result<usize> {
        tracing::info!(count = self.customer_count, "bootstrapping customer records");
        for _ in 0..self.customer_count {
            let person = self.generator.generate_person();
            tracing::debug!(name = %person.name, "saving customer");
            self.store.save(serde_json::to_value(&person)?).await?;
        }
        Ok(self.customer_count)
    }

    /// Selects customers through the age and weight views and bulk
    /// writes one visit per selected row.
    ///
    /// A customer matched by both selections gets two independent
    /// visits.
    #[tracing::instrument(skip(self))]
    async fn create_visits(&mut self) -> Result<usize> {
        tracing::info!("generating visit data");
        let mut visits: Vec<Value> = Vec::new();

        tracing::info!(
            skipped = AGE_SELECTION_SKIP,
            "selecting customers past the youngest by age"
        );
        let rows = self
            .store
            .query_view(
                DESIGN_DOC,
                CUSTOMERS_BY_AGE,
                ViewQuery::new().reduce(false).skip(AGE_SELECTION_SKIP),
            )
            .await?;
        for row in rows {
            let customer = row_id(CUSTOMERS_BY_AGE, &row)?;
            tracing::debug!(customer = %row.value, "queueing visit");
            visits.push(serde_json::to_value(self.generator.generate_visit(&customer))?);
        }

        tracing::info!("selecting customers weighing 40-80kg");
        let rows = self
            .store
            .query_view(
                DESIGN_DOC,
                CUSTOMERS_BY_WEIGHT,
                ViewQuery::new()
                    .reduce(false)
                    .include_docs(true)
                    .start_key(json!(40))
                    .end_key(json!(80))
                    .inclusive_end(false),
            )
            .await?;
        for row in rows {
            let customer = row_id(CUSTOMERS_BY_WEIGHT, &row)?;
            let name = row
                .doc
                .as_ref()
                .and_then(|doc| doc.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            tracing::debug!(customer = name, "queueing visit");
            visits.push(serde_json::to_value(self.generator.generate_visit(&customer))?);
        }

        let count = visits.len();
        tracing::info!(count, "bulk inserting visits");
        self.store.bulk_update(visits).await?;
        Ok(count)
    }

    /// Computes the reporting values, each from its own query.
    #[tracing::instrument(skip(self))]
    async fn observe(&self) -> Result<Observations> {
        let williams_customers = self
            .count_reduce(
                CUSTOMERS_BY_FAMILY,
                ViewQuery::new()
                    .reduce(true)
                    .group(true)
                    .key(json!("Williams"))
                    .limit(1),
            )
            .await?;

        let child_customers = self
            .count_reduce(
                CUSTOMERS_BY_AGE,
                ViewQuery::new()
                    .reduce(true)
                    .group(false)
                    .end_key(json!(17))
                    .inclusive_end(true)
                    .limit(1),
            )
            .await?;

        let visits_in_2016 = self
            .count_reduce(
                VISITS_BY_TIMESTAMP,
                ViewQuery::new()
                    .reduce(true)
                    .group(false)
                    .start_key(json!(["2016-01-01 00:00:00", null]))
                    .end_key(json!(["2017-01-01 00:00:00", null]))
                    .inclusive_end(false)
                    .limit(1),
            )
            .await?;

        let latest_visit = self.latest_visit().await?;

        Ok(Observations {
            williams_customers,
            child_customers,
            visits_in_2016,
            latest_visit,
        })
    }

    /// First value of a reduce query; an empty result means nothing
    /// matched the range, which counts as zero.
    async fn count_reduce(&self, view: &str, query: ViewQuery) -> Result<i64> {
        let rows = self.store.query_view(DESIGN_DOC, view, query).await?;
        match rows.first() {
            Some(row) => row.value.as_i64().ok_or_else(|| SeederError::MalformedRow {
                view: view.to_string(),
                reason: format!("reduce value {} is not an integer", row.value),
            }),
            None => Ok(0),
        }
    }

    /// The most recent visit joined with its customer document.
    async fn latest_visit(&self) -> Result<Option<LatestVisit>> {
        let rows = self
            .store
            .query_view(
                DESIGN_DOC,
                VISITS_BY_TIMESTAMP,
                ViewQuery::new()
                    .reduce(false)
                    .descending()
                    .include_docs(true)
                    .limit(1),
            )
            .await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let customer_name = row
            .doc
            .as_ref()
            .and_then(|doc| doc.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| SeederError::MalformedRow {
                view: VISITS_BY_TIMESTAMP.to_string(),
                reason: "linked customer document has no name".to_string(),
            })?
            .to_string();

        let ip_address = row
            .key
            .get(1)
            .and_then(Value::as_str)
            .ok_or_else(|| SeederError::MalformedRow {
                view: VISITS_BY_TIMESTAMP.to_string(),
                reason: "key has no ip component".to_string(),
            })?
            .to_string();

        Ok(Some(LatestVisit {
            customer_name,
            ip_address,
        }))
    }
}

fn row_id(view: &str, row: &ViewRow) -> Result<DocumentId> {
    row.id.clone().ok_or_else(|| SeederError::MalformedRow {
        view: view.to_string(),
        reason: "map row without a document id".to_string(),
    })
}
