//! An in-memory SQLite `materials` table shaped like the production one.

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use query_engine_execution::metrics::Metrics;
use query_engine_execution::store::{SqliteStore, Store};
use query_engine_execution::ExecutionService;
use query_engine_metadata::metadata::{QueryCatalog, StatsQueries};

pub const CREATE_MATERIALS_TABLE: &str = r"CREATE TABLE materials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    material_id TEXT NOT NULL UNIQUE,
    formula_pretty TEXT NOT NULL,
    crystal_system TEXT,
    band_gap REAL,
    formation_energy_per_atom REAL,
    density REAL,
    nelements INTEGER,
    elements TEXT,
    is_stable INTEGER
)";

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub material_id: String,
    pub formula_pretty: String,
    pub crystal_system: Option<String>,
    pub band_gap: Option<f64>,
    pub formation_energy_per_atom: Option<f64>,
    pub nelements: Option<i64>,
    pub is_stable: bool,
}

impl Material {
    pub fn new(material_id: &str, formula_pretty: &str) -> Self {
        Material {
            material_id: material_id.to_string(),
            formula_pretty: formula_pretty.to_string(),
            crystal_system: None,
            band_gap: None,
            formation_energy_per_atom: None,
            nelements: None,
            is_stable: false,
        }
    }

    #[must_use]
    pub fn crystal_system(mut self, crystal_system: &str) -> Self {
        self.crystal_system = Some(crystal_system.to_string());
        self
    }

    #[must_use]
    pub fn band_gap(mut self, band_gap: f64) -> Self {
        self.band_gap = Some(band_gap);
        self
    }
}

/// A fresh, empty `materials` table. The pool keeps exactly one connection
/// alive forever, since every new in-memory connection is a new database.
pub async fn materials_database() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query(CREATE_MATERIALS_TABLE)
        .execute(&pool)
        .await
        .unwrap();
    pool
}

pub async fn insert_materials(pool: &SqlitePool, materials: &[Material]) {
    for material in materials {
        sqlx::query(
            "INSERT INTO materials (material_id, formula_pretty, crystal_system, band_gap, formation_energy_per_atom, nelements, is_stable) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&material.material_id)
        .bind(&material.formula_pretty)
        .bind(&material.crystal_system)
        .bind(material.band_gap)
        .bind(material.formation_energy_per_atom)
        .bind(material.nelements)
        .bind(material.is_stable)
        .execute(pool)
        .await
        .unwrap();
    }
}

/// A table holding `count` materials for each named crystal system, with
/// band gaps cycling through metals, semiconductors and insulators.
pub async fn crystal_system_database(counts: &[(&str, usize)]) -> SqlitePool {
    const BAND_GAPS: [f64; 3] = [0.0, 1.5, 4.2];

    let pool = materials_database().await;
    let mut materials = vec![];
    for (crystal_system, count) in counts {
        for n in 0..*count {
            let material_id = format!("mp-{}-{n}", crystal_system.to_lowercase());
            materials.push(
                Material::new(&material_id, "X")
                    .crystal_system(crystal_system)
                    .band_gap(BAND_GAPS[n % BAND_GAPS.len()]),
            );
        }
    }
    insert_materials(&pool, &materials).await;
    pool
}

pub fn sqlite_store(pool: SqlitePool) -> Arc<dyn Store> {
    Arc::new(SqliteStore::new(pool, Duration::from_secs(5)))
}

/// The service over the reference catalog and statistics.
pub fn execution_service(store: Arc<dyn Store>) -> ExecutionService {
    execution_service_with_catalog(QueryCatalog::reference(), store)
}

pub fn execution_service_with_catalog(
    catalog: QueryCatalog,
    store: Arc<dyn Store>,
) -> ExecutionService {
    let mut registry = prometheus::Registry::new();
    let metrics = Metrics::initialize(&mut registry).unwrap();
    ExecutionService::new(catalog, store, StatsQueries::default(), metrics)
}

/// A service over the reference catalog with its own aggregate statements.
pub fn execution_service_with_stats(
    stats: StatsQueries,
    store: Arc<dyn Store>,
) -> ExecutionService {
    let mut registry = prometheus::Registry::new();
    let metrics = Metrics::initialize(&mut registry).unwrap();
    ExecutionService::new(QueryCatalog::reference(), store, stats, metrics)
}
