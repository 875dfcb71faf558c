pub mod cache;
pub mod charts;
pub mod config;
pub mod date_util;
pub mod error;
pub mod format_util;
pub mod metrics;
pub mod model;
pub mod storage;
pub mod synthetic;
pub mod view;

pub use cache::{ProjectCache, ProjectListener};
pub use charts::{ChartKind, ChartSet, ChartSpec};
pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use metrics::{KpiEntry, KpiKind, KpiSummary, Signal};
pub use model::{MetricRecord, ProjectInput, ProjectStatus};
pub use storage::Database;
pub use synthetic::{PlaceholderSource, RandomSource};
pub use view::AnalyticsBundle;

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};

use storage::repository;

/// Maximum number of stored projects.
pub const MAX_PROJECTS: usize = 999;

/// Main entry point: the project store plus the analytics view over it.
///
/// Every create, delete, or reload re-reads the full collection and pushes it
/// to the cache and to each registered listener.
pub struct ForgeAnalytics {
    db: Database,
    cache: ProjectCache,
    listeners: Vec<Arc<dyn ProjectListener>>,
}

impl ForgeAnalytics {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: ProjectCache::new(),
            listeners: Vec::new(),
        }
    }

    /// Open the store and load the current collection into the cache.
    pub async fn load(db: Database) -> Result<Self> {
        let forge = Self::new(db);
        forge.reload().await?;
        Ok(forge)
    }

    /// Register a listener for collection changes.
    pub fn subscribe(&mut self, listener: Arc<dyn ProjectListener>) {
        self.listeners.push(listener);
    }

    /// The underlying store, for schema and file-level details.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The last-known project collection.
    pub fn projects(&self) -> Arc<Vec<MetricRecord>> {
        self.cache.snapshot()
    }

    // ── Projects ───────────────────────────────────────────────────

    /// Re-read all projects and notify the cache and listeners.
    pub async fn reload(&self) -> Result<Arc<Vec<MetricRecord>>> {
        let projects = self
            .db
            .reader()
            .call(|conn| repository::list_projects(conn))
            .await?;
        log::info!("Loaded {} projects", projects.len());
        self.notify(projects);
        Ok(self.cache.snapshot())
    }

    fn notify(&self, projects: Vec<MetricRecord>) {
        for listener in &self.listeners {
            listener.on_projects_changed(&projects);
        }
        self.cache.replace(projects);
    }

    /// Validate form input and store it as a new project.
    pub async fn create_project(&self, input: &ProjectInput) -> Result<MetricRecord> {
        let record = MetricRecord::from_input(input, uuid::Uuid::new_v4().to_string(), Utc::now());

        let inserted = self
            .db
            .writer()
            .call({
                let record = record.clone();
                move |conn| {
                    if repository::count_projects(conn)? >= MAX_PROJECTS {
                        return Ok(false);
                    }
                    repository::insert_project(conn, &record)?;
                    Ok::<bool, rusqlite::Error>(true)
                }
            })
            .await?;
        if !inserted {
            log::warn!("Refusing to create project: limit of {MAX_PROJECTS} reached");
            return Err(Error::LimitReached(MAX_PROJECTS));
        }

        log::info!("Created project {} ({})", record.id, record.name);
        self.reload().await?;
        Ok(record)
    }

    /// Launch a new project from an existing one's values, with `changes`
    /// applied on top. The original project is left untouched.
    pub async fn create_version(
        &self,
        project_id: &str,
        changes: ProjectInput,
    ) -> Result<MetricRecord> {
        let base = self.get_project(project_id).await?;
        let input = ProjectInput::from_record(&base).merge(changes);
        self.create_project(&input).await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        let removed = self
            .db
            .writer()
            .call({
                let project_id = project_id.to_string();
                move |conn| repository::delete_project(conn, &project_id)
            })
            .await?;
        if !removed {
            return Err(Error::NotFound(project_id.to_string()));
        }

        log::info!("Deleted project {project_id}");
        self.reload().await?;
        Ok(())
    }

    /// Fetch one project straight from the database.
    pub async fn get_project(&self, project_id: &str) -> Result<MetricRecord> {
        self.db
            .reader()
            .call({
                let project_id = project_id.to_string();
                move |conn| repository::get_project(conn, &project_id)
            })
            .await?
            .ok_or_else(|| Error::NotFound(project_id.to_string()))
    }

    // ── Analytics view ─────────────────────────────────────────────

    /// Derive the analytics view for a cached project, with fresh random
    /// placeholder data.
    pub fn open(&self, project_id: &str) -> Result<AnalyticsBundle> {
        self.open_with(
            project_id,
            Local::now().date_naive(),
            &mut RandomSource::from_entropy(),
        )
    }

    /// Like [`open`](Self::open) with an explicit date and placeholder source.
    pub fn open_with(
        &self,
        project_id: &str,
        today: NaiveDate,
        source: &mut dyn PlaceholderSource,
    ) -> Result<AnalyticsBundle> {
        let projects = self.cache.snapshot();
        view::open(&projects, project_id, today, source)
    }

    // ── Config ─────────────────────────────────────────────────────

    pub async fn dashboard_config(&self) -> Result<DashboardConfig> {
        let pairs = self.config_list().await?;
        Ok(DashboardConfig::from_pairs(
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }

    pub async fn config_get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .reader()
            .call({
                let key = key.to_string();
                move |conn| repository::get_config(conn, &key)
            })
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub async fn config_set(&self, key: &str, value: &str) -> Result<()> {
        config::validate_key(key)?;
        self.db
            .writer()
            .call({
                let key = key.to_string();
                let value = value.to_string();
                move |conn| repository::set_config(conn, &key, &value)
            })
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub async fn config_list(&self) -> Result<Vec<(String, String)>> {
        self.db
            .reader()
            .call(|conn| repository::list_config(conn))
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}
