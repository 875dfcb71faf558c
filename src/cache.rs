use std::sync::{Arc, PoisonError, RwLock};

use crate::model::MetricRecord;

/// Receives the full project collection every time it changes.
pub trait ProjectListener: Send + Sync {
    fn on_projects_changed(&self, projects: &[MetricRecord]);
}

/// Last-known project collection.
///
/// Replaced wholesale on each change notification, never patched. Readers get
/// an `Arc` snapshot, so a view being derived is unaffected by a concurrent
/// replacement.
#[derive(Clone, Default)]
pub struct ProjectCache {
    projects: Arc<RwLock<Arc<Vec<MetricRecord>>>>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, projects: Vec<MetricRecord>) {
        let mut guard = self.projects.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(projects);
    }

    pub fn snapshot(&self) -> Arc<Vec<MetricRecord>> {
        self.projects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find(&self, project_id: &str) -> Option<MetricRecord> {
        self.snapshot().iter().find(|p| p.id == project_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl ProjectListener for ProjectCache {
    fn on_projects_changed(&self, projects: &[MetricRecord]) {
        self.replace(projects.to_vec());
    }
}
