use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectFilter, ProjectInput, SortOrder};

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new, non-deleted project
    async fn create(&self, input: ProjectInput) -> ProjectResult<Project>;

    /// Get a project by ID unless it is soft deleted
    async fn find_active(&self, id: i32) -> ProjectResult<Option<Project>>;

    /// Get a project by primary key, deleted or not
    async fn find_by_id(&self, id: i32) -> ProjectResult<Option<Project>>;

    /// Non-deleted projects matching the filter, ordered by due date then id
    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>>;

    /// Overwrite the stored row with the same id
    async fn save(&self, project: Project) -> ProjectResult<Project>;

    /// Whether any row (deleted or not) has this id
    async fn exists(&self, id: i32) -> ProjectResult<bool>;
}

fn matches_filter(project: &Project, filter: &ProjectFilter) -> bool {
    if project.is_deleted {
        return false;
    }
    if let Some(status) = filter.status {
        if project.status != status {
            return false;
        }
    }
    if let Some(ref term) = filter.name_contains {
        if !project.name.to_lowercase().contains(&term.to_lowercase()) {
            return false;
        }
    }
    true
}

#[derive(Debug, Default)]
struct Store {
    projects: BTreeMap<i32, Project>,
    last_id: i32,
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, input: ProjectInput) -> ProjectResult<Project> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let now = Utc::now();
        let project = Project {
            id: store.last_id,
            name: input.name,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        store.projects.insert(project.id, project.clone());

        tracing::info!(project_id = project.id, "Created project");
        Ok(project)
    }

    async fn find_active(&self, id: i32) -> ProjectResult<Option<Project>> {
        let store = self.store.read().await;
        Ok(store.projects.get(&id).filter(|p| !p.is_deleted).cloned())
    }

    async fn find_by_id(&self, id: i32) -> ProjectResult<Option<Project>> {
        let store = self.store.read().await;
        Ok(store.projects.get(&id).cloned())
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let store = self.store.read().await;

        // BTreeMap iteration is already id-ascending, so the stable sort keeps ties by id.
        let mut result: Vec<Project> = store
            .projects
            .values()
            .filter(|p| matches_filter(p, &filter))
            .cloned()
            .collect();

        match filter.sort {
            SortOrder::Asc => result.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
            SortOrder::Desc => result.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
        }

        Ok(result)
    }

    async fn save(&self, project: Project) -> ProjectResult<Project> {
        let mut store = self.store.write().await;

        let slot = store
            .projects
            .get_mut(&project.id)
            .ok_or(ProjectError::NotFound(project.id))?;
        *slot = Project {
            created_at: slot.created_at,
            ..project
        };
        let saved = slot.clone();

        tracing::info!(project_id = saved.id, "Saved project");
        Ok(saved)
    }

    async fn exists(&self, id: i32) -> ProjectResult<bool> {
        let store = self.store.read().await;
        Ok(store.projects.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use chrono::NaiveDate;

    fn input(name: &str, status: ProjectStatus, due: (i32, u32, u32)) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
            description: None,
            status,
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProjectRepository::new();

        let first = repo
            .create(input("alpha", ProjectStatus::NotStarted, (2025, 1, 1)))
            .await
            .unwrap();
        let second = repo
            .create(input("beta", ProjectStatus::NotStarted, (2025, 1, 1)))
            .await
            .unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert!(!first.is_deleted);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_deleted_rows_are_hidden_from_active_lookups() {
        let repo = InMemoryProjectRepository::new();
        let mut project = repo
            .create(input("alpha", ProjectStatus::NotStarted, (2025, 1, 1)))
            .await
            .unwrap();

        project.mark_deleted();
        repo.save(project.clone()).await.unwrap();

        assert!(repo.find_active(project.id).await.unwrap().is_none());
        assert!(repo.find_by_id(project.id).await.unwrap().unwrap().is_deleted);
        assert!(repo.exists(project.id).await.unwrap());
        assert!(repo.list(ProjectFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_due_date_with_id_tiebreak() {
        let repo = InMemoryProjectRepository::new();
        for (name, due) in [("c", (2025, 3, 1)), ("a", (2025, 1, 1)), ("b", (2025, 3, 1))] {
            repo.create(input(name, ProjectStatus::InProgress, due)).await.unwrap();
        }

        let asc: Vec<_> = repo
            .list(ProjectFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(asc, ["a", "c", "b"]);

        let desc: Vec<_> = repo
            .list(ProjectFilter {
                sort: SortOrder::Desc,
                ..Default::default()
            })
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(desc, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_list_filters_status_and_name() {
        let repo = InMemoryProjectRepository::new();
        repo.create(input("My Project", ProjectStatus::InProgress, (2025, 1, 1)))
            .await
            .unwrap();
        repo.create(input("PROJECT X", ProjectStatus::Completed, (2025, 1, 2)))
            .await
            .unwrap();
        repo.create(input("Other", ProjectStatus::InProgress, (2025, 1, 3)))
            .await
            .unwrap();

        let in_progress = repo
            .list(ProjectFilter {
                status: Some(ProjectStatus::InProgress),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 2);

        let named = repo
            .list(ProjectFilter {
                name_contains: Some("proj".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = named.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["My Project", "PROJECT X"]);
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let repo = InMemoryProjectRepository::new();
        let mut ghost = repo
            .create(input("ghost", ProjectStatus::NotStarted, (2025, 1, 1)))
            .await
            .unwrap();
        ghost.id = 999;

        assert!(matches!(
            repo.save(ghost).await,
            Err(ProjectError::NotFound(999))
        ));
        assert!(!repo.exists(999).await.unwrap());
    }
}
