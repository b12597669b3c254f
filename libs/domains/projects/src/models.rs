use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::ProjectError;

/// Lifecycle of a project. Stored as the Postgres enum `project_status`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "NotStarted")]
    NotStarted,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];
}

/// A project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Auto-assigned, never reused
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Calendar date, `YYYY-MM-DD`
    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, soft delete included
    pub updated_at: DateTime<Utc>,
    /// Logically removed records stay in storage with this flag set
    pub is_deleted: bool,
}

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
}

impl Project {
    /// Overwrite every mutable field. Partial updates are not supported.
    pub fn apply_input(&mut self, input: ProjectInput) {
        self.name = input.name;
        self.description = input.description;
        self.status = input.status;
        self.due_date = input.due_date;
        self.touch();
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` and `desc` are honoured; anything else falls back to ascending.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Repository-level query over non-deleted projects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    /// Case-insensitive substring of `name`
    pub name_contains: Option<String>,
    pub sort: SortOrder,
}

/// Raw query string pairs, in request order, repeated keys included.
pub type QueryPairs = [(String, String)];

/// Every value given for `key`.
fn values_of<'a>(pairs: &'a QueryPairs, key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// Query string of `GET /api/projects`
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// One of `NotStarted`, `InProgress`, `Completed`
    pub status: Option<String>,
    /// `asc` (default) or `desc`, by due date
    pub sort: Option<String>,
}

impl ListQuery {
    /// A repeated `status` can never name a single status and is rejected;
    /// a repeated `sort` is ignored.
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self, ProjectError> {
        let status = match values_of(pairs, "status").as_slice() {
            [] => None,
            [one] => Some(one.to_string()),
            _ => return Err(ProjectError::InvalidStatus),
        };
        let sort = match values_of(pairs, "sort").as_slice() {
            [one] => Some(one.to_string()),
            _ => None,
        };

        Ok(Self { status, sort })
    }
}

impl TryFrom<ListQuery> for ProjectFilter {
    type Error = ProjectError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(ProjectStatus::from_str(raw).map_err(|_| ProjectError::InvalidStatus)?),
        };

        Ok(Self {
            status,
            name_contains: None,
            sort: SortOrder::from_query(query.sort.as_deref()),
        })
    }
}

/// Query string of `GET /api/projects/search`
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the project name
    pub search: Option<String>,
}

impl SearchQuery {
    /// Only a single `search` value counts as a search term.
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        let search = match values_of(pairs, "search").as_slice() {
            [one] => Some(one.to_string()),
            _ => None,
        };
        Self { search }
    }
}
