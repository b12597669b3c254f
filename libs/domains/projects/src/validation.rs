//! Request body validation for create and update.
//!
//! Fields are decoded as untyped JSON so that a wrong type is reported per
//! field instead of failing the whole body.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{ProjectInput, ProjectStatus};

pub const NAME_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Accepted date shapes: separator and chrono format. Every part must be
/// zero-padded to its full width.
const DATE_FORMATS: [(char, &str); 2] = [('-', "%Y-%m-%d"), ('/', "%Y/%m/%d")];
const DATE_PART_WIDTHS: [usize; 3] = [4, 2, 2];

/// Body of `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectPayload {
    #[schema(value_type = String, example = "Website redesign")]
    pub name: Option<Value>,
    /// May be omitted; `null` is rejected like any other non-string.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = ProjectStatus)]
    pub status: Option<Value>,
    /// `YYYY-MM-DD` or `YYYY/MM/DD`
    #[schema(value_type = String, example = "2025-06-30")]
    pub due_date: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ProjectPayload {
    fn parse(&self) -> Result<ProjectInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = collect(&mut errors, "name", parse_name(self.name.as_ref()));
        let description = collect(
            &mut errors,
            "description",
            parse_description(self.description.as_ref()),
        );
        let status = collect(&mut errors, "status", parse_status(self.status.as_ref()));
        let due_date = collect(&mut errors, "due_date", parse_due_date(self.due_date.as_ref()));

        match (name, description, status, due_date) {
            (Some(name), Some(description), Some(status), Some(due_date)) => Ok(ProjectInput {
                name,
                description,
                status,
                due_date,
            }),
            _ => Err(errors),
        }
    }
}

impl Validate for ProjectPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.parse().map(|_| ())
    }
}

impl TryFrom<ProjectPayload> for ProjectInput {
    type Error = ValidationErrors;

    fn try_from(payload: ProjectPayload) -> Result<Self, Self::Error> {
        payload.parse()
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err);
            None
        }
    }
}

fn field_error(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
    value: Option<&Value>,
) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(message.into());
    if let Some(value) = value {
        err.add_param(Cow::Borrowed("value"), value);
    }
    err
}

fn parse_name(value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None => Err(field_error("required", "Project name is required", None)),
        Some(Value::String(s)) if s.is_empty() => {
            Err(field_error("required", "Project name is required", value))
        }
        Some(Value::String(s)) if s.chars().count() > NAME_MAX_CHARS => Err(field_error(
            "length",
            format!("Project name must be at most {} characters", NAME_MAX_CHARS),
            value,
        )),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(field_error("type", "Project name must be a string", value)),
    }
}

fn parse_description(value: Option<&Value>) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.chars().count() > DESCRIPTION_MAX_CHARS => Err(field_error(
            "length",
            format!("Description must be at most {} characters", DESCRIPTION_MAX_CHARS),
            value,
        )),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(field_error("type", "Description must be a string", value)),
    }
}

fn parse_status(value: Option<&Value>) -> Result<ProjectStatus, ValidationError> {
    match value {
        None => Err(field_error("required", "Project status is required", None)),
        Some(Value::String(s)) if s.is_empty() => {
            Err(field_error("required", "Project status is required", value))
        }
        Some(Value::String(s)) => ProjectStatus::from_str(s).map_err(|_| invalid_status(value)),
        Some(_) => Err(invalid_status(value)),
    }
}

fn invalid_status(value: Option<&Value>) -> ValidationError {
    let allowed = ProjectStatus::ALL.map(|s| s.to_string()).join(", ");
    field_error("enum", format!("Status must be one of: {}", allowed), value)
}

fn parse_due_date(value: Option<&Value>) -> Result<NaiveDate, ValidationError> {
    match value {
        None => Err(field_error("required", "Due date is required", None)),
        Some(Value::String(s)) if s.is_empty() => {
            Err(field_error("required", "Due date is required", value))
        }
        Some(Value::String(s)) => parse_date(s)
            .ok_or_else(|| field_error("date", "Due date must be a valid date", value)),
        Some(_) => Err(field_error("date", "Due date must be a valid date", value)),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|(separator, fmt)| {
        let widths_match = raw
            .split(*separator)
            .map(str::len)
            .eq(DATE_PART_WIDTHS.iter().copied());
        if widths_match && raw.chars().all(|c| c == *separator || c.is_ascii_digit()) {
            NaiveDate::parse_from_str(raw, fmt).ok()
        } else {
            None
        }
    })
}
