//! Column and status-option lookup.
//!
//! Column names are matched case-insensitively so that a configured `"ToDo"`
//! finds a board column called `"Todo"` or `"TODO"`. Field names are matched
//! exactly. When several candidates match, the first one in board order wins.

use crate::{ClassicColumn, FilingError, ProjectField, ProjectV2Snapshot, StatusOption, StatusTarget};

/// Compares two names ignoring case (full Unicode lowercase, not ASCII only).
fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Finds the classic column whose name matches `name`.
pub fn find_column<'a>(columns: &'a [ClassicColumn], name: &str) -> Option<&'a ClassicColumn> {
    columns.iter().find(|column| same_name(&column.name, name))
}

/// Finds the project field named exactly `field_name`.
pub fn find_status_field<'a>(
    snapshot: &'a ProjectV2Snapshot,
    field_name: &str,
) -> Option<&'a ProjectField> {
    snapshot
        .fields
        .iter()
        .find(|field| field.name.as_deref() == Some(field_name))
}

/// Finds the option of `field` whose name matches `name`.
pub fn find_status_option<'a>(field: &'a ProjectField, name: &str) -> Option<&'a StatusOption> {
    field
        .options
        .as_deref()?
        .iter()
        .find(|option| same_name(&option.name, name))
}

/// Resolves the field and option a new item must be set to for `column`.
///
/// `project` is only used to label errors.
pub fn select_status_target(
    snapshot: &ProjectV2Snapshot,
    field_name: &str,
    column: &str,
    project: &str,
) -> Result<StatusTarget, FilingError> {
    let field_missing = || FilingError::StatusFieldNotFound {
        field: field_name.to_string(),
        project: project.to_string(),
    };

    let field = find_status_field(snapshot, field_name).ok_or_else(field_missing)?;
    let field_id = field.id.clone().ok_or_else(field_missing)?;
    if field.options.is_none() {
        return Err(field_missing());
    }

    let option = find_status_option(field, column).ok_or_else(|| FilingError::ColumnNotFound {
        column: column.to_string(),
        project: project.to_string(),
    })?;

    Ok(StatusTarget {
        field_id,
        option_id: option.id.clone(),
    })
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
