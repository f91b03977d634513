//! Permission matrix construction for the role editor.
//!
//! Turns the flat permission catalog into a resource × action grid.
//! Wildcard (blanket) entries are not editable cells and are dropped.

use serde::{Deserialize, Serialize};

/// Fixed column order for well-known actions. Anything else sorts
/// lexically after these.
const ACTION_PRIORITY: &[&str] = &["read", "create", "update", "delete", "export", "start", "stop"];

/// One entry of the permission catalog, as served by
/// `GET {scope}/roles/permissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// Full permission code, e.g. `admin:hotels:read`.
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parsed resource segment. May be empty; falls back to the second
    /// code segment.
    #[serde(default)]
    pub resource: String,
    /// Parsed action segment. May be empty; falls back to the third
    /// code segment.
    #[serde(default)]
    pub action: String,
}

impl CatalogEntry {
    /// Effective (resource, action) pair, with the same fallbacks the
    /// role editor applies: explicit field, then code segment, then
    /// `general`/`read`.
    fn resource_action(&self) -> (String, String) {
        let mut segments = self.code.split(':');
        let _service = segments.next();
        let seg_resource = segments.next().unwrap_or("");
        let seg_action = segments.next().unwrap_or("");

        let resource = if self.resource.is_empty() {
            if seg_resource.is_empty() { "general" } else { seg_resource }
        } else {
            self.resource.as_str()
        };
        let action = if self.action.is_empty() {
            if seg_action.is_empty() { "read" } else { seg_action }
        } else {
            self.action.as_str()
        };
        (resource.to_string(), action.to_string())
    }
}

/// One cell of a matrix row: an action column paired with the
/// resource's catalog entry for that action, if one exists. Cells
/// without an entry render as non-interactive.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub action: String,
    pub entry: Option<CatalogEntry>,
}

/// One matrix row: a resource with a cell for every known action.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub resource: String,
    pub cells: Vec<MatrixCell>,
}

impl MatrixRow {
    /// Codes of the row's actionable cells, in column order.
    pub fn codes(&self) -> Vec<String> {
        self.cells
            .iter()
            .filter_map(|cell| cell.entry.as_ref().map(|e| e.code.clone()))
            .collect()
    }

    /// Row-level "select all" state: true iff every actionable cell's
    /// code is selected. A row with zero actionable cells is never
    /// fully selected.
    pub fn all_selected(&self, selection: &[String]) -> bool {
        let codes = self.codes();
        !codes.is_empty() && codes.iter().all(|code| selection.contains(code))
    }
}

/// The full resource × action grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionMatrix {
    /// Deduplicated action columns in display order.
    pub actions: Vec<String>,
    /// One row per resource, in first-seen catalog order.
    pub rows: Vec<MatrixRow>,
}

impl PermissionMatrix {
    pub fn row(&self, resource: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.resource == resource)
    }
}

/// Build the permission matrix from a catalog.
///
/// Entries whose code contains a literal `*` (blanket grants) are
/// excluded, as are entries whose parsed resource or action is `*`.
pub fn build_matrix(catalog: &[CatalogEntry]) -> PermissionMatrix {
    // resource → (action → entry), preserving first-seen resource order
    let mut resources: Vec<(String, Vec<(String, CatalogEntry)>)> = Vec::new();
    let mut actions: Vec<String> = Vec::new();

    for entry in catalog {
        if entry.code.contains('*') {
            continue;
        }
        let (resource, action) = entry.resource_action();
        if resource == "*" || action == "*" {
            continue;
        }

        let row_idx = match resources.iter().position(|(r, _)| *r == resource) {
            Some(idx) => idx,
            None => {
                resources.push((resource.clone(), Vec::new()));
                resources.len() - 1
            }
        };
        let by_action = &mut resources[row_idx].1;
        match by_action.iter().position(|(a, _)| *a == action) {
            Some(idx) => by_action[idx].1 = entry.clone(),
            None => by_action.push((action.clone(), entry.clone())),
        }
        actions.push(action);
    }

    let actions = sort_actions(actions);

    let rows = resources
        .into_iter()
        .map(|(resource, by_action)| MatrixRow {
            cells: actions
                .iter()
                .map(|action| MatrixCell {
                    action: action.clone(),
                    entry: by_action
                        .iter()
                        .find(|(a, _)| a == action)
                        .map(|(_, e)| e.clone()),
                })
                .collect(),
            resource,
        })
        .collect();

    PermissionMatrix { actions, rows }
}

/// Deduplicate and order actions: priority list first, then lexical.
fn sort_actions(actions: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for action in actions {
        if !unique.contains(&action) {
            unique.push(action);
        }
    }
    unique.sort_by(|a, b| {
        let ia = ACTION_PRIORITY.iter().position(|p| p == a);
        let ib = ACTION_PRIORITY.iter().position(|p| p == b);
        match (ia, ib) {
            (Some(ia), Some(ib)) => ia.cmp(&ib),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
    unique
}

/// Human-facing column label for an action code.
pub fn action_label(action: &str) -> String {
    match action {
        "read" => "View".to_string(),
        "create" => "Add".to_string(),
        "update" => "Edit".to_string(),
        "delete" => "Delete".to_string(),
        "export" => "Export".to_string(),
        "start" => "Start".to_string(),
        "stop" => "Stop".to_string(),
        other => humanize(other),
    }
}

/// `front_desk-audit` → `Front Desk Audit`.
fn humanize(value: &str) -> String {
    value
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
