//! Role draft editing.
//!
//! A [`RoleDraft`] is the working copy a create/edit flow mutates. It
//! is never partially persisted; [`RoleDraft::payload`] produces the
//! all-or-nothing submit body.

use serde::Serialize;

use crate::matrix::PermissionMatrix;

/// Working copy of a role under creation or edit.
#[derive(Debug, Clone, Default)]
pub struct RoleDraft {
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Selected permission codes, in selection order.
    pub selected: Vec<String>,
    /// System-flagged roles are read-only; every toggle is a no-op.
    pub read_only: bool,
}

/// Submit body for role create/update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePayload {
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

impl RoleDraft {
    /// Start an edit flow from an existing role's fields.
    pub fn from_existing(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: Option<String>,
        permissions: Vec<String>,
        is_system: bool,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.unwrap_or_default(),
            selected: permissions,
            read_only: is_system,
        }
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c == code)
    }

    /// Toggle a single cell's code in or out of the selection.
    pub fn toggle(&mut self, code: &str) {
        if self.read_only {
            return;
        }
        if let Some(pos) = self.selected.iter().position(|c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code.to_string());
        }
    }

    /// Toggle a whole row: if every actionable cell is selected, drop
    /// them all; otherwise (none or partial) select them all.
    pub fn toggle_row(&mut self, matrix: &PermissionMatrix, resource: &str) {
        if self.read_only {
            return;
        }
        let Some(row) = matrix.row(resource) else {
            return;
        };
        let codes = row.codes();
        if row.all_selected(&self.selected) {
            self.selected.retain(|c| !codes.contains(c));
        } else {
            for code in codes {
                if !self.is_selected(&code) {
                    self.selected.push(code);
                }
            }
        }
    }

    /// Build the submit body: trimmed names, empty description → none.
    pub fn payload(&self) -> RolePayload {
        let description = self.description.trim();
        RolePayload {
            name: self.name.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            permissions: self.selected.clone(),
        }
    }
}
