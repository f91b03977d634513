//! Authorization primitives for the HMS dashboard.
//!
//! Pure, I/O-free building blocks shared by both portals:
//!
//! - **Evaluation** — wildcard matching of a required permission code
//!   against a granted set ([`allows`])
//! - **Matrix** — grouping a flat permission catalog into the
//!   resource × action grid the role editor renders ([`build_matrix`])
//! - **Draft** — the working copy a role create/edit flow mutates
//!   before an all-or-nothing submit ([`RoleDraft`])
//!
//! Permission codes are colon-delimited, e.g. `admin:hotels:read`, with
//! `*` as a per-segment wildcard.

pub mod draft;
pub mod evaluate;
pub mod matrix;

pub use draft::{RoleDraft, RolePayload};
pub use evaluate::allows;
pub use matrix::{CatalogEntry, MatrixCell, MatrixRow, PermissionMatrix, action_label, build_matrix};
