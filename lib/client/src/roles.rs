//! Scope-bound role API.
//!
//! Admin-scoped and hotel-scoped roles share one entity shape and one
//! client; the scope is injected as a binding that supplies the
//! endpoint prefix, rather than duplicating parallel clients.

use std::sync::Arc;

use hms_authz::CatalogEntry;

use crate::error::ApiError;
use crate::model::{Role, RoleCreate, RoleUpdate};
use crate::transport::Transport;

/// Which portal's role endpoints to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    Admin,
    Hotel,
}

impl RoleScope {
    fn base_path(self) -> &'static str {
        match self {
            RoleScope::Admin => "/admin/roles",
            RoleScope::Hotel => "/hotel/roles",
        }
    }
}

/// Role CRUD + permission catalog for one scope.
pub struct RolesApi {
    transport: Arc<Transport>,
    scope: RoleScope,
}

impl RolesApi {
    pub fn new(transport: Arc<Transport>, scope: RoleScope) -> Self {
        Self { transport, scope }
    }

    pub fn scope(&self) -> RoleScope {
        self.scope
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.scope.base_path(), suffix)
    }

    /// The permission catalog feeding the matrix builder. Read-only
    /// reference data, fetched per role-editing session.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        self.transport.get(&self.path("/permissions")).await
    }

    pub async fn list(&self) -> Result<Vec<Role>, ApiError> {
        self.transport.get(self.scope.base_path()).await
    }

    pub async fn get(&self, id: &str) -> Result<Role, ApiError> {
        self.transport.get(&self.path(&format!("/{id}"))).await
    }

    pub async fn create(&self, payload: &RoleCreate) -> Result<Role, ApiError> {
        self.transport.post(self.scope.base_path(), payload).await
    }

    pub async fn update(&self, id: &str, payload: &RoleUpdate) -> Result<Role, ApiError> {
        self.transport.put(&self.path(&format!("/{id}")), payload).await
    }
}
