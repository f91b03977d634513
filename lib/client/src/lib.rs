//! HMS auth core client.
//!
//! The session, impersonation, and authorization-evaluation core of
//! the HMS dashboard, talking to the backend's `/auth` surface.
//!
//! # Components
//!
//! - **Transport** — HTTP over cookies with double-submit CSRF
//!   priming ([`transport`])
//! - **Session** — the bootstrap/login/logout/refresh/impersonation
//!   state machine, with atomic-replace semantics ([`session`])
//! - **Guards** — pure screen-level allow/deny/redirect decisions
//!   ([`guard`])
//! - **Roles** — scope-bound role CRUD + permission catalog
//!   ([`roles`])
//!
//! Permission evaluation itself lives in `hms-authz` and is re-used
//! here by the guards.
//!
//! # Usage
//!
//! ```ignore
//! use hms_client::{ClientConfig, SessionContext, Transport};
//!
//! let transport = Arc::new(Transport::new(&ClientConfig::default())?);
//! let ctx = SessionContext::new(transport);
//! match ctx.bootstrap().await {
//!     SessionState::Authenticated(session) => { /* render */ }
//!     SessionState::Anonymous => { /* login screen */ }
//!     SessionState::Unknown => unreachable!("bootstrap settles"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod roles;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use error::ApiError;
pub use guard::{GuardDecision, PASSWORD_CHANGE_PATH, Workspace, password_change_guard, permission_guard, workspace_guard};
pub use model::{
    AuthResponse, ImpersonationStartRequest, ImpersonationState, LoginRequest, LogoutResponse,
    PasswordChangeRequest, PasswordChangeResponse, Role, RoleCreate, RoleUpdate, TenantContext,
    UserIdentity, UserType,
};
pub use roles::{RoleScope, RolesApi};
pub use session::{Session, SessionContext, SessionState};
pub use transport::{CsrfCoordinator, Transport};
