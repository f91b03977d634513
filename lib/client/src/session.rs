//! Session context: who is logged in, as what tenant, with what
//! permissions.
//!
//! All auth-affecting state lives in one [`Session`] value that is
//! replaced atomically from each server response — a reader can never
//! observe a user from one response paired with permissions from
//! another. Transitions are serialized: a transition holds a mutex
//! across its network call, so no two auth-mutating calls are ever in
//! flight for the same context.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::model::{
    AuthResponse, ImpersonationStartRequest, ImpersonationState, LoginRequest, LogoutResponse,
    PasswordChangeRequest, PasswordChangeResponse, TenantContext, UserIdentity,
};
use crate::transport::Transport;

/// The atomically-replaced unit of session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserIdentity,
    pub permissions: Vec<String>,
    pub tenant: Option<TenantContext>,
    pub impersonation: Option<ImpersonationState>,
    pub must_reset_password: bool,
}

impl Session {
    pub fn is_impersonating(&self) -> bool {
        self.impersonation.as_ref().is_some_and(|i| i.active)
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user: resp.user,
            permissions: resp.permissions,
            tenant: resp.tenant,
            impersonation: resp.impersonation,
            must_reset_password: resp.must_reset_password,
        }
    }
}

/// Top-level session state. `Unknown` until bootstrap settles.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Granted permission codes; empty unless authenticated.
    pub fn permissions(&self) -> &[String] {
        self.session().map(|s| s.permissions.as_slice()).unwrap_or(&[])
    }
}

/// Owns the session state machine and its transition API.
///
/// Read access is broad (any holder can [`state`](Self::state));
/// mutation happens only through the transition methods.
pub struct SessionContext {
    transport: Arc<Transport>,
    state: RwLock<SessionState>,
    /// Serializes transitions; held across the network await.
    transition: Mutex<()>,
}

impl SessionContext {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            state: RwLock::new(SessionState::Unknown),
            transition: Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Snapshot of the last *settled* state. Never reflects a
    /// transition that is still in flight.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    async fn apply(&self, resp: AuthResponse) -> Session {
        let session = Session::from(resp);
        *self.state.write().await = SessionState::Authenticated(session.clone());
        session
    }

    /// Establish the initial state on first load.
    ///
    /// Tries `GET /auth/me`; on any failure falls back to
    /// `POST /auth/refresh`; if that also fails the state settles as
    /// `Anonymous`. Exactly one terminal outcome is published; nothing
    /// is observable mid-sequence.
    pub async fn bootstrap(&self) -> SessionState {
        let _guard = self.transition.lock().await;

        match self.transport.get::<AuthResponse>("/auth/me").await {
            Ok(me) => {
                debug!(user = %me.user.id, "bootstrap: session restored");
                self.apply(me).await;
            }
            Err(me_err) => {
                debug!(error = %me_err, "bootstrap: /auth/me failed, trying refresh");
                match self.transport.post_empty::<AuthResponse>("/auth/refresh").await {
                    Ok(refreshed) => {
                        debug!(user = %refreshed.user.id, "bootstrap: refresh succeeded");
                        self.apply(refreshed).await;
                    }
                    Err(refresh_err) => {
                        debug!(error = %refresh_err, "bootstrap: refresh failed, anonymous");
                        *self.state.write().await = SessionState::Anonymous;
                    }
                }
            }
        }

        self.state().await
    }

    /// Authenticate with credentials. On failure the state is
    /// unchanged and the error is surfaced; nothing is retried.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let _guard = self.transition.lock().await;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self.transport.post("/auth/login", &body).await?;
        Ok(self.apply(resp).await)
    }

    /// End the session.
    ///
    /// Local state is cleared unconditionally, whatever the server-side
    /// call reports; a transport failure is still returned afterwards.
    /// The residual risk is a server session that outlives a client
    /// that believes it is logged out.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _guard = self.transition.lock().await;
        let result = self.transport.post_empty::<LogoutResponse>("/auth/logout").await;
        *self.state.write().await = SessionState::Anonymous;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(error = %err, "server-side logout failed; local session cleared anyway");
                Err(err)
            }
        }
    }

    /// Re-sync from a fresh server response.
    pub async fn refresh(&self) -> Result<Session, ApiError> {
        let _guard = self.transition.lock().await;
        let resp: AuthResponse = self.transport.post_empty("/auth/refresh").await?;
        Ok(self.apply(resp).await)
    }

    /// Assume a tenant user's identity and permission set.
    pub async fn start_impersonation(
        &self,
        req: &ImpersonationStartRequest,
    ) -> Result<Session, ApiError> {
        let _guard = self.transition.lock().await;
        let resp: AuthResponse = self.transport.post("/auth/impersonation/start", req).await?;
        Ok(self.apply(resp).await)
    }

    /// Restore the original admin identity.
    pub async fn stop_impersonation(&self) -> Result<Session, ApiError> {
        let _guard = self.transition.lock().await;
        let resp: AuthResponse = self.transport.post_empty("/auth/impersonation/stop").await?;
        Ok(self.apply(resp).await)
    }

    /// Change the password. On success the must-reset restriction is
    /// lifted in place — guards resume normal evaluation without a
    /// full bootstrap.
    pub async fn change_password(
        &self,
        req: &PasswordChangeRequest,
    ) -> Result<PasswordChangeResponse, ApiError> {
        let _guard = self.transition.lock().await;
        let resp: PasswordChangeResponse =
            self.transport.post("/auth/password/change", req).await?;

        let mut state = self.state.write().await;
        if let SessionState::Authenticated(session) = &mut *state {
            session.must_reset_password = false;
        }

        Ok(resp)
    }
}
