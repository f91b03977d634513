//! Route and capability guards.
//!
//! Pure functions of the last settled [`SessionState`] plus inputs.
//! Rendering a guard multiple times during a pending transition is
//! safe; decisions only ever reflect settled state.

use hms_authz::allows;

use crate::model::UserType;
use crate::session::SessionState;

/// Route of the password-change flow, the target of the must-reset
/// redirect.
pub const PASSWORD_CHANGE_PATH: &str = "/password/change";

/// Workspace a screen belongs to. `Platform` and `Admin` are distinct
/// labels for the same check: both are satisfied by the admin user
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workspace {
    Platform,
    Admin,
    Hotel,
}

impl Workspace {
    fn accepts(self, user_type: UserType) -> bool {
        match self {
            Workspace::Platform | Workspace::Admin => user_type == UserType::Admin,
            Workspace::Hotel => user_type == UserType::Hotel,
        }
    }
}

/// What a guard decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected content.
    Render,
    /// Render the supplied fallback (default: nothing). Permission
    /// denial is routine, not an error.
    Fallback,
    /// Navigate away; suppress content until navigation completes.
    Redirect(&'static str),
    /// Session state is still unknown. Render nothing; never guess.
    Pending,
}

/// Render protected content iff the session's grants satisfy
/// `required`.
pub fn permission_guard(state: &SessionState, required: &str) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Pending,
        SessionState::Anonymous => GuardDecision::Fallback,
        SessionState::Authenticated(session) => {
            if allows(&session.permissions, required) {
                GuardDecision::Render
            } else {
                GuardDecision::Fallback
            }
        }
    }
}

/// Render content iff the session's user type matches the workspace.
///
/// A must-reset session is redirected to the password-change flow
/// before any type match is evaluated, so no protected content can
/// flash before navigation.
pub fn workspace_guard(state: &SessionState, workspace: Workspace) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Pending,
        SessionState::Anonymous => GuardDecision::Fallback,
        SessionState::Authenticated(session) => {
            if session.must_reset_password {
                return GuardDecision::Redirect(PASSWORD_CHANGE_PATH);
            }
            if workspace.accepts(session.user.user_type) {
                GuardDecision::Render
            } else {
                GuardDecision::Fallback
            }
        }
    }
}

/// Guard for the password-change screen itself: the one screen a
/// must-reset session may use.
pub fn password_change_guard(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Pending,
        SessionState::Anonymous => GuardDecision::Fallback,
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserIdentity;
    use crate::session::Session;

    fn authed(user_type: UserType, permissions: &[&str], must_reset: bool) -> SessionState {
        SessionState::Authenticated(Session {
            user: UserIdentity {
                id: "u1".to_string(),
                email: "user@example.com".to_string(),
                first_name: None,
                last_name: None,
                user_type,
                tenant_id: None,
                roles: vec![],
            },
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            tenant: None,
            impersonation: None,
            must_reset_password: must_reset,
        })
    }

    #[test]
    fn test_permission_guard_unknown_renders_nothing() {
        assert_eq!(
            permission_guard(&SessionState::Unknown, "admin:hotels:read"),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_permission_guard_allows_and_denies() {
        let state = authed(UserType::Admin, &["admin:hotels:*"], false);
        assert_eq!(permission_guard(&state, "admin:hotels:read"), GuardDecision::Render);
        assert_eq!(permission_guard(&state, "admin:users:read"), GuardDecision::Fallback);
        assert_eq!(
            permission_guard(&SessionState::Anonymous, "admin:hotels:read"),
            GuardDecision::Fallback
        );
    }

    #[test]
    fn test_workspace_guard_type_match() {
        let admin = authed(UserType::Admin, &[], false);
        let hotel = authed(UserType::Hotel, &[], false);

        assert_eq!(workspace_guard(&admin, Workspace::Admin), GuardDecision::Render);
        assert_eq!(workspace_guard(&admin, Workspace::Platform), GuardDecision::Render);
        assert_eq!(workspace_guard(&admin, Workspace::Hotel), GuardDecision::Fallback);
        assert_eq!(workspace_guard(&hotel, Workspace::Hotel), GuardDecision::Render);
        assert_eq!(workspace_guard(&hotel, Workspace::Admin), GuardDecision::Fallback);
        assert_eq!(workspace_guard(&hotel, Workspace::Platform), GuardDecision::Fallback);
    }

    #[test]
    fn test_workspace_guard_must_reset_redirects_before_type_match() {
        let state = authed(UserType::Hotel, &["hotel:rooms:read"], true);
        // Even a workspace the user does not belong to redirects rather
        // than falling back.
        assert_eq!(
            workspace_guard(&state, Workspace::Admin),
            GuardDecision::Redirect(PASSWORD_CHANGE_PATH)
        );
        assert_eq!(
            workspace_guard(&state, Workspace::Hotel),
            GuardDecision::Redirect(PASSWORD_CHANGE_PATH)
        );
    }

    #[test]
    fn test_password_change_screen_exempt_from_must_reset() {
        let state = authed(UserType::Hotel, &[], true);
        assert_eq!(password_change_guard(&state), GuardDecision::Render);
        assert_eq!(password_change_guard(&SessionState::Anonymous), GuardDecision::Fallback);
        assert_eq!(password_change_guard(&SessionState::Unknown), GuardDecision::Pending);
    }
}
