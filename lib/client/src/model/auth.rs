use serde::{Deserialize, Serialize};

/// Which portal a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Platform administrator (admin portal).
    Admin,
    /// Hotel staff (per-hotel portal).
    Hotel,
}

/// The authenticated user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    pub user_type: UserType,

    /// Owning tenant, present for hotel-scoped users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Assigned role names.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserIdentity {
    /// `first last`, falling back to the email address.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() { self.email.clone() } else { name }
    }
}

/// The tenant the current session is scoped to. Absent for
/// platform-admin sessions that are not impersonating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantContext {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Impersonation overlay. When `active`, the session's identity and
/// permissions were derived from an impersonated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpersonationState {
    pub active: bool,

    pub tenant_id: String,

    pub tenant_name: String,

    pub session_id: String,

    /// RFC 3339 timestamp when impersonation started.
    pub started_at: String,

    /// The originating platform admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_user_id: Option<String>,

    /// The impersonated user, when a specific target was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user_id: Option<String>,
}

/// The auth response envelope shared by login/me/refresh/impersonation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserIdentity,

    pub permissions: Vec<String>,

    #[serde(default)]
    pub tenant: Option<TenantContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonation: Option<ImpersonationState>,

    /// Session is valid but restricted until a password change
    /// succeeds.
    #[serde(default)]
    pub must_reset_password: bool,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/impersonation/start`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImpersonationStartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request body for `POST /auth/password/change`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response body for `POST /auth/password/change`.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChangeResponse {
    #[serde(default)]
    pub message: String,
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_minimal_payload() {
        let json = serde_json::json!({
            "user": {
                "id": "u1",
                "email": "admin@example.com",
                "user_type": "admin",
                "roles": ["platform-admin"],
            },
            "permissions": ["*"],
            "tenant": null,
        });
        let resp: AuthResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.user.user_type, UserType::Admin);
        assert!(resp.tenant.is_none());
        assert!(resp.impersonation.is_none());
        assert!(!resp.must_reset_password);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = UserIdentity {
            id: "u1".to_string(),
            email: "staff@grand.example".to_string(),
            first_name: None,
            last_name: None,
            user_type: UserType::Hotel,
            tenant_id: Some("t1".to_string()),
            roles: vec![],
        };
        assert_eq!(user.display_name(), "staff@grand.example");

        user.first_name = Some("Ada".to_string());
        user.last_name = Some("Day".to_string());
        assert_eq!(user.display_name(), "Ada Day");
    }

    #[test]
    fn test_impersonation_request_skips_absent_fields() {
        let req = ImpersonationStartRequest {
            tenant_id: Some("t1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"tenant_id": "t1"}));
    }
}
