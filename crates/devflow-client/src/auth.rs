//! Authentication endpoints and session lifecycle

use devflow::domain::{Session, User};
use serde::{Deserialize, Serialize};

use crate::client::{DevFlowClient, LOGIN_PATH};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// `{success, message, user}` acknowledgement from the auth endpoints
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl DevFlowClient {
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    /// Authenticate; 401/403 here surfaces as [`ApiError::BadCredentials`]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json(LOGIN_PATH, request).await
    }

    /// Fetch the account behind the current request identity
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me", &[]).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_unit("/auth/logout").await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<AuthResponse, ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.post_json("/auth/forgot-password", &request).await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.post_json("/auth/reset-password", &request).await
    }

    /// Log in and overwrite the session with the returned identity
    pub async fn login_session(
        &self,
        request: &LoginRequest,
        session: &mut Session,
    ) -> Result<User, ApiError> {
        let response = self.login(request).await?;
        let user = response.user.ok_or_else(|| {
            ApiError::InvalidResponse("login response carried no user".to_string())
        })?;

        session.login(
            user.id.clone(),
            user.username.clone(),
            user.email.clone().unwrap_or_default(),
            user.role,
            user.project_ids.clone(),
        );
        Ok(user)
    }

    /// Log out, clearing the session only when the backend call succeeds
    ///
    /// A failed call leaves the session intact and returns the error;
    /// callers wanting a forced local clear use [`Session::clear`].
    pub async fn logout_session(&self, session: &mut Session) -> Result<(), ApiError> {
        self.logout().await?;
        session.clear();
        Ok(())
    }
}
