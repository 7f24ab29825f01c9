use reqwest::StatusCode;
use tracing::{info, instrument};

use crate::harness::client::{endpoints, ApiClient, ApiResponse};
use crate::harness::dto::{
    AuthEnvelope, LoginRequest, RegisterUserRequest, SessionHandle, TestUserContext, UserRecord,
};
use crate::harness::error::{HarnessError, Result};
use crate::harness::fixtures::generate_unique_user_data;
use crate::harness::status::{expect_status_in, LOGOUT_ACCEPTED};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserRecord,
    pub session: SessionHandle,
    pub response: ApiResponse,
}

/// Pulls the `session` cookie out of a login response.
pub fn extract_session(response: &ApiResponse) -> Result<SessionHandle> {
    response
        .cookie("session")
        .filter(|token| !token.is_empty())
        .map(SessionHandle::from_token)
        .ok_or(HarnessError::MissingSessionCookie)
}

impl ApiClient {
    /// Registers `user_data` and returns the created user. Any status other
    /// than 200, or a user whose email differs from the request, is an error.
    #[instrument(skip(self, user_data), fields(email = %user_data.email))]
    pub async fn register(&self, user_data: &RegisterUserRequest) -> Result<UserRecord> {
        const OP: &str = "register";
        let response = self
            .post(endpoints::REGISTER, None, Some(user_data))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        let user = response
            .decode::<AuthEnvelope>("register response")?
            .user
            .ok_or(HarnessError::MissingField {
                operation: OP,
                field: "user",
            })?;
        if user.email != user_data.email {
            return Err(HarnessError::Mismatch {
                operation: OP,
                field: "email",
                expected: user_data.email.clone(),
                actual: user.email,
            });
        }
        info!(user_id = user.id, "registered");
        Ok(user)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginOutcome> {
        const OP: &str = "login";
        let response = self
            .post(endpoints::LOGIN, None, Some(credentials))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        let user = response
            .decode::<AuthEnvelope>("login response")?
            .user
            .ok_or(HarnessError::MissingField {
                operation: OP,
                field: "user",
            })?;
        let session = extract_session(&response)?;
        info!(user_id = user.id, "logged in");
        Ok(LoginOutcome {
            user,
            session,
            response,
        })
    }

    /// Fresh user, registered and logged in.
    pub async fn create_authenticated_context(&self) -> Result<TestUserContext> {
        let user_data = generate_unique_user_data();
        let user = self.register(&user_data).await?;
        let login_data = user_data.login_request();
        let LoginOutcome { session, .. } = self.login(&login_data).await?;
        Ok(TestUserContext {
            user_data,
            login_data,
            session,
            user,
        })
    }

    /// Logs the session out. 200 and 302 both count as acknowledged; whether
    /// the server really dropped the session is left to the caller.
    #[instrument(skip(self, session))]
    pub async fn logout(&self, session: &SessionHandle) -> Result<()> {
        let response = self
            .post::<()>(endpoints::LOGOUT, Some(session), None)
            .await?;
        expect_status_in(&response, LOGOUT_ACCEPTED)
    }
}
