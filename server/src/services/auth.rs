//! Demo login. A fixed campus address per role and any non-empty password
//! grants access; nothing here is a security boundary.

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{LoginOutcome, LoginRequest, Role, Session};
use crate::store::{keys, KeyValueStore, StoreError};
use crate::utils::AppError;

pub const LOGIN_ROUTE: &str = "/login";
pub const SOCIETY_LOGIN_ROUTE: &str = "/login?role=society";

fn expected_email(config: &Config, role: Role) -> &str {
    match role {
        Role::Student => &config.student_email,
        Role::Society => &config.society_email,
    }
}

pub async fn login(
    store: &dyn KeyValueStore,
    config: &Config,
    request: LoginRequest,
) -> Result<LoginOutcome, AppError> {
    let expected = expected_email(config, request.role);
    let email = request.email.trim().to_lowercase();

    if email != expected.trim().to_lowercase() {
        warn!(role = %request.role, "Demo login rejected for unknown email");
        return Err(AppError::AuthError(format!(
            "Use the assigned {} email {}.",
            request.role, expected
        )));
    }

    if request.password.trim().is_empty() {
        return Err(AppError::validation(
            "Password required",
            "Any password works here; enter one to continue.",
        ));
    }

    let token = Uuid::new_v4().to_string();
    store.set(keys::AUTH_ROLE, request.role.as_str()).await?;
    store.set(keys::AUTH_TOKEN, &token).await?;

    let code_noted = request
        .code
        .as_deref()
        .is_some_and(|code| !code.trim().is_empty());
    info!(role = %request.role, code_noted, "Demo login accepted");

    Ok(LoginOutcome {
        role: request.role,
        token,
        redirect_to: request.role.landing_route(),
    })
}

pub async fn logout(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(keys::AUTH_TOKEN).await?;
    store.remove(keys::AUTH_ROLE).await
}

/// Reads the stored login. Unreadable state counts as logged out.
pub async fn current_session(store: &dyn KeyValueStore) -> Session {
    let token = store.get(keys::AUTH_TOKEN).await.unwrap_or_else(|e| {
        warn!(error = ?e, "Failed to read auth token");
        None
    });
    let role = store
        .get(keys::AUTH_ROLE)
        .await
        .ok()
        .flatten()
        .and_then(|raw| raw.parse::<Role>().ok());

    Session {
        authenticated: token.is_some_and(|t| !t.is_empty()),
        role,
    }
}

/// Route the society workspace guard sends a visitor to, if any.
pub fn society_redirect(session: &Session) -> Option<&'static str> {
    if !session.authenticated {
        Some(LOGIN_ROUTE)
    } else if session.role != Some(Role::Society) {
        Some(SOCIETY_LOGIN_ROUTE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn request(role: Role, email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            role,
            email: email.to_string(),
            password: password.to_string(),
            code: None,
        }
    }

    #[tokio::test]
    async fn test_society_login_stores_role_and_token() {
        let store = InMemoryStore::new();
        let config = Config::default();

        let outcome = login(&store, &config, request(Role::Society, " USC@kiit.ac.in ", "x"))
            .await
            .unwrap();
        assert_eq!(outcome.redirect_to, "/manage-events");

        let session = current_session(&store).await;
        assert!(session.authenticated);
        assert_eq!(session.role, Some(Role::Society));
        assert_eq!(society_redirect(&session), None);
    }

    #[tokio::test]
    async fn test_wrong_email_and_blank_password_are_rejected() {
        let store = InMemoryStore::new();
        let config = Config::default();

        let wrong = login(&store, &config, request(Role::Student, "me@elsewhere.edu", "pw")).await;
        assert!(matches!(wrong, Err(AppError::AuthError(_))));

        let blank = login(&store, &config, request(Role::Student, "23052873@kiit.ac.in", "   ")).await;
        assert!(matches!(blank, Err(AppError::ValidationError { .. })));

        assert!(!current_session(&store).await.authenticated);
    }

    #[tokio::test]
    async fn test_guard_redirects() {
        let store = InMemoryStore::new();
        let config = Config::default();

        assert_eq!(society_redirect(&current_session(&store).await), Some(LOGIN_ROUTE));

        login(&store, &config, request(Role::Student, "23052873@kiit.ac.in", "pw"))
            .await
            .unwrap();
        assert_eq!(
            society_redirect(&current_session(&store).await),
            Some(SOCIETY_LOGIN_ROUTE)
        );

        logout(&store).await.unwrap();
        let session = current_session(&store).await;
        assert!(!session.authenticated);
        assert!(session.role.is_none());
    }
}
