//! Authentication Context
//!
//! Session state provided via Leptos Context API. Holds only whether a valid
//! credential is believed to exist; the token itself lives in the
//! credential store.

use leptos::prelude::*;

use crate::api::{self, ApiClient};
use crate::error::ApiResult;
use crate::models::RegisterRequest;

/// Session signals plus the operations that change them
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Whether requests are expected to carry a valid credential - read.
    /// Not meaningful while `verifying` is true.
    pub authenticated: ReadSignal<bool>,
    set_authenticated: WriteSignal<bool>,
    /// True until the start-up verification has resolved - read
    pub verifying: ReadSignal<bool>,
    set_verifying: WriteSignal<bool>,
    client: StoredValue<ApiClient>,
}

impl AuthContext {
    /// Seed `authenticated` optimistically from credential presence
    pub fn new(client: ApiClient) -> Self {
        let has_credential = client.credentials().is_present();
        let (authenticated, set_authenticated) = signal(has_credential);
        let (verifying, set_verifying) = signal(true);
        Self {
            authenticated,
            set_authenticated,
            verifying,
            set_verifying,
            client: StoredValue::new(client),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Check the stored credential against the backend, once per page load.
    /// Later calls return immediately.
    pub async fn verify_session(&self) {
        if !self.verifying.get_untracked() {
            return;
        }
        let client = self.client();

        if !client.credentials().is_present() {
            log::debug!("[AUTH] no stored credential");
            self.set_authenticated.set(false);
            self.set_verifying.set(false);
            return;
        }

        match api::verify_token(&client).await {
            Ok(()) => {
                log::info!("[AUTH] stored credential verified");
                self.set_authenticated.set(true);
            }
            Err(e) => {
                log::info!("[AUTH] stored credential rejected: {}", e);
                client.credentials().clear();
                self.set_authenticated.set(false);
            }
        }
        self.set_verifying.set(false);
    }

    /// Exchange username/password for a token. State is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let client = self.client();
        let token = api::fetch_token(&client, username, password).await?;
        client.credentials().set(&token.access_token);
        self.set_authenticated.set(true);
        log::info!("[AUTH] logged in as {}", username);
        Ok(())
    }

    /// Register, then log in with the same credentials. A login failure after
    /// a successful registration is returned as-is; registration is not
    /// repeated.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<()> {
        let client = self.client();
        api::register_user(&client, &RegisterRequest { username, email, password }).await?;
        log::info!("[AUTH] registered {}", username);
        self.login(username, password).await
    }

    pub fn logout(&self) {
        self.client().credentials().clear();
        self.set_authenticated.set(false);
        log::info!("[AUTH] logged out");
    }
}

/// Get the auth context provided by `App`
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CredentialStore, Method};
    use crate::error::ApiError;
    use crate::testing::{test_client, FakeBackend};

    #[tokio::test]
    async fn test_start_without_credential_makes_no_request() {
        let backend = FakeBackend::new();
        let (client, _creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);

        assert!(auth.verifying.get_untracked());
        assert!(!auth.authenticated.get_untracked());

        auth.verify_session().await;

        assert!(!auth.verifying.get_untracked());
        assert!(!auth.authenticated.get_untracked());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_valid_credential_verified() {
        let backend = FakeBackend::new();
        let (client, creds, _nav) = test_client(&backend, Some("good"));
        let auth = AuthContext::new(client);
        assert!(auth.authenticated.get_untracked());

        auth.verify_session().await;

        assert!(auth.authenticated.get_untracked());
        assert!(!auth.verifying.get_untracked());
        assert_eq!(creds.get(), Some("good".to_string()));
        assert_eq!(backend.count(Method::Get, "/auth/verify"), 1);
    }

    #[tokio::test]
    async fn test_rejected_credential_cleared() {
        let backend = FakeBackend::new();
        let (client, creds, _nav) = test_client(&backend, Some("expired"));
        backend.revoke_tokens();
        let auth = AuthContext::new(client);

        auth.verify_session().await;

        assert!(!auth.authenticated.get_untracked());
        assert!(!auth.verifying.get_untracked());
        assert_eq!(creds.get(), None);
    }

    #[tokio::test]
    async fn test_verification_runs_once() {
        let backend = FakeBackend::new();
        let (client, _creds, _nav) = test_client(&backend, Some("good"));
        let auth = AuthContext::new(client);

        auth.verify_session().await;
        auth.verify_session().await;

        assert_eq!(backend.count(Method::Get, "/auth/verify"), 1);
    }

    #[tokio::test]
    async fn test_verify_network_failure_logs_out() {
        let backend = FakeBackend::new();
        backend.disconnect_next();
        let (client, creds, nav) = test_client(&backend, Some("good"));
        let auth = AuthContext::new(client);

        auth.verify_session().await;

        assert!(!auth.authenticated.get_untracked());
        assert_eq!(creds.get(), None);
        assert_eq!(nav.redirects(), 0);
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let backend = FakeBackend::new();
        backend.add_user("alice", "password1");
        let (client, creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);
        auth.verify_session().await;

        auth.login("alice", "password1").await.unwrap();

        assert!(auth.authenticated.get_untracked());
        assert_eq!(creds.get(), Some("token-alice-1".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state() {
        let backend = FakeBackend::new();
        backend.add_user("alice", "password1");
        let (client, creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);
        auth.verify_session().await;

        let err = auth.login("alice", "wrong").await.unwrap_err();

        assert_eq!(err.user_message(), "Incorrect username or password");
        assert!(!auth.authenticated.get_untracked());
        assert_eq!(creds.get(), None);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let backend = FakeBackend::new();
        let (client, creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);
        auth.verify_session().await;

        auth.register("bob", "bob@example.com", "password1").await.unwrap();

        assert!(auth.authenticated.get_untracked());
        assert!(creds.get().is_some());
        assert_eq!(backend.count(Method::Post, "/auth/register"), 1);
        assert_eq!(backend.count(Method::Post, "/auth/token"), 1);
    }

    #[tokio::test]
    async fn test_register_ok_login_rejected() {
        let backend = FakeBackend::new();
        backend.fail_on(Method::Post, "/auth/token", 401);
        let (client, creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);
        auth.verify_session().await;

        let err = auth.register("bob", "bob@example.com", "password1").await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(!auth.authenticated.get_untracked());
        assert_eq!(creds.get(), None);
        assert_eq!(backend.count(Method::Post, "/auth/register"), 1);
        assert_eq!(backend.count(Method::Post, "/auth/token"), 1);
    }

    #[tokio::test]
    async fn test_register_failure_skips_login() {
        let backend = FakeBackend::new();
        backend.add_user("bob", "password1");
        let (client, _creds, _nav) = test_client(&backend, None);
        let auth = AuthContext::new(client);

        let err = auth.register("bob", "bob@example.com", "password1").await.unwrap_err();

        assert_eq!(err.user_message(), "Username already registered");
        assert_eq!(backend.count(Method::Post, "/auth/token"), 0);
    }

    #[tokio::test]
    async fn test_logout_then_restart_is_offline() {
        let backend = FakeBackend::new();
        let (client, creds, _nav) = test_client(&backend, Some("good"));
        let auth = AuthContext::new(client.clone());
        auth.verify_session().await;

        auth.logout();
        assert!(!auth.authenticated.get_untracked());
        assert_eq!(creds.get(), None);

        // Simulated reload: fresh context over the same credential store
        let sent_before = backend.requests().len();
        let reloaded = AuthContext::new(client);
        reloaded.verify_session().await;

        assert!(!reloaded.authenticated.get_untracked());
        assert_eq!(backend.requests().len(), sent_before);
    }
}
