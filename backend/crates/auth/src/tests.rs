//! Flow tests for the auth crate
//! Service-level behavior over both stores, failure classification, HTTP mapping.

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::{AuthConfig, AuthService, LoginInput, RegisterInput};
    use crate::domain::entity::account::Account;
    use crate::domain::repository::AccountStore;
    use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
    use crate::error::{StoreError, StoreResult};
    use crate::infra::{MemoryAccountStore, SqliteAccountStore, StoreConfig};

    pub fn register_input(username: &str, password: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn login_input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn memory_service() -> AuthService<MemoryAccountStore> {
        AuthService::new(
            Arc::new(MemoryAccountStore::new()),
            Arc::new(AuthConfig::testing()),
        )
    }

    pub async fn sqlite_service() -> AuthService<SqliteAccountStore> {
        let store = SqliteAccountStore::connect(&StoreConfig::in_memory())
            .await
            .unwrap();
        store.ensure_schema().await.unwrap();
        AuthService::new(Arc::new(store), Arc::new(AuthConfig::testing()))
    }

    /// Store whose every operation fails like an unreachable database
    #[derive(Default)]
    pub struct FailingStore;

    impl AccountStore for FailingStore {
        async fn create(
            &self,
            _user_name: &UserName,
            _password_hash: &UserPassword,
        ) -> StoreResult<Account> {
            Err(StoreError::Timeout(Duration::from_millis(10)))
        }

        async fn find_by_username(&self, _user_name: &UserName) -> StoreResult<Option<Account>> {
            Err(StoreError::Storage(sqlx::Error::PoolTimedOut))
        }
    }

    pub fn failing_service() -> AuthService<FailingStore> {
        AuthService::new(Arc::new(FailingStore), Arc::new(AuthConfig::testing()))
    }
}

#[cfg(test)]
mod memory_flow_tests {
    use super::support::*;
    use crate::domain::repository::AccountStore;
    use crate::domain::value_object::user_name::UserName;
    use crate::error::AuthError;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_register_then_login_returns_same_id() {
        let service = memory_service();

        let registered = assert_ok!(service.register(register_input("alice", "s3cret")).await);
        let logged_in = assert_ok!(service.login(login_input("alice", "s3cret")).await);

        assert_eq!(registered.account_id, logged_in.account_id);
        assert_eq!(logged_in.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_alice_and_bob_scenario() {
        let service = memory_service();

        let alice = assert_ok!(service.register(register_input("alice", "pw1")).await);
        assert_eq!(alice.account_id.get(), 1);

        let err = assert_err!(service.register(register_input("alice", "other")).await);
        assert!(matches!(err, AuthError::UsernameTaken));

        let err = assert_err!(service.login(login_input("alice", "pw2")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = assert_err!(service.login(login_input("bob", "pw1")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let login = assert_ok!(service.login(login_input("alice", "pw1")).await);
        assert_eq!(login.account_id.get(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_register_keeps_original_hash() {
        let service = memory_service();
        assert_ok!(service.register(register_input("alice", "first")).await);

        let name = UserName::new("alice").unwrap();
        let before = service.store().find_by_username(&name).await.unwrap().unwrap();

        let err = assert_err!(service.register(register_input("alice", "second")).await);
        assert!(matches!(err, AuthError::UsernameTaken));

        let after = service.store().find_by_username(&name).await.unwrap().unwrap();
        assert_eq!(before.password_hash, after.password_hash);
        assert_eq!(before.account_id, after.account_id);

        assert_ok!(service.login(login_input("alice", "first")).await);
        assert_err!(service.login(login_input("alice", "second")).await);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let service = memory_service();
        assert_ok!(service.register(register_input("alice", "s3cret")).await);

        let wrong_password = assert_err!(service.login(login_input("alice", "nope")).await);
        let unknown_user = assert_err!(service.login(login_input("mallory", "s3cret")).await);

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password.status_code(), unknown_user.status_code());
    }

    #[tokio::test]
    async fn test_empty_fields_do_not_touch_storage() {
        let service = memory_service();

        for (username, password) in [("", "s3cret"), ("alice", ""), ("", "")] {
            let err = assert_err!(service.register(register_input(username, password)).await);
            assert!(matches!(err, AuthError::InvalidInput));

            let err = assert_err!(service.login(login_input(username, password)).await);
            assert!(matches!(err, AuthError::InvalidInput));
        }

        assert!(service.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_usernames_are_exact() {
        let service = memory_service();
        assert_ok!(service.register(register_input("alice", "s3cret")).await);

        let err = assert_err!(service.login(login_input("Alice", "s3cret")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = assert_err!(service.login(login_input(" alice", "s3cret")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let other = assert_ok!(service.register(register_input("Alice", "s3cret")).await);
        assert_eq!(other.account_id.get(), 2);
    }

    #[tokio::test]
    async fn test_lookalike_password_is_rejected() {
        let service = memory_service();
        assert_ok!(service.register(register_input("alice", "fish")).await);

        // U+FB01 is the "fi" ligature
        let err = assert_err!(service.login(login_input("alice", "\u{FB01}sh")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = assert_err!(service.login(login_input("alice", "fish ")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        assert_ok!(service.login(login_input("alice", "fish")).await);
    }

    #[tokio::test]
    async fn test_warm_up_is_repeatable() {
        let service = memory_service();
        assert_ok!(service.warm_up().await);
        assert_ok!(service.warm_up().await);

        let err = assert_err!(service.login(login_input("nobody", "x")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_success() {
        let service = memory_service();

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .register(register_input("alice", &format!("pw-{i}")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AuthError::UsernameTaken) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(service.store().len().await, 1);
    }
}

#[cfg(test)]
mod sqlite_flow_tests {
    use super::support::*;
    use crate::error::AuthError;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_alice_and_bob_scenario() {
        let service = sqlite_service().await;

        let alice = assert_ok!(service.register(register_input("alice", "pw1")).await);
        assert_eq!(alice.account_id.get(), 1);

        let err = assert_err!(service.register(register_input("alice", "other")).await);
        assert!(matches!(err, AuthError::UsernameTaken));

        let err = assert_err!(service.login(login_input("alice", "pw2")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = assert_err!(service.login(login_input("bob", "pw1")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let login = assert_ok!(service.login(login_input("alice", "pw1")).await);
        assert_eq!(login.account_id, alice.account_id);
    }

    #[tokio::test]
    async fn test_schema_reinitialization_keeps_accounts() {
        let service = sqlite_service().await;
        let alice = assert_ok!(service.register(register_input("alice", "s3cret")).await);

        assert_ok!(service.store().ensure_schema().await);

        let login = assert_ok!(service.login(login_input("alice", "s3cret")).await);
        assert_eq!(login.account_id, alice.account_id);

        let bob = assert_ok!(service.register(register_input("bob", "pw")).await);
        assert_eq!(bob.account_id.get(), 2);
    }

    #[tokio::test]
    async fn test_closed_database_is_internal_error() {
        let service = sqlite_service().await;
        service.store().close().await;

        let err = assert_err!(service.register(register_input("alice", "s3cret")).await);
        assert!(matches!(err, AuthError::Internal(_)));

        let err = assert_err!(service.login(login_input("alice", "s3cret")).await);
        assert!(matches!(err, AuthError::Internal(_)));
    }
}

#[cfg(test)]
mod failure_tests {
    use super::support::*;
    use crate::error::AuthError;
    use axum::http::StatusCode;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let service = failing_service();

        let err = assert_err!(service.register(register_input("alice", "s3cret")).await);
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = assert_err!(service.login(login_input("alice", "s3cret")).await);
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_checked_before_storage() {
        let service = failing_service();

        let err = assert_err!(service.register(register_input("", "s3cret")).await);
        assert!(matches!(err, AuthError::InvalidInput));

        let err = assert_err!(service.login(login_input("alice", "")).await);
        assert!(matches!(err, AuthError::InvalidInput));
    }
}

#[cfg(test)]
mod pepper_tests {
    use super::support::*;
    use crate::application::{AuthConfig, AuthService};
    use crate::error::AuthError;
    use crate::infra::MemoryAccountStore;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_pepper_must_match() {
        let store = Arc::new(MemoryAccountStore::new());
        let peppered = AuthService::new(
            store.clone(),
            Arc::new(AuthConfig::testing().with_pepper(b"server-secret".to_vec())),
        );
        let plain = AuthService::new(store.clone(), Arc::new(AuthConfig::testing()));

        assert_ok!(peppered.register(register_input("alice", "s3cret")).await);
        assert_ok!(peppered.login(login_input("alice", "s3cret")).await);

        let err = assert_err!(plain.login(login_input("alice", "s3cret")).await);
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use crate::presentation::dto::{AuthResponse, UserSummary};
    use crate::presentation::router::auth_router;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, AuthResponse) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_register_and_login_bodies() {
        let router = auth_router(memory_service());

        let (status, body) = post(
            &router,
            "/register",
            r#"{"username":"alice","password":"s3cret"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.message, "User registered successfully");
        assert_eq!(
            body.user,
            Some(UserSummary {
                id: 1,
                username: "alice".into()
            })
        );

        let (status, body) =
            post(&router, "/login", r#"{"username":"alice","password":"s3cret"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.message, "Login successful");
        assert_eq!(body.user.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let router = auth_router(memory_service());
        post(
            &router,
            "/register",
            r#"{"username":"alice","password":"s3cret"}"#,
        )
        .await;

        let (status, body) = post(
            &router,
            "/register",
            r#"{"username":"alice","password":"other"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.message, "Username already exists");

        let (status, body) =
            post(&router, "/login", r#"{"username":"alice","password":"nope"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Invalid username or password");
        assert!(body.user.is_none());

        let (status, body) =
            post(&router, "/login", r#"{"username":"bob","password":"s3cret"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Invalid username or password");
    }

    #[tokio::test]
    async fn test_missing_input() {
        let router = auth_router(memory_service());

        for body in [
            r#"{"username":"alice"}"#,
            r#"{"password":"s3cret"}"#,
            r#"{"username":"","password":""}"#,
            "not json",
        ] {
            let (status, response) = post(&router, "/register", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response.message, "Missing username or password");
        }

        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .body(Body::from(r#"{"username":"alice","password":"s3cret"}"#))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internal_errors_hide_detail() {
        let router = auth_router(failing_service());

        let (status, body) = post(
            &router,
            "/register",
            r#"{"username":"alice","password":"s3cret"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error processing registration");

        let (status, body) =
            post(&router, "/login", r#"{"username":"alice","password":"s3cret"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error during login");
    }
}

#[cfg(test)]
mod span_tests {
    use super::support::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tokio_test::{assert_err, assert_ok};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Collects every value given to a `user_name` span field
    #[derive(Clone, Default)]
    struct UserNameFields(Arc<Mutex<Vec<String>>>);

    impl UserNameFields {
        fn values(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct UserNameVisitor<'a>(&'a mut Vec<String>);

    impl Visit for UserNameVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "user_name" {
                self.0.push(format!("{value:?}"));
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for UserNameFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut values = self.0.lock().unwrap();
            attrs.record(&mut UserNameVisitor(&mut values));
        }

        fn on_record(&self, _id: &Id, record: &Record<'_>, _ctx: Context<'_, S>) {
            let mut values = self.0.lock().unwrap();
            record.record(&mut UserNameVisitor(&mut values));
        }
    }

    #[tokio::test]
    async fn test_user_name_recorded_only_after_validation() {
        let fields = UserNameFields::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(fields.clone()));
        let service = memory_service();

        assert_err!(service.register(register_input("mallory", "")).await);
        assert_err!(service.login(login_input("mallory", "")).await);
        assert!(fields.values().is_empty());

        assert_ok!(service.register(register_input("alice", "s3cret")).await);
        assert_ok!(service.login(login_input("alice", "s3cret")).await);
        assert_eq!(fields.values(), vec!["alice".to_string(), "alice".to_string()]);
    }
}
