mod support;

use std::sync::Arc;
use std::time::Duration;

use studio_client::SessionStore;
use studio_client::domain::{LoginRequest, RegisterRequest};
use studio_client::interface_adapters::clients::auth::AuthClient;
use studio_client::use_cases::{AuthFlowError, LoginUseCase, LogoutUseCase, RegisterUseCase};

async fn auth_client() -> Arc<AuthClient> {
    let base_url = support::start_server().await;
    let client = AuthClient::new(base_url, Duration::from_secs(3))
        .expect("auth client should build");
    Arc::new(client)
}

#[tokio::test]
async fn when_admin_logs_in_and_out_then_store_and_stream_follow() {
    let store = SessionStore::default();
    let mut stream = store.is_logged_stream();
    let login = LoginUseCase {
        provider: auth_client().await,
        store: store.clone(),
    };

    let info = login
        .execute(LoginRequest {
            email: "yoga@studio.com".to_string(),
            password: "test!1234".to_string(),
        })
        .await
        .expect("admin login should succeed");

    assert_eq!(info.token_type, "Bearer");
    assert_eq!(info.username, "yoga@studio.com");
    assert!(store.is_admin());
    assert_eq!(store.session_information(), Some(info));

    LogoutUseCase {
        store: store.clone(),
    }
    .execute();

    assert!(!store.is_logged());
    assert_eq!(stream.next().await, Some(false));
    assert_eq!(stream.next().await, Some(true));
    assert_eq!(stream.next().await, Some(false));
}

#[tokio::test]
async fn when_password_is_wrong_then_login_fails_and_store_is_untouched() {
    let store = SessionStore::default();
    let login = LoginUseCase {
        provider: auth_client().await,
        store: store.clone(),
    };

    let result = login
        .execute(LoginRequest {
            email: "yoga@studio.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;

    assert_eq!(result, Err(AuthFlowError::InvalidCredentials));
    assert!(!store.is_logged());
}

#[tokio::test]
async fn when_member_registers_twice_then_second_is_rejected_and_login_works() {
    let provider = auth_client().await;
    let register = RegisterUseCase {
        provider: provider.clone(),
    };
    let request = RegisterRequest {
        email: "flow-member@test.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        password: "secret123".to_string(),
    };

    register
        .execute(request.clone())
        .await
        .expect("first registration should succeed");
    let duplicate = register.execute(request).await;

    assert_eq!(
        duplicate,
        Err(AuthFlowError::Rejected {
            status: 400,
            message: "Error: Email is already taken!".to_string(),
        })
    );

    let store = SessionStore::default();
    let info = LoginUseCase {
        provider,
        store: store.clone(),
    }
    .execute(LoginRequest {
        email: "flow-member@test.com".to_string(),
        password: "secret123".to_string(),
    })
    .await
    .expect("member login should succeed");

    assert!(!info.admin);
    assert!(store.is_logged());
    assert!(!store.is_admin());
}
