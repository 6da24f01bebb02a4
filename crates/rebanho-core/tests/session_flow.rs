//! Integration tests for the session lifecycle against a mock API

use mockito::{Matcher, Server};
use rebanho_core::api::ListParams;
use rebanho_core::{ApiClient, ApiError, SessionManager, SessionState};

fn auth_body(token: &str) -> String {
    format!(
        r#"{{"accessToken":"{}","user":{{"id":1,"nome":"Ana Souza","email":"ana@fazenda.br"}}}}"#,
        token
    )
}

#[tokio::test]
async fn login_establishes_session() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "identifier": "ana@fazenda.br",
            "secret": "segredo",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("tok-1"))
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    let ok = session.login("ana@fazenda.br", "segredo").await.unwrap();

    login_mock.assert_async().await;
    assert!(ok);
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.access_token(), Some("tok-1"));
    assert_eq!(session.current_user().unwrap().email, "ana@fazenda.br");
}

#[tokio::test]
async fn login_sends_device_descriptor() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Regex("\"device\":".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("tok-1"))
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.login("ana@fazenda.br", "segredo").await.unwrap());
    login_mock.assert_async().await;
}

#[tokio::test]
async fn rejected_login_leaves_state_untouched() {
    let mut server = Server::new_async().await;

    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"credenciais inválidas"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(!session.initialize().await);
    assert_eq!(session.state(), SessionState::Anonymous);

    let ok = session.login("ana@fazenda.br", "errada").await.unwrap();
    assert!(!ok);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.access_token().is_none());
    assert!(session.current_user().is_none());

    refresh_mock.assert_async().await;
    login_mock.assert_async().await;
}

#[tokio::test]
async fn empty_credentials_fail_without_network_call() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .expect(0)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    let err = session.login("", "segredo").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = session.login("ana@fazenda.br", "").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    login_mock.assert_async().await;
}

#[tokio::test]
async fn refresh_without_cookie_lands_anonymous() {
    let mut server = Server::new_async().await;

    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(!session.initialize().await);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.access_token().is_none());

    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn initialize_attempts_refresh_exactly_once() {
    let mut server = Server::new_async().await;

    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("recovered"))
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.initialize().await);
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.access_token(), Some("recovered"));

    // Second call is a no-op, not another refresh
    assert!(session.initialize().await);
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("tok-1"))
        .expect(1)
        .create_async()
        .await;
    let logout_mock = server
        .mock("POST", "/auth/logout")
        .match_header("authorization", "Bearer tok-1")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.login("ana@fazenda.br", "segredo").await.unwrap());

    let server_ok = session.logout().await;
    assert!(!server_ok);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.access_token().is_none());
    assert!(session.current_user().is_none());

    login_mock.assert_async().await;
    logout_mock.assert_async().await;
}

#[tokio::test]
async fn expired_token_is_renewed_transparently() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("stale"))
        .expect(1)
        .create_async()
        .await;
    let rejected_mock = server
        .mock("GET", "/animais")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("fresh"))
        .expect(1)
        .create_async()
        .await;
    let accepted_mock = server
        .mock("GET", "/animais")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"id":5,"brinco":"BR-0005"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.login("ana@fazenda.br", "segredo").await.unwrap());

    let mut client = ApiClient::new(session);
    let animals = client.list_animals(&ListParams::default()).await.unwrap();

    assert_eq!(animals.len(), 1);
    assert_eq!(animals[0].tag, "BR-0005");
    assert_eq!(client.session().access_token(), Some("fresh"));
    assert!(client.session().is_authenticated());

    login_mock.assert_async().await;
    rejected_mock.assert_async().await;
    refresh_mock.assert_async().await;
    accepted_mock.assert_async().await;
}

#[tokio::test]
async fn failed_renewal_is_terminal() {
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("stale"))
        .expect(1)
        .create_async()
        .await;
    // expect(1) proves the request is not retried after the failed renewal
    let rejected_mock = server
        .mock("GET", "/animais")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.login("ana@fazenda.br", "segredo").await.unwrap());

    let mut client = ApiClient::new(session);
    let err = client.list_animals(&ListParams::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(client.session().state(), SessionState::Anonymous);
    assert!(client.session().access_token().is_none());
    assert!(client.session().current_user().is_none());

    login_mock.assert_async().await;
    rejected_mock.assert_async().await;
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn token_and_profile_move_together_across_refreshes() {
    let mut server = Server::new_async().await;

    let ok_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("tok-a"))
        .expect(1)
        .create_async()
        .await;

    let mut session = SessionManager::new(server.url()).unwrap();
    assert!(session.refresh().await);
    assert!(session.access_token().is_some());
    assert!(session.current_user().is_some());
    ok_mock.assert_async().await;

    // Replace the mock with a failing refresh; both halves must clear
    let fail_mock = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    assert!(!session.refresh().await);
    assert!(session.access_token().is_none());
    assert!(session.current_user().is_none());
    fail_mock.assert_async().await;
}
