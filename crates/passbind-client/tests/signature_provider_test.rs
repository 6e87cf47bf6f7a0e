//! Contract tests for the auth-message endpoint and SignatureProvider.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/message/{address}` | `get_auth_message_*`, `fetch_*` |

mod common;

use common::{EventLog, FakeWallet, IDENTITY};
use passbind_client::{CeremonyFault, LighthouseApiError, LighthouseClient, LighthouseConfig, SignatureProvider};
use passbind_core::Identity;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> LighthouseClient {
    LighthouseClient::new(&LighthouseConfig::local_mock(&mock_server.uri()).unwrap()).unwrap()
}

fn identity() -> Identity {
    Identity::new(IDENTITY).unwrap()
}

#[tokio::test]
async fn fetch_returns_all_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/message/{IDENTITY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"message": "nonce1"},
            {"message": "nonce2"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let entries = client.messages().fetch(&identity()).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].message.as_deref(), Some("nonce2"));
}

#[tokio::test]
async fn get_auth_message_takes_first_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/message/{IDENTITY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"message": "nonce1"},
            {"message": "ignored"}
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    assert_eq!(provider.get_auth_message(&identity()).await.unwrap(), "nonce1");
    assert!(log.events().is_empty(), "fetching a message must not prompt the wallet");
}

#[tokio::test]
async fn get_auth_message_empty_list_is_no_challenge() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/message/{IDENTITY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    match provider.get_auth_message(&identity()).await.unwrap_err() {
        CeremonyFault::NoChallengeAvailable { identity } => assert_eq!(identity.as_str(), IDENTITY),
        other => panic!("expected NoChallengeAvailable, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_auth_message_entry_without_message_is_no_challenge() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/message/{IDENTITY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{}])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    let err = provider.get_auth_message(&identity()).await.unwrap_err();
    assert!(matches!(err, CeremonyFault::NoChallengeAvailable { .. }));
}

#[tokio::test]
async fn get_auth_message_carries_server_error_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/message/{IDENTITY}")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "invalid address"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    match provider.get_auth_message(&identity()).await.unwrap_err() {
        CeremonyFault::NetworkFault(e) => {
            assert_eq!(e.status(), Some(400));
            assert!(e.payload().contains("invalid address"));
        }
        other => panic!("expected NetworkFault, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_auth_message_reports_transport_failure() {
    // Closed port: connection refused.
    let client = LighthouseClient::new(&LighthouseConfig::local_mock("http://127.0.0.1:1").unwrap())
        .unwrap();
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    match provider.get_auth_message(&identity()).await.unwrap_err() {
        CeremonyFault::NetworkFault(LighthouseApiError::Http { endpoint, .. }) => {
            assert_eq!(endpoint, "GET /api/message/{address}");
        }
        other => panic!("expected transport NetworkFault, got: {other:?}"),
    }
}

#[tokio::test]
async fn sign_message_passes_message_and_identity_to_wallet() {
    let client = LighthouseClient::new(&LighthouseConfig::local_mock("http://127.0.0.1:1").unwrap())
        .unwrap();
    let log = EventLog::default();
    let wallet = FakeWallet::new(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    let sig = provider.sign_message(&identity(), "nonce1").await.unwrap();
    assert_eq!(sig.as_str(), "0xsig");
    assert_eq!(
        wallet.signed_messages.lock().clone(),
        vec![("nonce1".to_string(), IDENTITY.to_string())]
    );
}

#[tokio::test]
async fn sign_message_rejection_is_signature_rejected() {
    let client = LighthouseClient::new(&LighthouseConfig::local_mock("http://127.0.0.1:1").unwrap())
        .unwrap();
    let log = EventLog::default();
    let wallet = FakeWallet::rejecting(&log);
    let provider = SignatureProvider::new(client.messages(), &wallet);

    let err = provider.sign_message(&identity(), "nonce1").await.unwrap_err();
    assert!(matches!(err, CeremonyFault::SignatureRejected(_)));
}

#[tokio::test]
async fn sign_message_other_wallet_errors_stay_distinct() {
    let client = LighthouseClient::new(&LighthouseConfig::local_mock("http://127.0.0.1:1").unwrap())
        .unwrap();
    let log = EventLog::default();
    let wallet = FakeWallet {
        signature: Err(passbind_client::WalletError::Unavailable("locked".into())),
        ..FakeWallet::new(&log)
    };
    let provider = SignatureProvider::new(client.messages(), &wallet);

    let err = provider.sign_message(&identity(), "nonce1").await.unwrap_err();
    assert!(matches!(err, CeremonyFault::Wallet(_)));
}
