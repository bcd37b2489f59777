//! Token lifecycle and synthesis integration tests
//!
//! All network traffic goes to a local mock server; no audio hardware and no
//! real credentials are needed.

use std::time::{SystemTime, UNIX_EPOCH};

use mockito::{Matcher, Server, ServerGuard};
use salute_tts::voice::wav;
use salute_tts::{Config, Error, SpeechClient, TokenManager, Voice};

const TOKEN_PATH: &str = "/api/v2/oauth";
const SYNTH_PATH: &str = "/rest/v1/text:synthesize";

fn test_config(server_url: &str) -> Config {
    Config {
        token_url: format!("{server_url}{TOKEN_PATH}"),
        synthesis_url: format!("{server_url}{SYNTH_PATH}"),
        insecure_tls: false,
        api_key: Some("dGVzdC1rZXk=".to_string()),
        ..Config::default()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn grant_body(token: &str, expires_at_ms: u64) -> String {
    serde_json::json!({ "access_token": token, "expires_at": expires_at_ms }).to_string()
}

/// Mock a successful token grant
async fn mock_token_grant(server: &mut ServerGuard, token: &str, expires_at_ms: u64) -> mockito::Mock {
    server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body(token, expires_at_ms))
        .create_async()
        .await
}

#[tokio::test]
async fn fresh_token_is_served_from_cache() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body("tok-1", now_ms() + 3_600_000))
        .expect(1)
        .create_async()
        .await;

    let auth = TokenManager::new(test_config(&server.url())).unwrap();

    // Second call must be answered from the cache without another request
    assert_eq!(auth.token().await.unwrap(), "tok-1");
    assert_eq!(auth.token().await.unwrap(), "tok-1");

    mock.assert_async().await;
}

#[tokio::test]
async fn stale_token_triggers_exactly_one_refresh() {
    let mut server = Server::new_async().await;

    // The first grant expires inside the 2 s safety margin, so it is already
    // stale when the second call checks it
    let first = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body("tok-1", now_ms() + 1_500))
        .expect(1)
        .create_async()
        .await;

    let auth = TokenManager::new(test_config(&server.url())).unwrap();
    assert_eq!(auth.token().await.unwrap(), "tok-1");
    first.assert_async().await;

    // Newest matching mock wins, so the refresh lands here
    let second = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body("tok-2", now_ms() + 3_600_000))
        .expect(1)
        .create_async()
        .await;

    assert_eq!(auth.token().await.unwrap(), "tok-2");
    assert_eq!(auth.token().await.unwrap(), "tok-2");
    second.assert_async().await;
}

#[tokio::test]
async fn token_endpoint_rejection_is_an_auth_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TOKEN_PATH)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let auth = TokenManager::new(test_config(&server.url())).unwrap();
    let err = auth.token().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Auth { status } if status == reqwest::StatusCode::UNAUTHORIZED
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn token_request_carries_basic_auth_scope_and_rquid() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TOKEN_PATH)
        .match_header("authorization", "Basic dGVzdC1rZXk=")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header(
            "rquid",
            Matcher::Regex(
                "^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$".to_string(),
            ),
        )
        .match_body("scope=SALUTE_SPEECH_PERS")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body("tok-1", now_ms() + 3_600_000))
        .expect(1)
        .create_async()
        .await;

    let auth = TokenManager::new(test_config(&server.url())).unwrap();
    assert_eq!(auth.token().await.unwrap(), "tok-1");

    mock.assert_async().await;
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    // An explicitly empty key never falls back to the environment, so the
    // error is deterministic regardless of the host
    let mut config = test_config("http://127.0.0.1:9");
    config.api_key = Some(String::new());

    let auth = TokenManager::new(config).unwrap();
    let err = auth.token().await.unwrap_err();

    // A transport error here would mean a request was attempted against the
    // closed port; the credential check must fire first
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn unknown_voice_fails_before_any_network_call() {
    let err = "Golos".parse::<Voice>().unwrap_err();
    assert!(matches!(&err, Error::InvalidVoice { voice } if voice == "Golos"));
}

#[tokio::test]
async fn synthesis_rejection_surfaces_the_status() {
    let mut server = Server::new_async().await;
    mock_token_grant(&mut server, "tok-1", now_ms() + 3_600_000).await;

    let synth = server
        .mock("POST", SYNTH_PATH)
        .match_query(Matcher::UrlEncoded("voice".into(), "Ost_24000".into()))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = SpeechClient::new(test_config(&server.url())).unwrap();
    let err = client.synthesize("Привет", Voice::Alexandra).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Synthesis { status } if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
    ));
    synth.assert_async().await;
}

#[tokio::test]
async fn synthesize_decodes_the_provider_wav() {
    let mut server = Server::new_async().await;
    mock_token_grant(&mut server, "tok-1", now_ms() + 3_600_000).await;

    // A deterministic ramp so a sample-order bug cannot cancel out
    #[allow(clippy::cast_possible_truncation)]
    let samples: Vec<i16> = (0..4800_i32).map(|i| (i * 13 % 30000 - 15000) as i16).collect();
    let body = wav::encode(&samples, 24000).unwrap();

    let synth = server
        .mock("POST", SYNTH_PATH)
        .match_query(Matcher::UrlEncoded("voice".into(), "Bys_24000".into()))
        .match_header("authorization", "Bearer tok-1")
        .match_header("content-type", "application/text")
        .match_body("Привет")
        .with_status(200)
        .with_header("content-type", "audio/x-wav")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let client = SpeechClient::new(test_config(&server.url())).unwrap();
    let clip = client.synthesize("Привет", Voice::Boris).await.unwrap();

    assert_eq!(clip.sample_rate, 24000);
    assert_eq!(clip.samples, samples);
    synth.assert_async().await;
}

#[tokio::test]
async fn non_wav_synthesis_body_is_an_audio_error() {
    let mut server = Server::new_async().await;
    mock_token_grant(&mut server, "tok-1", now_ms() + 3_600_000).await;

    server
        .mock("POST", SYNTH_PATH)
        .match_query(Matcher::UrlEncoded("voice".into(), "Nec_24000".into()))
        .with_status(200)
        .with_body("not audio at all")
        .create_async()
        .await;

    let client = SpeechClient::new(test_config(&server.url())).unwrap();
    let err = client.synthesize("Привет", Voice::Natalya).await.unwrap_err();

    assert!(matches!(err, Error::Audio(_)));
}

#[tokio::test]
async fn one_token_serves_many_synthesis_calls() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(grant_body("tok-1", now_ms() + 3_600_000))
        .expect(1)
        .create_async()
        .await;

    let samples: Vec<i16> = vec![0, 1000, -1000, 2000];
    let body = wav::encode(&samples, 24000).unwrap();

    let synth = server
        .mock("POST", SYNTH_PATH)
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(body)
        .expect(3)
        .create_async()
        .await;

    let client = SpeechClient::new(test_config(&server.url())).unwrap();
    for voice in [Voice::Natalya, Voice::Marfa, Voice::Sergey] {
        let clip = client.synthesize("Привет", voice).await.unwrap();
        assert_eq!(clip.samples, samples);
    }

    token_mock.assert_async().await;
    synth.assert_async().await;
}
