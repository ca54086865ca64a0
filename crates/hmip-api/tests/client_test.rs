#![allow(clippy::unwrap_used)]
// Integration tests for `HmipClient` and `Registration` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hmip_api::{
    ConnectionConfig, Error, HmipClient, Registration, TransportConfig, client_auth_token,
};

const ACCESS_POINT: &str = "3014-F711-A000-0000-0000-0001";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HmipClient) {
    let server = MockServer::start().await;
    let client = HmipClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        ACCESS_POINT,
    );
    (server, client)
}

fn hmip_path(suffix: &str) -> String {
    format!("/hmip/{suffix}")
}

fn state_body() -> serde_json::Value {
    json!({
        "home": {
            "id": "home-1",
            "currentAPVersion": "1.2.4",
            "availableAPVersion": "1.2.4",
            "updateState": "UP_TO_DATE",
            "connected": true,
            "pinAssigned": false
        },
        "devices": {
            "dev-plug": {
                "id": "dev-plug",
                "label": "Coffee",
                "type": "PLUGABLE_SWITCH_MEASURING",
                "firmwareVersion": "2.6.2",
                "availableFirmwareVersion": "0.0.0",
                "updateState": "UP_TO_DATE",
                "functionalChannels": {
                    "0": {
                        "functionalChannelType": "DEVICE_BASE",
                        "unreach": false,
                        "lowBat": null,
                        "rssiDeviceValue": -60,
                        "dutyCycle": false
                    },
                    "1": {
                        "functionalChannelType": "SWITCH_MEASURING_CHANNEL",
                        "on": true,
                        "energyCounter": 12.5,
                        "currentPowerConsumption": 3.2,
                        "profileMode": "AUTOMATIC"
                    }
                }
            }
        },
        "groups": {
            "grp-1": {
                "id": "grp-1",
                "label": "Living room",
                "type": "META",
                "channels": [{ "deviceId": "dev-plug", "channelIndex": 1 }]
            }
        },
        "clients": {}
    })
}

// ── Host lookup ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_resolves_rest_host_and_sends_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/getHost"))
        .and(body_partial_json(json!({ "id": "3014F711A000000000000001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urlREST": server.uri(),
            "urlWebSocket": "wss://example.invalid/ws"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/getCurrentState")))
        .and(header("authtoken", "secret-token"))
        .and(header("clientauth", client_auth_token(ACCESS_POINT).as_str()))
        .and(header("version", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(state_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ConnectionConfig {
        access_point_id: ACCESS_POINT.into(),
        auth_token: SecretString::from("secret-token".to_string()),
        lookup_url: Url::parse(&format!("{}/getHost", server.uri())).unwrap(),
        transport: TransportConfig::default(),
    };

    let client = HmipClient::connect(&config).await.unwrap();
    assert_eq!(
        client.rest_url().as_str().trim_end_matches('/'),
        server.uri()
    );

    let state = client.get_current_state().await.unwrap();
    assert_eq!(state.home.id, "home-1");
}

#[tokio::test]
async fn test_lookup_failure_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/getHost"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let config = ConnectionConfig {
        access_point_id: ACCESS_POINT.into(),
        auth_token: SecretString::from("t".to_string()),
        lookup_url: Url::parse(&format!("{}/getHost", server.uri())).unwrap(),
        transport: TransportConfig {
            timeout: Duration::from_secs(5),
        },
    };

    let result = HmipClient::connect(&config).await;
    assert!(
        matches!(result, Err(Error::Lookup { .. })),
        "expected Lookup error"
    );
}

// ── State ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_current_state_parses_devices_and_groups() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/getCurrentState")))
        .and(body_partial_json(json!({
            "clientCharacteristics": { "applicationIdentifier": "hmip" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(state_body()))
        .mount(&server)
        .await;

    let state = client.get_current_state().await.unwrap();

    assert_eq!(state.home.current_ap_version.as_deref(), Some("1.2.4"));
    let plug = &state.devices["dev-plug"];
    assert_eq!(plug.device_type, "PLUGABLE_SWITCH_MEASURING");
    assert_eq!(plug.label, "Coffee");
    assert_eq!(plug.functional_channels["0"].rssi_device_value, Some(-60));
    assert_eq!(plug.functional_channels["1"].on, Some(true));
    assert_eq!(
        plug.functional_channels["1"].extra["profileMode"],
        json!("AUTOMATIC")
    );
    assert_eq!(state.groups["grp-1"].channels[0].device_id, "dev-plug");
}

#[tokio::test]
async fn test_get_security_journal() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/getSecurityJournal")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                { "eventTimestamp": 1_513_000_000_000_i64, "eventType": "ACTIVATION_CHANGED", "label": "Absence" },
                { "eventTimestamp": 1_513_000_100_000_i64, "eventType": "ACCESS_POINT_CONNECTED" }
            ]
        })))
        .mount(&server)
        .await;

    let entries = client.get_security_journal().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].event_type, "ACTIVATION_CHANGED");
    assert_eq!(entries[0].label, "Absence");
    assert_eq!(entries[1].label, "");
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_zones_activation_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/security/setZonesActivation")))
        .and(body_json(json!({
            "zonesActivation": { "EXTERNAL": true, "INTERNAL": false }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_security_zones_activation(false, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_pin_sends_old_pin_header() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/setPin")))
        .and(body_json(json!({ "pin": "4321" })))
        .and(header("pin", "1234"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.set_pin(Some("4321"), Some("1234")).await.unwrap();
}

#[tokio::test]
async fn test_delete_pin_equals_empty_pin() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/setPin")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.set_pin(None, Some("1234")).await.unwrap();
    client.set_pin(Some(""), Some("1234")).await.unwrap();
    client.set_pin(None, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    let deleted: serde_json::Value = requests[0].body_json().unwrap();
    let emptied: serde_json::Value = requests[1].body_json().unwrap();
    assert_eq!(deleted, json!({ "pin": "" }));
    assert_eq!(deleted, emptied);
    assert_eq!(
        requests[0].headers.get("pin"),
        requests[1].headers.get("pin")
    );
    assert!(!requests[2].headers.contains_key("pin"));
}

#[tokio::test]
async fn test_set_zones_device_assignment_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/security/setZonesDeviceAssignment")))
        .and(body_json(json!({
            "zonesDeviceAssignment": {
                "INTERNAL": ["motion-1"],
                "EXTERNAL": ["window-1", "window-2"]
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_zones_device_assignment(
            &["motion-1".to_string()],
            &["window-1".to_string(), "window-2".to_string()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_device_commands() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("device/setDeviceLabel")))
        .and(body_json(json!({ "deviceId": "dev-1", "label": "Hallway" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("device/control/setSwitchState")))
        .and(body_json(json!({ "channelIndex": 1, "deviceId": "dev-1", "on": false })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("device/configuration/setClimateControlDisplay")))
        .and(body_json(json!({ "channelIndex": 1, "deviceId": "dev-1", "display": "ACTUAL_HUMIDITY" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.set_device_label("dev-1", "Hallway").await.unwrap();
    client.set_switch_state("dev-1", false).await.unwrap();
    client
        .set_climate_control_display("dev-1", "ACTUAL_HUMIDITY")
        .await
        .unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_forbidden_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/getCurrentState")))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errorCode": "INVALID_AUTH_TOKEN" })),
        )
        .mount(&server)
        .await;

    let err = client.get_current_state().await.unwrap_err();
    assert!(
        matches!(err, Error::Authentication { .. }),
        "expected auth error, got: {err:?}"
    );
    assert!(err.to_string().contains("INVALID_AUTH_TOKEN"));
}

#[tokio::test]
async fn test_error_code_is_extracted() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/setPin")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "errorCode": "INVALID_PIN" })),
        )
        .mount(&server)
        .await;

    let err = client.set_pin(Some("1"), Some("0000")).await.unwrap_err();
    match err {
        Error::Api { code, status, .. } => {
            assert_eq!(code.as_deref(), Some("INVALID_PIN"));
            assert_eq!(status, 400);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_state_reports_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(hmip_path("home/getCurrentState")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_current_state().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Registration ────────────────────────────────────────────────────

#[tokio::test]
async fn test_registration_flow() {
    let server = MockServer::start().await;
    let device_id = Uuid::new_v4();
    let registration = Registration::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        ACCESS_POINT,
        device_id,
    );

    Mock::given(method("POST"))
        .and(path(hmip_path("auth/connectionRequest")))
        .and(body_json(json!({
            "deviceId": device_id,
            "deviceName": "hmip-test",
            "sgtin": "3014F711A000000000000001"
        })))
        .and(header_exists("pin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("auth/isRequestAcknowledged")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("auth/requestAuthToken")))
        .and(body_json(json!({ "deviceId": device_id })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authToken": "NEWTOKEN" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(hmip_path("auth/confirmAuthToken")))
        .and(body_json(json!({ "deviceId": device_id, "authToken": "NEWTOKEN" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clientId": "client-9" })))
        .expect(1)
        .mount(&server)
        .await;

    registration
        .connection_request("hmip-test", Some("1234"))
        .await
        .unwrap();
    registration
        .wait_for_acknowledgement(Duration::from_millis(10), 3)
        .await
        .unwrap();
    let token = registration.request_auth_token().await.unwrap();
    assert_eq!(token.expose_secret(), "NEWTOKEN");
    let client = registration.confirm_auth_token(&token).await.unwrap();
    assert_eq!(client.client_id, "client-9");
    assert_eq!(registration.device_id(), device_id);
}

#[tokio::test]
async fn test_unacknowledged_request_times_out() {
    let server = MockServer::start().await;
    let registration = Registration::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        ACCESS_POINT,
        Uuid::new_v4(),
    );

    Mock::given(method("POST"))
        .and(path(hmip_path("auth/isRequestAcknowledged")))
        .respond_with(ResponseTemplate::new(400))
        .expect(2)
        .mount(&server)
        .await;

    let result = registration
        .wait_for_acknowledgement(Duration::from_millis(1), 2)
        .await;
    assert!(matches!(result, Err(Error::NotAcknowledged)));
}
