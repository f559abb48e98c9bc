// Integration tests for the dashboard session against a mock workbench
// server.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use benchwatch_core::{Dashboard, DashboardConfig, TagComputerForm, WorkbenchConfigForm};

const LONG_POLL: Duration = Duration::from_secs(300);

async fn setup(poll_interval: Duration) -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let config = DashboardConfig {
        url: server.uri().parse().unwrap(),
        poll_interval,
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::new(config).unwrap();
    (server, dashboard)
}

fn usbs_response(vendor: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "acknowledge": true,
        "usbs": {
            "1-1": { "vendor": vendor, "product": "DataTraveler", "usb": "usb:v0951p1666" }
        }
    }))
}

fn inventories_response(records: &[(&str, &str)]) -> ResponseTemplate {
    let records: Vec<_> = records
        .iter()
        .map(|(id, created)| json!({ "id": id, "json": { "created": created, "label": id } }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "acknowledge": true,
        "inventories": records,
    }))
}

fn simulator_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "acknowledge": true,
        "data": { "inventories": ["sim-1", "sim-2"] }
    }))
}

async fn mount_happy_defaults(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[
            ("t2", "2017-04-25T12:00:00"),
            ("t1", "2017-04-24T12:00:00"),
            ("t3", "2017-04-26T12:00:00"),
        ]))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .mount(server)
        .await;
}

// ── Session startup ─────────────────────────────────────────────────

#[tokio::test]
async fn start_populates_the_store_immediately() {
    let (server, dashboard) = setup(LONG_POLL).await;
    mount_happy_defaults(&server).await;

    dashboard.start().await;

    let devices = dashboard.plugged_devices_snapshot();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices["1-1"].vendor.as_deref(), Some("Kingston"));

    let inventories = dashboard.inventories_snapshot();
    let ids: Vec<&str> = inventories.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["t3", "t2", "t1"]);

    assert!(dashboard.simulator_enabled());
    let simulator = dashboard.simulator_snapshot();
    assert_eq!(simulator.0["inventories"][0], "sim-1");

    dashboard.shutdown().await;
}

#[tokio::test]
async fn poll_picks_up_new_inventories() {
    let (server, dashboard) = setup(Duration::from_millis(100)).await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .mount(&server)
        .await;
    // First fetch sees one inventory, every later fetch sees two.
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[("first", "2017-04-24T12:00:00")]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[
            ("first", "2017-04-24T12:00:00"),
            ("second", "2017-04-25T12:00:00"),
        ]))
        .mount(&server)
        .await;

    let mut inventories = dashboard.inventories();
    dashboard.start().await;

    let initial = tokio::time::timeout(Duration::from_secs(5), inventories.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(initial.len(), 1);

    let updated = tokio::time::timeout(Duration::from_secs(5), inventories.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0].id, "second");

    dashboard.shutdown().await;
}

#[tokio::test]
async fn zero_interval_runs_the_startup_refresh_only() {
    let (server, dashboard) = setup(Duration::ZERO).await;
    mount_happy_defaults(&server).await;

    dashboard.start().await;
    assert_eq!(dashboard.plugged_devices_snapshot().len(), 1);

    tokio::time::sleep(Duration::from_millis(350)).await;
    let requests = server.received_requests().await.unwrap();
    let device_fetches = requests
        .iter()
        .filter(|r| r.url.path() == "/usbs")
        .count();
    assert_eq!(device_fetches, 1);

    dashboard.shutdown().await;
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn fetch_failure_keeps_previous_state() {
    let (server, dashboard) = setup(LONG_POLL).await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[("t1", "2017-04-24T12:00:00")]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    dashboard.start().await;
    assert_eq!(dashboard.plugged_devices_snapshot().len(), 1);

    let err = dashboard.refresh_plugged_devices().await.unwrap_err();
    assert!(err.is_transient());
    // The failed refresh leaves the earlier snapshot up.
    assert_eq!(dashboard.plugged_devices_snapshot().len(), 1);

    dashboard.shutdown().await;
}

#[tokio::test]
async fn unacknowledged_response_never_mutates_state() {
    let (server, dashboard) = setup(LONG_POLL).await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledge": false,
            "inventories": [{ "id": "ghost", "json": { "created": "2017-04-24T12:00:00" } }]
        })))
        .mount(&server)
        .await;

    dashboard.start().await;

    // The refused endpoint stays empty while the healthy one applied.
    assert!(dashboard.inventories_snapshot().is_empty());
    assert_eq!(dashboard.plugged_devices_snapshot().len(), 1);

    assert!(dashboard.refresh_inventories().await.is_err());
    assert!(dashboard.inventories_snapshot().is_empty());

    dashboard.shutdown().await;
}

// ── Simulator ───────────────────────────────────────────────────────

#[tokio::test]
async fn simulator_is_fetched_once_at_startup() {
    let (server, dashboard) = setup(Duration::from_millis(100)).await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[("t1", "2017-04-24T12:00:00")]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .expect(1)
        .mount(&server)
        .await;

    dashboard.start().await;
    tokio::time::sleep(Duration::from_millis(350)).await;
    dashboard.shutdown().await;

    let requests = server.received_requests().await.unwrap();
    let inventory_fetches = requests
        .iter()
        .filter(|r| r.url.path() == "/new_inventories")
        .count();
    // The poll kept running while the simulator stayed at one fetch.
    assert!(inventory_fetches >= 2);
}

#[tokio::test]
async fn disabled_simulator_is_never_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usbs"))
        .respond_with(usbs_response("Kingston"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new_inventories"))
        .respond_with(inventories_response(&[("t1", "2017-04-24T12:00:00")]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simulated_inventories"))
        .respond_with(simulator_response())
        .expect(0)
        .mount(&server)
        .await;

    let config = DashboardConfig {
        url: server.uri().parse().unwrap(),
        poll_interval: LONG_POLL,
        simulator: false,
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::new(config).unwrap();

    dashboard.start().await;
    assert!(!dashboard.simulator_enabled());
    dashboard.shutdown().await;
}

#[tokio::test]
async fn launch_scan_reports_the_server_verdict() {
    let (server, dashboard) = setup(LONG_POLL).await;
    Mock::given(method("POST"))
        .and(path("/simulate_inventory"))
        .and(body_string_contains("inventory=good"))
        .and(body_string_contains("timed=true"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/simulate_inventory"))
        .and(body_string_contains("inventory=bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(dashboard.launch_scan("good", true).await.is_ok());
    assert!(dashboard.launch_scan("bad", false).await.is_err());
}

// ── Commands and flash ──────────────────────────────────────────────

#[tokio::test]
async fn plug_device_hits_the_server_without_local_mutation() {
    let (server, dashboard) = setup(LONG_POLL).await;
    mount_happy_defaults(&server).await;
    Mock::given(method("GET"))
        .and(path("/add_usb"))
        .and(query_param("usb", "SN-042"))
        .and(query_param("inventory", "inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledge": true })))
        .expect(1)
        .mount(&server)
        .await;

    dashboard.start().await;
    let before = dashboard.plugged_devices_snapshot();

    dashboard.plug_device("SN-042", "inv-1").await.unwrap();

    // The plugged set only changes through a later poll.
    assert!(std::sync::Arc::ptr_eq(
        &before,
        &dashboard.plugged_devices_snapshot()
    ));

    dashboard.shutdown().await;
}

#[tokio::test]
async fn tag_computer_flashes_the_server_message() {
    let (server, dashboard) = setup(LONG_POLL).await;
    Mock::given(method("POST"))
        .and(path("/tag_computer_form"))
        .and(query_param("inventory", "inv-1"))
        .and(body_string_contains("label=B0017"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledge": true,
            "msg": "Computer B0017 tagged"
        })))
        .mount(&server)
        .await;

    let form = TagComputerForm {
        label: Some("B0017".to_owned()),
        ..TagComputerForm::default()
    };
    dashboard.tag_computer("inv-1", &form).await.unwrap();

    assert_eq!(dashboard.flash().as_deref(), Some("Computer B0017 tagged"));
}

#[tokio::test]
async fn edit_server_config_flashes_the_confirmation() {
    let (server, dashboard) = setup(LONG_POLL).await;
    Mock::given(method("POST"))
        .and(path("/edit_config_form"))
        .and(body_string_contains("SMART=short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledge": true,
            "msg": "The configuration has been edited"
        })))
        .mount(&server)
        .await;

    let form = WorkbenchConfigForm {
        smart: Some("short".to_owned()),
        ..WorkbenchConfigForm::default()
    };
    dashboard.edit_server_config(&form).await.unwrap();

    assert_eq!(
        dashboard.flash().as_deref(),
        Some("The configuration has been edited")
    );
}

// ── Shutdown ────────────────────────────────────────────────────────

#[tokio::test]
async fn shutdown_stops_the_poll() {
    let (server, dashboard) = setup(Duration::from_millis(100)).await;
    mount_happy_defaults(&server).await;

    dashboard.start().await;
    dashboard.shutdown().await;

    let before = server.received_requests().await.unwrap().len();
    tokio::time::sleep(Duration::from_millis(350)).await;
    let after = server.received_requests().await.unwrap().len();
    assert_eq!(before, after);
}
