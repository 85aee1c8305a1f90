//! The blocking wrappers must return exactly what the async clients return.
//!
//! These are plain `#[test]`s: the blocking client owns its own runtime and
//! cannot be driven from inside another one. The mock servers are started on
//! a separate runtime.

use std::time::Duration;

use agi_client::soap::DEFAULT_SOAP_NAMESPACE;
use agi_client::{blocking, AgiError, PlaceSearchRequest, ReverseSearchRequest};
use agi_core::{Endpoints, Mode};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start(rt: &Runtime, body: ResponseTemplate, calls: u64) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(body)
            .expect(calls)
            .mount(&server)
            .await;
        server
    })
}

fn rest_endpoints(live: &MockServer, backup: &MockServer) -> Endpoints {
    Endpoints::new(
        format!("{}/json", live.uri()),
        format!("{}/json", backup.uri()),
        format!("{}/json", live.uri()),
    )
}

fn fatal() -> serde_json::Value {
    json!({ "Error": { "Type": "Fatal", "TypeCode": "3", "Desc": "down", "DescCode": "1" } })
}

fn found() -> serde_json::Value {
    json!({
        "SearchInfo": { "Status": "OK", "NumberOfLocations": 1 },
        "Locations": [{ "Latitude": "40.7039690", "Longitude": "-74.0166160" }]
    })
}

#[test]
fn blocking_rest_matches_async() {
    let rt = Runtime::new().unwrap();
    let live = start(&rt, ResponseTemplate::new(200).set_body_json(fatal()), 4);
    let backup = start(&rt, ResponseTemplate::new(200).set_body_json(found()), 4);

    let request = ReverseSearchRequest::new("40.7039690", "-74.0166160");
    let endpoints = rest_endpoints(&live, &backup);
    let timeout = Duration::from_secs(5);

    let blocking = blocking::RestClient::with_endpoints("k", Mode::Live, timeout, endpoints.clone())
        .unwrap();
    let blocking_place = blocking.place_search(&PlaceSearchRequest::default()).unwrap();
    let blocking_reverse = blocking.reverse_search(&request).unwrap();

    let client = agi_client::RestClient::with_endpoints("k", Mode::Live, timeout, endpoints).unwrap();
    let (async_place, async_reverse) = rt.block_on(async {
        (
            client.place_search(&PlaceSearchRequest::default()).await.unwrap(),
            client.reverse_search(&request).await.unwrap(),
        )
    });

    assert_eq!(blocking_place, async_place);
    assert_eq!(blocking_reverse, async_reverse);
    assert!(blocking_place.is_valid());
}

#[test]
fn blocking_rest_reports_double_failure() {
    let rt = Runtime::new().unwrap();
    let live = start(&rt, ResponseTemplate::new(500), 1);
    let backup = start(&rt, ResponseTemplate::new(500), 1);

    let client = blocking::RestClient::with_endpoints(
        "k",
        Mode::Live,
        Duration::from_secs(5),
        rest_endpoints(&live, &backup),
    )
    .unwrap();
    let err = client
        .place_search(&PlaceSearchRequest::default())
        .unwrap_err();

    assert!(matches!(err, AgiError::BothEndpointsFailed { .. }), "got {err:?}");
}

#[test]
fn blocking_soap_matches_async() {
    let rt = Runtime::new().unwrap();
    let body = "<?xml version=\"1.0\"?>\
        <s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body>\
        <PlaceSearchResponse><PlaceSearchResult>\
        <SearchInfo><Status>OK</Status></SearchInfo>\
        <Locations><Location><Latitude>40.7</Latitude></Location></Locations>\
        </PlaceSearchResult></PlaceSearchResponse></s:Body></s:Envelope>";
    let server = start(
        &rt,
        ResponseTemplate::new(200).set_body_raw(body, "text/xml"),
        2,
    );
    let endpoints = Endpoints::new(
        format!("{}/SOAP", server.uri()),
        format!("{}/SOAP", server.uri()),
        format!("{}/SOAP", server.uri()),
    );
    let timeout = Duration::from_secs(5);

    let blocking = blocking::SoapClient::with_endpoints(
        "k",
        Mode::Trial,
        timeout,
        endpoints.clone(),
        DEFAULT_SOAP_NAMESPACE,
    )
    .unwrap();
    let from_blocking = blocking.place_search(&PlaceSearchRequest::default()).unwrap();

    let client = agi_client::SoapClient::with_endpoints(
        "k",
        Mode::Trial,
        timeout,
        endpoints,
        DEFAULT_SOAP_NAMESPACE,
    )
    .unwrap();
    let from_async = rt
        .block_on(client.place_search(&PlaceSearchRequest::default()))
        .unwrap();

    assert_eq!(from_blocking, from_async);
    assert_eq!(from_async.locations()[0].latitude.as_deref(), Some("40.7"));
}
