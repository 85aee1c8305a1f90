use std::time::Duration;

use super::*;

#[test]
fn parse_accepts_locations_without_search_info() {
    let body = r#"{"Locations":[{"Latitude":"40.7","Longitude":"-74.0"}],"Error":null}"#;
    let result = parse_search_result(body, "PlaceSearch").unwrap();

    assert!(result.error().is_none());
    assert_eq!(result.locations().len(), 1);
    assert_eq!(result.locations()[0].latitude.as_deref(), Some("40.7"));
}

#[test]
fn parse_error_object_is_a_successful_call() {
    let body = r#"{"Error":{"Type":"Authorization","TypeCode":"1","Desc":"Please provide a valid license key for this web service.","DescCode":"8"}}"#;
    let result = parse_search_result(body, "PlaceSearch").unwrap();

    assert!(result.is_valid());
    assert_eq!(
        result.error().and_then(|e| e.desc_code.as_deref()),
        Some("8")
    );
}

#[test]
fn parse_rejects_non_json_body() {
    let err = parse_search_result("<html>Service Unavailable</html>", "PlaceSearch at x")
        .unwrap_err();
    assert!(
        matches!(err, AgiError::Deserialize { ref context, .. } if context == "PlaceSearch at x"),
        "got {err:?}"
    );
    assert!(err.is_transport());
}

#[test]
fn parse_rejects_empty_envelope() {
    let err = parse_search_result("{}", "ReverseSearch").unwrap_err();
    assert!(matches!(err, AgiError::Malformed { .. }), "got {err:?}");
    assert!(err.is_transport());
}

#[test]
fn debug_output_redacts_license_key() {
    let client = RestClient::with_endpoints(
        "WS72-SECRET",
        Mode::Live,
        Duration::from_secs(5),
        Endpoints::rest_defaults(),
    )
    .unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("WS72-SECRET"), "license key leaked: {debug}");
}

#[tokio::test]
async fn invalid_endpoint_fails_without_network() {
    let client = RestClient::with_endpoints(
        "k",
        Mode::Live,
        Duration::from_secs(1),
        Endpoints::new("not a url", "also not a url", "nope"),
    )
    .unwrap();
    let err = client
        .place_search(&PlaceSearchRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgiError::InvalidEndpoint { .. }), "got {err:?}");
}
