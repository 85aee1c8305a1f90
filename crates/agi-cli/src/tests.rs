use agi_core::{Endpoints, Mode};

use super::*;

#[test]
fn parses_place_search_with_defaults() {
    let cli = Cli::try_parse_from([
        "agi-cli",
        "place-search",
        "--single-line",
        "17 Battery Place, New York, NY 10004",
        "--country",
        "US",
        "--max-results",
        "2",
    ])
    .expect("expected valid cli args");

    let Commands::PlaceSearch { call, request } = cli.command else {
        panic!("expected place-search");
    };
    assert_eq!(call.binding, Binding::Rest);
    assert!(!call.blocking);

    let request = PlaceSearchRequest::from(request);
    assert_eq!(request.single_line, "17 Battery Place, New York, NY 10004");
    assert_eq!(request.country, "US");
    assert_eq!(request.max_results, "2");
    assert_eq!(request.address1, "");
}

#[test]
fn parses_reverse_search_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "agi-cli",
        "reverse-search",
        "--binding",
        "soap",
        "--blocking",
        "--latitude",
        "40.7039690",
        "--longitude",
        "-74.0166160",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::ReverseSearch {
            call: CallOptions {
                binding: Binding::Soap,
                blocking: true
            },
            request: ReverseSearchArgs { ref longitude, .. }
        } if longitude == "-74.0166160"
    ));
}

#[test]
fn reverse_search_requires_coordinates() {
    let result = Cli::try_parse_from(["agi-cli", "reverse-search", "--latitude", "40.7"]);
    assert!(result.is_err());
}

#[test]
fn unknown_binding_is_rejected() {
    let result = Cli::try_parse_from(["agi-cli", "place-search", "--binding", "grpc"]);
    assert!(result.is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["agi-cli"]).is_err());
}

fn test_config() -> AgiConfig {
    AgiConfig {
        license_key: "WS72-SECRET".to_owned(),
        mode: Mode::Trial,
        timeout_secs: 15,
        user_agent: "agi-client/0.1".to_owned(),
        log_level: "info".to_owned(),
        rest_endpoints: Endpoints::rest_defaults(),
        soap_endpoints: Endpoints::soap_defaults(),
        soap_namespace: "https://www.serviceobjects.com".to_owned(),
    }
}

#[test]
fn input_rendering_lists_params_without_license_key() {
    let request = ReverseSearchRequest::new("40.70", "-74.01");
    let text = output::render_reverse_input(&request, &test_config());

    assert!(text.contains("* Input *"));
    assert!(text.contains("Latitude"));
    assert!(text.contains("-74.01"));
    assert!(text.contains("trial"));
    assert!(!text.contains("WS72-SECRET"));
}

#[test]
fn found_result_renders_locations_and_components() {
    let result: SearchResult = serde_json::from_value(serde_json::json!({
        "SearchInfo": { "Status": "OK", "NumberOfLocations": 1 },
        "Locations": [{
            "PrecisionLevel": 16,
            "Type": "Address",
            "Latitude": "40.7039690",
            "Longitude": "-74.0166160",
            "AddressComponents": { "PremiseNumber": "17", "TimeZone_UTC": "-5" }
        }]
    }))
    .unwrap();

    let text = output::render_result(&result);
    assert!(text.contains("* Results *"));
    assert!(text.contains("Location #1"));
    assert!(text.contains("40.7039690"));
    assert!(text.contains("PremiseNumber"));
    assert!(text.contains("TimeZone_UTC"));
    assert!(!text.contains("* Error *"));
}

#[test]
fn error_result_renders_error_block() {
    let result: SearchResult = serde_json::from_value(serde_json::json!({
        "Error": { "Type": "Authorization", "TypeCode": "1", "Desc": "Invalid key", "DescCode": "8" }
    }))
    .unwrap();

    let text = output::render_result(&result);
    assert!(text.contains("* Error *"));
    assert!(text.contains("Invalid key"));
    assert!(!text.contains("* Results *"));
}

#[test]
fn labels_are_padded_to_one_column() {
    let result: SearchResult = serde_json::from_value(serde_json::json!({
        "SearchInfo": { "Status": "OK", "NumberOfLocations": 0 },
        "Locations": []
    }))
    .unwrap();

    let text = output::render_result(&result);
    assert!(text.contains(&format!("{:<32}: OK\n", "Status")));
    assert!(text.contains(&format!("{:<32}: 0\n", "NumberOfLocations")));
    assert!(text.contains("No locations returned."));
}
