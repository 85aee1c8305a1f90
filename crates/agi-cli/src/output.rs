//! Console rendering for requests and results.

use std::fmt::Write;

use agi_client::{PlaceSearchRequest, ReverseSearchRequest};
use agi_core::{AgiConfig, ErrorDetails, Location, SearchInfo, SearchResult};

/// Label column width; the longest component name plus padding.
const LABEL_WIDTH: usize = 32;

fn line(out: &mut String, indent: &str, label: &str, value: Option<&str>) {
    writeln!(
        out,
        "{indent}{label:<width$}: {}",
        value.unwrap_or(""),
        width = LABEL_WIDTH
    )
    .ok();
}

fn header(out: &mut String, title: &str) {
    writeln!(out, "\n* {title} *\n").ok();
}

pub(crate) fn render_place_input(request: &PlaceSearchRequest, config: &AgiConfig) -> String {
    let mut out = String::new();
    header(&mut out, "Input");
    for (name, value) in request.params() {
        line(&mut out, "", name, Some(value));
    }
    render_call_settings(&mut out, config);
    out
}

pub(crate) fn render_reverse_input(request: &ReverseSearchRequest, config: &AgiConfig) -> String {
    let mut out = String::new();
    header(&mut out, "Input");
    for (name, value) in request.params() {
        line(&mut out, "", name, Some(value));
    }
    render_call_settings(&mut out, config);
    out
}

// The license key is never echoed.
fn render_call_settings(out: &mut String, config: &AgiConfig) {
    line(out, "", "Mode", Some(&config.mode.to_string()));
    line(out, "", "Timeout Seconds", Some(&config.timeout_secs.to_string()));
}

pub(crate) fn render_result(result: &SearchResult) -> String {
    let mut out = String::new();
    match result {
        SearchResult::Found { info, locations } => {
            header(&mut out, "Results");
            render_search_info(&mut out, info);
            if locations.is_empty() {
                writeln!(out, "\nNo locations returned.").ok();
            }
            for (idx, location) in locations.iter().enumerate() {
                writeln!(out, "\nLocation #{}", idx + 1).ok();
                render_location(&mut out, location);
            }
        }
        SearchResult::Error(details) => {
            header(&mut out, "Error");
            render_error(&mut out, details);
        }
    }
    out
}

fn render_search_info(out: &mut String, info: &SearchInfo) {
    writeln!(out, "Search Info:").ok();
    let count = info.number_of_locations.map(|n| n.to_string());
    line(out, "", "Status", info.status.as_deref());
    line(out, "", "NumberOfLocations", count.as_deref());
    line(out, "", "Notes", info.notes.as_deref());
    line(out, "", "NotesDesc", info.notes_desc.as_deref());
    line(out, "", "Warnings", info.warnings.as_deref());
    line(out, "", "WarningDesc", info.warning_desc.as_deref());
}

fn render_location(out: &mut String, location: &Location) {
    let precision = location.precision_level.map(|p| p.to_string());
    line(out, "\t", "PrecisionLevel", precision.as_deref());
    line(out, "\t", "Type", location.kind.as_deref());
    line(out, "\t", "Latitude", location.latitude.as_deref());
    line(out, "\t", "Longitude", location.longitude.as_deref());

    let optional = [
        ("PlaceName", location.place_name.as_deref()),
        ("GoogleMapsURL", location.google_maps_url.as_deref()),
        ("BingMapsURL", location.bing_maps_url.as_deref()),
        ("MapQuestURL", location.map_quest_url.as_deref()),
        ("StateFIPS", location.state_fips.as_deref()),
        ("CountyFIPS", location.county_fips.as_deref()),
        ("ClassFP", location.class_fp.as_deref()),
    ];
    for (name, value) in optional {
        if value.is_some() {
            line(out, "\t", name, value);
        }
    }

    writeln!(out, "\tAddress Components:").ok();
    for (name, value) in location.address_components.entries() {
        line(out, "\t  ", name, value);
    }
}

fn render_error(out: &mut String, details: &ErrorDetails) {
    line(out, "", "Type", details.kind.as_deref());
    line(out, "", "TypeCode", details.type_code.as_deref());
    line(out, "", "Desc", details.desc.as_deref());
    line(out, "", "DescCode", details.desc_code.as_deref());
}
