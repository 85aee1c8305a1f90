//! AGI response model.
//!
//! ## Wire shape
//!
//! Both operations return the same JSON envelope:
//!
//! ```json
//! { "SearchInfo": { ... }, "Locations": [ ... ], "Error": null }
//! ```
//!
//! Field names are PascalCase and case-sensitive. The service omits any field
//! it cannot determine, and sometimes sends an explicit `null` instead, so
//! every leaf is an `Option`. `Latitude`/`Longitude` stay as text: the service
//! returns them as decimal strings and parsing them to `f64` would round.
//!
//! [`WireResponse`] mirrors the envelope one-to-one. [`SearchResult`] is the
//! normalized form: either a result set or an error, never both.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// `Error.TypeCode` value for a fatal upstream fault. Only this code is
/// eligible for failover to the backup endpoint.
pub const FATAL_TYPE_CODE: &str = "3";

/// Status block describing the search itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub number_of_locations: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub notes_desc: Option<String>,
    #[serde(default)]
    pub warnings: Option<String>,
    #[serde(default)]
    pub warning_desc: Option<String>,
}

/// A single geocoded candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precision_level: Option<f64>,
    /// Place/address classification, e.g. `"Address"` or `"PostalCode"`.
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_components: AddressComponents,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(rename = "GoogleMapsURL", default)]
    pub google_maps_url: Option<String>,
    #[serde(rename = "BingMapsURL", default)]
    pub bing_maps_url: Option<String>,
    #[serde(rename = "MapQuestURL", default)]
    pub map_quest_url: Option<String>,
    #[serde(rename = "StateFIPS", default)]
    pub state_fips: Option<String>,
    #[serde(rename = "CountyFIPS", default)]
    pub county_fips: Option<String>,
    #[serde(rename = "ClassFP", default)]
    pub class_fp: Option<String>,
}

/// Parsed address components of a [`Location`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddressComponents {
    pub premise_number: Option<String>,
    pub thoroughfare: Option<String>,
    pub double_dependent_locality: Option<String>,
    pub dependent_locality: Option<String>,
    pub locality: Option<String>,
    pub administrative_area1: Option<String>,
    pub administrative_area1_abbreviation: Option<String>,
    pub administrative_area2: Option<String>,
    pub administrative_area2_abbreviation: Option<String>,
    pub administrative_area3: Option<String>,
    pub administrative_area3_abbreviation: Option<String>,
    pub administrative_area4: Option<String>,
    pub administrative_area4_abbreviation: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "CountryISO2")]
    pub country_iso2: Option<String>,
    #[serde(rename = "CountryISO3")]
    pub country_iso3: Option<String>,
    #[serde(rename = "GoogleMapsURL")]
    pub google_maps_url: Option<String>,
    pub place_name: Option<String>,
    pub is_unincorporated: Option<String>,
    #[serde(rename = "StateFIPS")]
    pub state_fips: Option<String>,
    #[serde(rename = "CountyFIPS")]
    pub county_fips: Option<String>,
    pub census_tract: Option<String>,
    pub census_block: Option<String>,
    #[serde(rename = "CensusGeoID")]
    pub census_geo_id: Option<String>,
    #[serde(rename = "ClassFP")]
    pub class_fp: Option<String>,
    pub congress_code: Option<String>,
    #[serde(rename = "SLDUST")]
    pub sldust: Option<String>,
    #[serde(rename = "SLDLST")]
    pub sldlst: Option<String>,
    #[serde(rename = "TimeZone_UTC", alias = "Timezone_UTC")]
    pub time_zone_utc: Option<String>,
}

impl AddressComponents {
    /// Every component with its wire name, in wire order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("PremiseNumber", self.premise_number.as_deref()),
            ("Thoroughfare", self.thoroughfare.as_deref()),
            ("DoubleDependentLocality", self.double_dependent_locality.as_deref()),
            ("DependentLocality", self.dependent_locality.as_deref()),
            ("Locality", self.locality.as_deref()),
            ("AdministrativeArea1", self.administrative_area1.as_deref()),
            ("AdministrativeArea1Abbreviation", self.administrative_area1_abbreviation.as_deref()),
            ("AdministrativeArea2", self.administrative_area2.as_deref()),
            ("AdministrativeArea2Abbreviation", self.administrative_area2_abbreviation.as_deref()),
            ("AdministrativeArea3", self.administrative_area3.as_deref()),
            ("AdministrativeArea3Abbreviation", self.administrative_area3_abbreviation.as_deref()),
            ("AdministrativeArea4", self.administrative_area4.as_deref()),
            ("AdministrativeArea4Abbreviation", self.administrative_area4_abbreviation.as_deref()),
            ("PostalCode", self.postal_code.as_deref()),
            ("Country", self.country.as_deref()),
            ("CountryISO2", self.country_iso2.as_deref()),
            ("CountryISO3", self.country_iso3.as_deref()),
            ("GoogleMapsURL", self.google_maps_url.as_deref()),
            ("PlaceName", self.place_name.as_deref()),
            ("IsUnincorporated", self.is_unincorporated.as_deref()),
            ("StateFIPS", self.state_fips.as_deref()),
            ("CountyFIPS", self.county_fips.as_deref()),
            ("CensusTract", self.census_tract.as_deref()),
            ("CensusBlock", self.census_block.as_deref()),
            ("CensusGeoID", self.census_geo_id.as_deref()),
            ("ClassFP", self.class_fp.as_deref()),
            ("CongressCode", self.congress_code.as_deref()),
            ("SLDUST", self.sldust.as_deref()),
            ("SLDLST", self.sldlst.as_deref()),
            ("TimeZone_UTC", self.time_zone_utc.as_deref()),
        ]
    }

    /// Sets a component by its wire name. Returns `false` for unknown names.
    ///
    /// Used when a binding delivers components as a flat field list rather
    /// than a nested object.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "PremiseNumber" => &mut self.premise_number,
            "Thoroughfare" => &mut self.thoroughfare,
            "DoubleDependentLocality" => &mut self.double_dependent_locality,
            "DependentLocality" => &mut self.dependent_locality,
            "Locality" => &mut self.locality,
            "AdministrativeArea1" => &mut self.administrative_area1,
            "AdministrativeArea1Abbreviation" => &mut self.administrative_area1_abbreviation,
            "AdministrativeArea2" => &mut self.administrative_area2,
            "AdministrativeArea2Abbreviation" => &mut self.administrative_area2_abbreviation,
            "AdministrativeArea3" => &mut self.administrative_area3,
            "AdministrativeArea3Abbreviation" => &mut self.administrative_area3_abbreviation,
            "AdministrativeArea4" => &mut self.administrative_area4,
            "AdministrativeArea4Abbreviation" => &mut self.administrative_area4_abbreviation,
            "PostalCode" => &mut self.postal_code,
            "Country" => &mut self.country,
            "CountryISO2" => &mut self.country_iso2,
            "CountryISO3" => &mut self.country_iso3,
            "GoogleMapsURL" => &mut self.google_maps_url,
            "PlaceName" => &mut self.place_name,
            "IsUnincorporated" => &mut self.is_unincorporated,
            "StateFIPS" => &mut self.state_fips,
            "CountyFIPS" => &mut self.county_fips,
            "CensusTract" => &mut self.census_tract,
            "CensusBlock" => &mut self.census_block,
            "CensusGeoID" => &mut self.census_geo_id,
            "ClassFP" => &mut self.class_fp,
            "CongressCode" => &mut self.congress_code,
            "SLDUST" => &mut self.sldust,
            "SLDLST" => &mut self.sldlst,
            "TimeZone_UTC" | "Timezone_UTC" => &mut self.time_zone_utc,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Business-level error returned by the service in place of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorDetails {
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_code: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub desc_code: Option<String>,
}

impl ErrorDetails {
    /// `true` when `TypeCode` is exactly [`FATAL_TYPE_CODE`].
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.type_code.as_deref() == Some(FATAL_TYPE_CODE)
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (TypeCode {}): {} (DescCode {})",
            self.kind.as_deref().unwrap_or("unknown"),
            self.type_code.as_deref().unwrap_or("-"),
            self.desc.as_deref().unwrap_or(""),
            self.desc_code.as_deref().unwrap_or("-"),
        )
    }
}

/// One-to-one mirror of the JSON envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireResponse {
    #[serde(default)]
    pub search_info: Option<SearchInfo>,
    #[serde(default)]
    pub locations: Option<Vec<Location>>,
    #[serde(default)]
    pub error: Option<ErrorDetails>,
}

/// Payload that carried neither results nor an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("response carried neither SearchInfo/Locations nor Error")]
pub struct MalformedResponse;

/// Normalized outcome of a PlaceSearch or ReverseSearch call.
///
/// Serializes to and from the wire envelope, so a `SearchResult` can be read
/// straight off a REST body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub enum SearchResult {
    /// Results in the service's ranking order.
    Found {
        info: SearchInfo,
        locations: Vec<Location>,
    },
    Error(ErrorDetails),
}

impl SearchResult {
    /// `false` only for a fatal (`TypeCode "3"`) error. Any other error code
    /// is a final answer and counts as valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            SearchResult::Found { .. } => true,
            SearchResult::Error(details) => !details.is_fatal(),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorDetails> {
        match self {
            SearchResult::Error(details) => Some(details),
            SearchResult::Found { .. } => None,
        }
    }

    #[must_use]
    pub fn info(&self) -> Option<&SearchInfo> {
        match self {
            SearchResult::Found { info, .. } => Some(info),
            SearchResult::Error(_) => None,
        }
    }

    /// Locations in ranking order; empty for an error result.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        match self {
            SearchResult::Found { locations, .. } => locations,
            SearchResult::Error(_) => &[],
        }
    }
}

/// One-line summary, used in logs and failover diagnostics.
impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Found { info, locations } => write!(
                f,
                "{} location(s), status {}",
                locations.len(),
                info.status.as_deref().unwrap_or("-")
            ),
            SearchResult::Error(details) => write!(f, "error: {details}"),
        }
    }
}

impl TryFrom<WireResponse> for SearchResult {
    type Error = MalformedResponse;

    fn try_from(wire: WireResponse) -> Result<Self, MalformedResponse> {
        if let Some(details) = wire.error {
            return Ok(SearchResult::Error(details));
        }
        if wire.search_info.is_none() && wire.locations.is_none() {
            return Err(MalformedResponse);
        }
        Ok(SearchResult::Found {
            info: wire.search_info.unwrap_or_default(),
            locations: wire.locations.unwrap_or_default(),
        })
    }
}

impl From<SearchResult> for WireResponse {
    fn from(result: SearchResult) -> Self {
        match result {
            SearchResult::Found { info, locations } => WireResponse {
                search_info: Some(info),
                locations: Some(locations),
                error: None,
            },
            SearchResult::Error(details) => WireResponse {
                search_info: None,
                locations: None,
                error: Some(details),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient scalar deserializers
//
// The JSON binding sends numbers as numbers; the SOAP binding sends every leaf
// as text. Both must land in the same field type.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Float(f64),
    Text(String),
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(n)) => u32::try_from(n).map(Some).map_err(D::Error::custom),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!("expected integer, got {f}"))),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        #[allow(clippy::cast_precision_loss)]
        Some(Scalar::Int(n)) => Ok(Some(n as f64)),
        Some(Scalar::Float(f)) => Ok(Some(f)),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(s) => s,
    }))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
