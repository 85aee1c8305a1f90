//! Request inputs and REST URL construction.
//!
//! Every field is always sent, empty or not, in a fixed order. The service
//! treats a missing parameter and an empty one the same way, and a stable
//! parameter list keeps request logs and mocks comparable.

use reqwest::Url;

use crate::error::AgiError;

/// The two AGI operations. The name doubles as the REST path segment and the
/// SOAP operation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PlaceSearch,
    ReverseSearch,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::PlaceSearch => "PlaceSearch",
            Operation::ReverseSearch => "ReverseSearch",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for forward geocoding. All fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceSearchRequest {
    pub single_line: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub address4: String,
    pub address5: String,
    pub locality: String,
    pub administrative_area: String,
    pub postal_code: String,
    pub country: String,
    pub boundaries: String,
    pub max_results: String,
    pub search_type: String,
    pub extras: String,
}

impl PlaceSearchRequest {
    /// Wire parameters in service order, without the license key.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("SingleLine", self.single_line.as_str()),
            ("Address1", self.address1.as_str()),
            ("Address2", self.address2.as_str()),
            ("Address3", self.address3.as_str()),
            ("Address4", self.address4.as_str()),
            ("Address5", self.address5.as_str()),
            ("Locality", self.locality.as_str()),
            ("AdministrativeArea", self.administrative_area.as_str()),
            ("PostalCode", self.postal_code.as_str()),
            ("Country", self.country.as_str()),
            ("Boundaries", self.boundaries.as_str()),
            ("MaxResults", self.max_results.as_str()),
            ("SearchType", self.search_type.as_str()),
            ("Extras", self.extras.as_str()),
        ]
    }
}

/// Inputs for reverse geocoding. `latitude` and `longitude` are required by
/// the service but not checked here; a missing value comes back as an
/// upstream error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseSearchRequest {
    pub latitude: String,
    pub longitude: String,
    pub search_radius: String,
    pub country: String,
    pub max_results: String,
    pub search_type: String,
}

impl ReverseSearchRequest {
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            ..Self::default()
        }
    }

    /// Wire parameters in service order, without the license key.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Latitude", self.latitude.as_str()),
            ("Longitude", self.longitude.as_str()),
            ("SearchRadius", self.search_radius.as_str()),
            ("Country", self.country.as_str()),
            ("MaxResults", self.max_results.as_str()),
            ("SearchType", self.search_type.as_str()),
        ]
    }
}

/// Builds `<base>/<Operation>?<params>&LicenseKey=<key>` with every value
/// percent-encoded.
///
/// # Errors
///
/// Returns [`AgiError::InvalidEndpoint`] if `base` is not an absolute URL.
pub fn build_rest_url(
    base: &str,
    operation: Operation,
    params: &[(&str, &str)],
    license_key: &str,
) -> Result<Url, AgiError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), operation.as_str());
    let mut url = Url::parse(&joined).map_err(|e| AgiError::InvalidEndpoint {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("LicenseKey", license_key);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_search_url_keeps_every_field_in_order() {
        let request = PlaceSearchRequest {
            single_line: "17 Battery Place, New York, NY 10004".to_owned(),
            country: "US".to_owned(),
            max_results: "2".to_owned(),
            ..PlaceSearchRequest::default()
        };
        let url = build_rest_url(
            "https://sws.serviceobjects.com/AGI/api.svc/json",
            Operation::PlaceSearch,
            &request.params(),
            "test-key",
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sws.serviceobjects.com/AGI/api.svc/json/PlaceSearch?\
             SingleLine=17+Battery+Place%2C+New+York%2C+NY+10004\
             &Address1=&Address2=&Address3=&Address4=&Address5=\
             &Locality=&AdministrativeArea=&PostalCode=&Country=US\
             &Boundaries=&MaxResults=2&SearchType=&Extras=&LicenseKey=test-key"
        );
    }

    #[test]
    fn reverse_search_url_keeps_every_field_in_order() {
        let request = ReverseSearchRequest {
            search_radius: "1".to_owned(),
            ..ReverseSearchRequest::new("40.7039690", "-74.0166160")
        };
        let url = build_rest_url(
            "https://trial.serviceobjects.com/AGI/api.svc/json/",
            Operation::ReverseSearch,
            &request.params(),
            "k",
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://trial.serviceobjects.com/AGI/api.svc/json/ReverseSearch?\
             Latitude=40.7039690&Longitude=-74.0166160&SearchRadius=1\
             &Country=&MaxResults=&SearchType=&LicenseKey=k"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let request = PlaceSearchRequest {
            single_line: "Königsallee 1 & 2 #3".to_owned(),
            ..PlaceSearchRequest::default()
        };
        let url = build_rest_url(
            "https://example.test/json",
            Operation::PlaceSearch,
            &request.params(),
            "a/b+c",
        )
        .unwrap();

        let query = url.query().unwrap();
        assert!(query.starts_with("SingleLine=K%C3%B6nigsallee+1+%26+2+%233&"), "{query}");
        assert!(query.ends_with("LicenseKey=a%2Fb%2Bc"), "{query}");
    }

    #[test]
    fn license_key_passes_through_unmodified() {
        let url = build_rest_url(
            "https://example.test/json",
            Operation::ReverseSearch,
            &ReverseSearchRequest::default().params(),
            "WS72-ABC1-DEF2",
        )
        .unwrap();
        let key = url
            .query_pairs()
            .find(|(k, _)| k == "LicenseKey")
            .map(|(_, v)| v.into_owned());
        assert_eq!(key.as_deref(), Some("WS72-ABC1-DEF2"));
    }

    #[test]
    fn relative_base_is_rejected() {
        let err = build_rest_url("not a url", Operation::PlaceSearch, &[], "k").unwrap_err();
        assert!(matches!(err, AgiError::InvalidEndpoint { .. }));
    }
}
