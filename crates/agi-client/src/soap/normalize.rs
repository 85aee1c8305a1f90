//! SOAP response parsing and normalization into [`SearchResult`].
//!
//! The body is read into a small element tree first. The `<OpResult>` element
//! then comes in one of two shapes:
//!
//! - **typed**: `SearchInfo`, `Locations/Location*` and `Error` children that
//!   mirror the JSON envelope. Converted to JSON and deserialized through the
//!   same [`WireResponse`] as the REST binding.
//! - **key/value**: a `Response` list of `Key`/`Value` entries whose values
//!   hold records of `Field` (`Key`/`Value`) pairs. Entry keys are
//!   `SearchInfo`, `Error`, or anything containing `Locations`.
//!
//! Namespace prefixes are ignored throughout; only local names are matched.

use agi_core::{Location, SearchResult, WireResponse};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::AgiError;
use crate::request::Operation;

/// Minimal element tree. Attributes other than `nil` are dropped.
#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    nil: bool,
    children: Vec<Node>,
}

impl Node {
    fn from_start(e: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let nil = e.attributes().flatten().any(|attr| {
            attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true"
        });
        Self {
            name,
            nil,
            ..Self::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first search for the first element named `name`.
    fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    fn is_empty(&self) -> bool {
        self.nil || (self.children.is_empty() && self.text.trim().is_empty())
    }

    /// A `Key`/`Value` pair element.
    fn as_pair(&self) -> Option<(&str, &Node)> {
        let key = self.child("Key")?;
        let value = self.child("Value")?;
        Some((key.text.trim(), value))
    }
}

fn parse_tree(xml: &str) -> Result<Node, AgiError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Node::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Node::from_start(&e)),
            Ok(Event::Empty(e)) => {
                let node = Node::from_start(&e);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| AgiError::Malformed {
                    context: "SOAP body".to_owned(),
                    reason: err.to_string(),
                })?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() > 1 {
                    if let Some(done) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(done);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AgiError::Xml(e)),
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|n| n.name.clone()).unwrap_or_default();
        return Err(AgiError::Malformed {
            context: "SOAP body".to_owned(),
            reason: format!("document ended inside <{open}>"),
        });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Parses a SOAP response body for `operation`.
///
/// # Errors
///
/// - [`AgiError::Xml`] / [`AgiError::Malformed`] if the body is not a
///   well-formed document.
/// - [`AgiError::SoapFault`] if the body carries a `Fault`.
/// - [`AgiError::EmptyResponse`] if `<OperationResult>` is missing or empty.
/// - [`AgiError::Deserialize`] if the typed shape has unparseable values.
pub(crate) fn parse_response(xml: &str, operation: Operation) -> Result<SearchResult, AgiError> {
    let root = parse_tree(xml)?;

    if let Some(fault) = root.find("Fault") {
        return Err(fault_error(fault));
    }

    let result_name = format!("{}Result", operation.as_str());
    let result = match root.find(&result_name) {
        Some(node) if !node.is_empty() => node,
        _ => return Err(AgiError::EmptyResponse { operation }),
    };

    let context = format!("{operation} SOAP result");
    let typed = ["SearchInfo", "Locations", "Error"]
        .iter()
        .any(|name| result.child(name).is_some());
    let wire = if typed {
        from_typed(result, &context)?
    } else {
        from_key_value(result, operation, &context)?
    };

    SearchResult::try_from(wire).map_err(|e| AgiError::Malformed {
        context,
        reason: e.to_string(),
    })
}

/// SOAP 1.1 (`faultcode`/`faultstring`) or 1.2 (`Code/Value`, `Reason/Text`).
fn fault_error(fault: &Node) -> AgiError {
    let text_of = |path: &[&str]| -> Option<String> {
        let mut node = fault;
        for name in path {
            node = node.child(name)?;
        }
        Some(node.text.trim().to_owned())
    };
    let code = text_of(&["faultcode"])
        .or_else(|| text_of(&["Code", "Value"]))
        .unwrap_or_else(|| "unknown".to_owned());
    let message = text_of(&["faultstring"])
        .or_else(|| text_of(&["Reason", "Text"]))
        .unwrap_or_default();
    AgiError::SoapFault { code, message }
}

// ---------------------------------------------------------------------------
// Typed shape
// ---------------------------------------------------------------------------

fn from_typed(result: &Node, context: &str) -> Result<WireResponse, AgiError> {
    serde_json::from_value(to_json(result)).map_err(|e| AgiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

fn to_json(node: &Node) -> Value {
    if node.nil {
        return Value::Null;
    }
    if node.name == "Locations" {
        return Value::Array(node.children.iter().map(to_json).collect());
    }
    if node.children.is_empty() {
        let text = node.text.trim();
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_owned())
        };
    }
    let map: Map<String, Value> = node
        .children
        .iter()
        .map(|c| (c.name.clone(), to_json(c)))
        .collect();
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// Key/value shape
// ---------------------------------------------------------------------------

fn from_key_value(
    result: &Node,
    operation: Operation,
    context: &str,
) -> Result<WireResponse, AgiError> {
    let mut entries = Vec::new();
    collect_entries(result, &mut entries);
    if entries.is_empty() {
        return Err(AgiError::EmptyResponse { operation });
    }

    let mut wire = WireResponse::default();
    for (key, value) in entries {
        let records = records_of(value);
        match key {
            "SearchInfo" => {
                wire.search_info = Some(from_fields(records.concat(), context)?);
            }
            "Error" => {
                wire.error = Some(from_fields(records.concat(), context)?);
            }
            k if k.contains("Locations") => {
                let parsed = records
                    .into_iter()
                    .map(|fields| location_from_fields(fields, context))
                    .collect::<Result<Vec<_>, _>>()?;
                wire.locations.get_or_insert_with(Vec::new).extend(parsed);
            }
            other => tracing::debug!(key = other, "ignoring unknown SOAP response entry"),
        }
    }
    Ok(wire)
}

/// Top-level `Key`/`Value` entries, without descending into them.
fn collect_entries<'n>(node: &'n Node, out: &mut Vec<(&'n str, &'n Node)>) {
    for child in &node.children {
        match child.as_pair() {
            Some(pair) => out.push(pair),
            None => collect_entries(child, out),
        }
    }
}

/// Field records under an entry value. A record is any element whose
/// children include leaf `Key`/`Value` pairs; empty values are skipped.
fn records_of(node: &Node) -> Vec<Vec<(String, String)>> {
    if node.children.iter().all(|c| c.as_pair().is_none()) {
        return node.children.iter().flat_map(records_of).collect();
    }
    let fields = node
        .children
        .iter()
        .filter_map(Node::as_pair)
        .filter(|(_, value)| value.children.is_empty() && !value.text.trim().is_empty())
        .map(|(key, value)| (key.to_owned(), value.text.trim().to_owned()))
        .collect();
    vec![fields]
}

fn from_fields<T>(fields: Vec<(String, String)>, context: &str) -> Result<T, AgiError>
where
    T: serde::de::DeserializeOwned,
{
    let map: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    serde_json::from_value(Value::Object(map)).map_err(|e| AgiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Fields that live on [`Location`] itself in the key/value shape.
const LOCATION_FIELDS: [&str; 6] = [
    "PrecisionLevel",
    "Type",
    "Latitude",
    "Longitude",
    "BingMapsURL",
    "MapQuestURL",
];

/// Location-level fields go through the same deserializer as the typed
/// shape; the rest are address components.
fn location_from_fields(
    fields: Vec<(String, String)>,
    context: &str,
) -> Result<Location, AgiError> {
    let (own, components): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|(key, _)| LOCATION_FIELDS.contains(&key.as_str()));

    let mut location: Location = from_fields(own, context)?;
    for (key, value) in components {
        if !location.address_components.set_field(&key, value) {
            tracing::debug!(field = %key, "ignoring unknown location field");
        }
    }
    Ok(location)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
