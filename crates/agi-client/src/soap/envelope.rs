//! SOAP 1.1 request envelopes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::AgiError;
use crate::request::Operation;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const CONTRACT: &str = "IAGISoapService";

/// Value of the `SOAPAction` header, quoted as SOAP 1.1 requires.
pub(crate) fn soap_action(namespace: &str, operation: Operation) -> String {
    format!(
        "\"{}/{CONTRACT}/{}\"",
        namespace.trim_end_matches('/'),
        operation.as_str()
    )
}

/// Writes the request envelope: every parameter in order as a child of the
/// operation element, then `LicenseKey`. Text is XML-escaped.
pub(crate) fn build_envelope(
    namespace: &str,
    operation: Operation,
    params: &[(&str, &str)],
    license_key: &str,
) -> Result<String, AgiError> {
    let mut writer = Writer::new(Vec::new());
    let w = &mut writer;
    let op = operation.as_str();

    write(w, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write(
        w,
        Event::Start(BytesStart::new("soap:Envelope").with_attributes([("xmlns:soap", SOAP_ENV_NS)])),
    )?;
    write(w, Event::Start(BytesStart::new("soap:Body")))?;
    write(
        w,
        Event::Start(BytesStart::new(op).with_attributes([("xmlns", namespace)])),
    )?;
    for &(name, value) in params {
        write_field(w, name, value)?;
    }
    write_field(w, "LicenseKey", license_key)?;
    write(w, Event::End(BytesEnd::new(op)))?;
    write(w, Event::End(BytesEnd::new("soap:Body")))?;
    write(w, Event::End(BytesEnd::new("soap:Envelope")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| AgiError::Envelope(e.to_string()))
}

fn write_field(w: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), AgiError> {
    write(w, Event::Start(BytesStart::new(name)))?;
    if !value.is_empty() {
        write(w, Event::Text(BytesText::new(value)))?;
    }
    write(w, Event::End(BytesEnd::new(name)))
}

fn write(w: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), AgiError> {
    w.write_event(event)
        .map_err(|e| AgiError::Envelope(e.to_string()))
}
