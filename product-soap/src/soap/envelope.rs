use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{AppError, Result};

const SOAP11_NS: &[u8] = b"http://schemas.xmlsoap.org/soap/envelope/";
const SOAP12_NS: &[u8] = b"http://www.w3.org/2003/05/soap-envelope";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    Soap11,
    Soap12,
}

impl SoapVersion {
    pub fn namespace(self) -> &'static str {
        match self {
            SoapVersion::Soap11 => "http://schemas.xmlsoap.org/soap/envelope/",
            SoapVersion::Soap12 => "http://www.w3.org/2003/05/soap-envelope",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            SoapVersion::Soap11 => "text/xml; charset=utf-8",
            SoapVersion::Soap12 => "application/soap+xml; charset=utf-8",
        }
    }

    fn from_namespace(ns: &[u8]) -> Option<Self> {
        match ns {
            SOAP11_NS => Some(SoapVersion::Soap11),
            SOAP12_NS => Some(SoapVersion::Soap12),
            _ => None,
        }
    }
}

/// An RPC call decoded from a SOAP body.
#[derive(Debug, Clone, PartialEq)]
pub struct SoapRequest {
    pub version: SoapVersion,
    pub operation: String,
    pub params: BTreeMap<String, String>,
}

impl SoapRequest {
    /// Argument text, with empty elements reported as absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Position of the reader inside the envelope.
enum Scope {
    Envelope,
    Header,
    Body,
    Operation,
    Param(String),
    /// Anything nested below an argument, or unknown envelope children.
    Skipped,
}

/// Reads the envelope, returning the version it was sent in alongside the
/// decode result so a failure can still be answered in the caller's version.
pub fn read_request(xml: &str) -> (Option<SoapVersion>, Result<SoapRequest>) {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut version = None;
    let mut stack: Vec<Scope> = Vec::new();
    let mut operation: Option<String> = None;
    let mut params = BTreeMap::new();
    let mut body_seen = false;

    loop {
        let (ns, event) = match reader.read_resolved_event() {
            Ok((ResolveResult::Bound(Namespace(ns)), event)) => (Some(ns.to_vec()), event),
            Ok((_, event)) => (None, event),
            Err(e) => return (version, Err(malformed(e))),
        };

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                let scope = match stack.last() {
                    None => {
                        let detected = ns.as_deref().and_then(SoapVersion::from_namespace);
                        if local != "Envelope" || detected.is_none() {
                            return (version, Err(malformed("root element is not a SOAP Envelope")));
                        }
                        version = detected;
                        Scope::Envelope
                    }
                    Some(Scope::Envelope) => match local.as_str() {
                        "Header" => Scope::Header,
                        "Body" => {
                            body_seen = true;
                            Scope::Body
                        }
                        _ => Scope::Skipped,
                    },
                    Some(Scope::Body) => {
                        if operation.is_some() {
                            Scope::Skipped
                        } else {
                            operation = Some(local);
                            Scope::Operation
                        }
                    }
                    Some(Scope::Operation) => {
                        params.entry(local.clone()).or_insert_with(String::new);
                        Scope::Param(local)
                    }
                    Some(Scope::Header | Scope::Param(_) | Scope::Skipped) => Scope::Skipped,
                };

                if !is_empty {
                    stack.push(scope);
                }
            }
            Event::Text(ref t) => {
                if let Some(Scope::Param(name)) = stack.last() {
                    match t.unescape() {
                        Ok(text) => append(&mut params, name, &text),
                        Err(e) => return (version, Err(malformed(e))),
                    }
                }
            }
            Event::CData(ref c) => {
                if let Some(Scope::Param(name)) = stack.last() {
                    let text = String::from_utf8_lossy(c).into_owned();
                    append(&mut params, name, &text);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let result = match (version, operation) {
        (Some(version), Some(operation)) => Ok(SoapRequest {
            version,
            operation,
            params,
        }),
        (None, _) => Err(malformed("missing SOAP Envelope")),
        (Some(_), None) if !body_seen => Err(malformed("missing SOAP Body")),
        (Some(_), None) => Err(malformed("SOAP Body has no operation element")),
    };

    (version, result)
}

fn append(params: &mut BTreeMap<String, String>, name: &str, text: &str) {
    params.entry(name.to_string()).or_default().push_str(text);
}

fn malformed(reason: impl ToString) -> AppError {
    AppError::MalformedEnvelope(reason.to_string())
}
