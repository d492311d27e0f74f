use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{SoapFault, SoapVersion, TARGET_NAMESPACE};
use crate::error::{AppError, Result};

const RPC_NS: &str = "http://www.w3.org/2003/05/soap-rpc";

/// Response payload tree: either a text leaf or an element with children.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Text(&'static str, String),
    Element(&'static str, Vec<XmlNode>),
}

/// Writes `<tns:{operation}Response>` holding `children` inside a SOAP body.
pub fn write_response(version: SoapVersion, operation: &str, children: &[XmlNode]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let response = format!("tns:{}Response", operation);

    open_envelope(&mut writer, version, &[("xmlns:tns", TARGET_NAMESPACE)])?;
    emit(
        &mut writer,
        Event::Start(BytesStart::new(response.as_str())),
    )?;
    for child in children {
        write_node(&mut writer, child)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new(response.as_str())))?;
    close_envelope(&mut writer)?;

    finish(writer)
}

pub fn write_fault(version: SoapVersion, fault: &SoapFault) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    match version {
        SoapVersion::Soap12 => {
            open_envelope(&mut writer, version, &[("xmlns:rpc", RPC_NS)])?;
            open(&mut writer, "soap:Fault")?;

            open(&mut writer, "soap:Code")?;
            text_element(&mut writer, "soap:Value", fault.soap12_code())?;
            if let Some(subcode) = fault.subcode {
                open(&mut writer, "soap:Subcode")?;
                text_element(&mut writer, "soap:Value", subcode)?;
                close(&mut writer, "soap:Subcode")?;
            }
            close(&mut writer, "soap:Code")?;

            open(&mut writer, "soap:Reason")?;
            emit(
                &mut writer,
                Event::Start(BytesStart::new("soap:Text").with_attributes([("xml:lang", "en")])),
            )?;
            emit(&mut writer, Event::Text(BytesText::new(&fault.reason)))?;
            close(&mut writer, "soap:Text")?;
            close(&mut writer, "soap:Reason")?;

            close(&mut writer, "soap:Fault")?;
        }
        SoapVersion::Soap11 => {
            open_envelope(&mut writer, version, &[])?;
            open(&mut writer, "soap:Fault")?;
            text_element(&mut writer, "faultcode", fault.soap11_code())?;
            text_element(&mut writer, "faultstring", &fault.reason)?;
            if let Some(subcode) = fault.subcode {
                open(&mut writer, "detail")?;
                text_element(&mut writer, "subcode", subcode)?;
                close(&mut writer, "detail")?;
            }
            close(&mut writer, "soap:Fault")?;
        }
    }

    close_envelope(&mut writer)?;

    finish(writer)
}

fn open_envelope(
    writer: &mut Writer<Vec<u8>>,
    version: SoapVersion,
    extra_namespaces: &[(&str, &str)],
) -> Result<()> {
    emit(writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:soap", version.namespace()));
    for &attr in extra_namespaces {
        envelope.push_attribute(attr);
    }
    emit(writer, Event::Start(envelope))?;

    open(writer, "soap:Body")
}

fn close_envelope(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    close(writer, "soap:Body")?;
    close(writer, "soap:Envelope")
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<()> {
    match node {
        XmlNode::Text(name, value) => text_element(writer, name, value),
        XmlNode::Element(name, children) => {
            open(writer, name)?;
            for child in children {
                write_node(writer, child)?;
            }
            close(writer, name)
        }
    }
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    open(writer, name)?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    close(writer, name)
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::InternalError(format!("Failed to write SOAP XML: {}", e)))
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::InternalError(format!("SOAP XML is not UTF-8: {}", e)))
}
