//! Minimal SOAP 1.1 / 1.2 envelope handling for the product endpoint.
//!
//! Only what the four product operations need: reading an RPC-style
//! request (operation name plus flat text arguments) and writing either a
//! response element or a fault back in the caller's SOAP version.

mod envelope;
mod fault;
mod writer;

pub use envelope::{SoapRequest, SoapVersion, read_request};
pub use fault::{FaultCode, SoapFault};
pub use writer::{XmlNode, write_fault, write_response};

/// Target namespace of `productsService.wsdl`.
pub const TARGET_NAMESPACE: &str = "http://localhost:8000/products";
