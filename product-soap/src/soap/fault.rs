use http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    Sender,
    Receiver,
}

/// A SOAP fault, independent of the envelope version it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: FaultCode,
    pub subcode: Option<&'static str>,
    pub reason: String,
    pub status: StatusCode,
}

impl SoapFault {
    pub fn bad_arguments() -> Self {
        Self {
            code: FaultCode::Sender,
            subcode: Some("rpc:BadArguments"),
            reason: "Processing Error".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn procedure_not_present() -> Self {
        Self {
            code: FaultCode::Sender,
            subcode: Some("rpc:ProcedureNotPresent"),
            reason: "Procedure not present".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn malformed_envelope() -> Self {
        Self {
            code: FaultCode::Sender,
            subcode: None,
            reason: "Malformed SOAP envelope".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal() -> Self {
        Self {
            code: FaultCode::Receiver,
            subcode: None,
            reason: "Internal Error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `Code/Value` text for SOAP 1.2.
    pub fn soap12_code(&self) -> &'static str {
        match self.code {
            FaultCode::Sender => "soap:Sender",
            FaultCode::Receiver => "soap:Receiver",
        }
    }

    /// `faultcode` text for SOAP 1.1.
    pub fn soap11_code(&self) -> &'static str {
        match self.code {
            FaultCode::Sender => "soap:Client",
            FaultCode::Receiver => "soap:Server",
        }
    }
}
