use std::fmt;

use crate::soap::SoapFault;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    MigrationError(sqlx::migrate::MigrateError),
    ConfigError(String),
    InternalError(String),
    /// A required argument is missing, empty, zero or unparsable.
    InvalidArgument(String),
    UnknownOperation(String),
    MalformedEnvelope(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::MigrationError(e) => write!(f, "Migration error: {}", e),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::UnknownOperation(op) => write!(f, "Unknown operation: {}", op),
            AppError::MalformedEnvelope(msg) => write!(f, "Malformed SOAP envelope: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::MigrationError(err)
    }
}

impl From<AppError> for SoapFault {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidArgument(ref msg) => {
                tracing::debug!("Rejected SOAP arguments: {}", msg);
                SoapFault::bad_arguments()
            }
            AppError::UnknownOperation(ref op) => {
                tracing::debug!("SOAP operation not present: {}", op);
                SoapFault::procedure_not_present()
            }
            AppError::MalformedEnvelope(ref msg) => {
                tracing::debug!("Malformed SOAP envelope: {}", msg);
                SoapFault::malformed_envelope()
            }
            AppError::DatabaseError(ref e) => {
                tracing::error!("Database error: {:?}", e);
                SoapFault::internal()
            }
            ref other => {
                tracing::error!("{}", other);
                SoapFault::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::soap::FaultCode;

    #[test]
    fn invalid_argument_maps_to_sender_fault() {
        let fault = SoapFault::from(AppError::InvalidArgument("name is required".to_string()));

        assert_eq!(fault.code, FaultCode::Sender);
        assert_eq!(fault.subcode, Some("rpc:BadArguments"));
        assert_eq!(fault.reason, "Processing Error");
        assert_eq!(fault.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_error_maps_to_receiver_fault() {
        let fault = SoapFault::from(AppError::DatabaseError(sqlx::Error::PoolTimedOut));

        assert_eq!(fault.code, FaultCode::Receiver);
        assert_eq!(fault.subcode, None);
        assert_eq!(fault.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_operation_maps_to_procedure_not_present() {
        let fault = SoapFault::from(AppError::UnknownOperation("Nope".to_string()));

        assert_eq!(fault.subcode, Some("rpc:ProcedureNotPresent"));
        assert_eq!(fault.status, StatusCode::BAD_REQUEST);
    }
}
