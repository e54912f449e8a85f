use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad query param: {0}")]
    BadQueryParameter(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Stable classification of a [`DomainError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    BadQueryParameter,
    Database,
    Cancelled,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::BadQueryParameter => "bad_query_parameter",
            Self::Database => "database_error",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::BadQueryParameter(_) => ErrorKind::BadQueryParameter,
            Self::Database(_) => ErrorKind::Database,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller supplied something wrong (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotFound | ErrorKind::BadRequest | ErrorKind::BadQueryParameter
        )
    }

    /// Message safe to hand back to API clients.
    ///
    /// Backend and programming errors are reduced to a generic text; the full
    /// message is only meant for the server log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "database error".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        match e {
            InfraError::Database(e) => DomainError::Database(e.to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_message_is_not_leaked() {
        let err = DomainError::Database("UNIQUE constraint failed: reservations.id".into());
        assert_eq!(err.kind(), ErrorKind::Database);
        assert_eq!(err.public_message(), "database error");
        assert!(err.to_string().contains("UNIQUE constraint"));
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = DomainError::not_found("Reservation", 7);
        assert!(err.is_client_error());
        assert_eq!(err.public_message(), "Not found: Reservation with id=7");

        let err = DomainError::BadQueryParameter("invalid operator in filter: zz".into());
        assert_eq!(err.kind().as_str(), "bad_query_parameter");
        assert!(err.is_client_error());
    }

    #[test]
    fn infra_db_error_maps_to_database_kind() {
        let err: DomainError = InfraError::Database(sea_orm::DbErr::Custom("boom".into())).into();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(!err.is_client_error());
    }
}
