use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// One structural problem with a submitted form field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Per-field structural errors; reported before any database interaction.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Lookup by id matched no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Insert/update/delete failed; the enclosing transaction was rolled back.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: diesel::result::Error,
    },

    /// A submitted foreign key references no existing row.
    #[error("{0}")]
    BadReference(&'static str),

    /// Could not check a connection out of the pool.
    #[error("database connection unavailable")]
    Pool(#[from] diesel::r2d2::PoolError),
}

// Read-only queries carry no operation-specific message; CRUD paths build
// their own Persistence errors instead.
impl From<diesel::result::Error> for ApiError {
    fn from(source: diesel::result::Error) -> Self {
        ApiError::Persistence {
            message: "database query failed".into(),
            source,
        }
    }
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        ApiError::NotFound { entity, id }
    }

    pub fn persistence(message: impl Into<String>, source: diesel::result::Error) -> Self {
        ApiError::Persistence {
            message: message.into(),
            source,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadReference(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Pool(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Persistence { message, source } = self {
            log::error!("{message}: {source}");
        }
        let message = self.to_string();
        let body = ErrorBody {
            error: &message,
            fields: match self {
                ApiError::Validation(fields) => Some(fields),
                _ => None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_error_kinds() {
        let validation = ApiError::Validation(vec![FieldError::new("name", "name is required")]);
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ApiError::not_found("Venue", 7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::persistence(
                "An error occurred. Venue could not be deleted.",
                diesel::result::Error::RollbackTransaction,
            )
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ApiError::not_found("Artist", 42);
        assert_eq!(err.to_string(), "Artist 42 not found");
    }
}
