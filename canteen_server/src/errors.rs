use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use canteen_engine::{CanteenApiError, FeedbackApiError, OrderFlowError, PaymentApiError, UserApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Auth token invalid or not provided")]
    CouldNotDeserializeAuthToken,
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
    #[error("Out of stock. {0}")]
    InsufficientStock(String),
    #[error("The callback signature is invalid.")]
    SignatureInvalid,
    #[error("Payment gateway error. {0}")]
    PaymentGatewayError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::CouldNotDeserializeAuthToken => StatusCode::UNAUTHORIZED,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::PoorlyFormattedToken(_) => StatusCode::BAD_REQUEST,
                AuthError::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::InsufficientStock(_) => StatusCode::CONFLICT,
            Self::SignatureInvalid => StatusCode::FORBIDDEN,
            Self::PaymentGatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No bearer token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidQuantity(_) => Self::InvalidRequestBody(e.to_string()),
            OrderFlowError::MenuNotFound(_) | OrderFlowError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::InsufficientStock { .. } => Self::InsufficientStock(e.to_string()),
            OrderFlowError::InvalidStatusTransition(_) => Self::InsufficientPermissions(e.to_string()),
            OrderFlowError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}

impl From<PaymentApiError> for ServerError {
    fn from(e: PaymentApiError) -> Self {
        match e {
            PaymentApiError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            PaymentApiError::OrderNotPayable { .. } => Self::InvalidRequestBody(e.to_string()),
            PaymentApiError::SignatureInvalid => Self::SignatureInvalid,
            PaymentApiError::MalformedCallback(_) => Self::InvalidRequestBody(e.to_string()),
            PaymentApiError::GatewayError(e) => Self::PaymentGatewayError(e),
            PaymentApiError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}

impl From<FeedbackApiError> for ServerError {
    fn from(e: FeedbackApiError) -> Self {
        match e {
            FeedbackApiError::OrderNotFound(_) | FeedbackApiError::FeedbackNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            FeedbackApiError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}

impl From<CanteenApiError> for ServerError {
    fn from(e: CanteenApiError) -> Self {
        match e {
            CanteenApiError::CanteenNotFound(_) | CanteenApiError::MenuNotFound(_) => Self::NoRecordFound(e.to_string()),
            CanteenApiError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}

impl From<UserApiError> for ServerError {
    fn from(e: UserApiError) -> Self {
        match e {
            UserApiError::UserNotFound(_) => Self::NoRecordFound(e.to_string()),
            UserApiError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}
