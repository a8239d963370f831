use axum::BoxError;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("Database connection failure: {0}")]
    DatabaseConnectionFailure(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token lifetime must be positive and representable, got {0} minutes")]
    InvalidTokenLifetime(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account disabled")]
    AccountDisabled,
    #[error("Unauthenticated: {0}")]
    Unauthenticated(&'static str),
    #[error("Forbidden")]
    Forbidden,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("User not found")]
    UserNotFound,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Category already exists")]
    CategoryAlreadyExists,
    #[error("Category still has products")]
    CategoryInUse,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Token expiry out of range")]
    TokenExpiryOutOfRange,
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl Error {
    pub(crate) const INVALID_TOKEN: Self = Error::Unauthenticated("Invalid or expired token");
    pub(crate) const MISSING_SUBJECT: Self =
        Error::Unauthenticated("Invalid token: missing user id");
    pub(crate) const UNKNOWN_SUBJECT: Self = Error::Unauthenticated("User not found");
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::StoreUnavailable(_)
            | Error::TokenExpiryOutOfRange
            | Error::Jwt(_)
            | Error::Bcrypt(_) => {
                tracing::error!("{:?}", self)
            }
            _ => tracing::debug!("{:?}", self),
        }

        let (status, message) = match self {
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Error::AccountDisabled => (StatusCode::FORBIDDEN, "Account disabled"),
            Error::Unauthenticated(message) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    message,
                )
                    .into_response();
            }
            Error::Forbidden => (StatusCode::FORBIDDEN, "Account disabled"),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            Error::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable"),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            Error::CategoryNotFound => (StatusCode::NOT_FOUND, "Category not found"),
            Error::CategoryAlreadyExists => (StatusCode::CONFLICT, "Category already exists"),
            Error::CategoryInUse => (StatusCode::CONFLICT, "Category still has products"),
            Error::ProductNotFound => (StatusCode::NOT_FOUND, "Product not found"),
            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email"),
            Error::InvalidPassword(message)
            | Error::InvalidCategory(message)
            | Error::InvalidProduct(message) => {
                return (StatusCode::BAD_REQUEST, message).into_response();
            }
            Error::TokenExpiryOutOfRange => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Token expiry out of range")
            }
            Error::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JWT error"),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error"),
        };

        (status, message).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
