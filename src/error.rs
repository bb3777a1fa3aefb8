#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { status: u16, url: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Please provide a rating between 1 and 5.")]
    InvalidRating(i64),

    #[error("Checkout already in progress")]
    CheckoutInProgress,

    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, ShopError>;
