//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation
//! failures are raised before any database write so a rejected save leaves
//! the store untouched.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed runtime configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Input rejected before reaching the store.
    #[error("Validation error: {message}")]
    Validation {
        /// Which constraint was violated
        message: String,
    },

    /// A deal price that is not strictly below the original price.
    #[error("Invalid pricing: deal price {deal} must be below original price {original}")]
    InvalidPricing {
        /// Submitted original price
        original: f64,
        /// Submitted deal price
        deal: f64,
    },

    /// A monetary amount that is zero, negative, or not finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// A supplier rating outside the 0-5 scale.
    #[error("Rating must be between 0 and 5, got {rating}")]
    InvalidRating {
        /// The offending rating
        rating: i32,
    },

    /// A drag gesture referencing positions outside the current list.
    #[error("Reorder indices out of range: {from} -> {to} in a list of {len}")]
    ReorderOutOfRange {
        /// Source index of the gesture
        from: usize,
        /// Destination index of the gesture
        to: usize,
        /// Length of the list at the time of the gesture
        len: usize,
    },

    /// Menu lookup by id failed.
    #[error("Menu not found: {id}")]
    MenuNotFound {
        /// The missing id
        id: i64,
    },

    /// Category lookup by id failed.
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// The missing id
        id: i64,
    },

    /// Product lookup by id failed.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The missing id
        id: i64,
    },

    /// A submitted variant id that has no persisted counterpart.
    #[error("Variant not found: {id}")]
    VariantNotFound {
        /// The missing id
        id: i64,
    },

    /// Deal lookup by id failed.
    #[error("Deal not found: {id}")]
    DealNotFound {
        /// The missing id
        id: i64,
    },

    /// Expense lookup by id failed.
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The missing id
        id: i64,
    },

    /// Supplier lookup by id failed.
    #[error("Supplier not found: {id}")]
    SupplierNotFound {
        /// The missing id
        id: i64,
    },

    /// Banner lookup by id failed.
    #[error("Banner not found: {id}")]
    BannerNotFound {
        /// The missing id
        id: i64,
    },

    /// Blog post lookup by id or slug failed.
    #[error("Blog post not found: {id}")]
    BlogPostNotFound {
        /// The missing id or slug
        id: String,
    },

    /// Login rejected. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session token unknown, expired, or tied to a deactivated user.
    #[error("Session is expired or unknown")]
    InvalidSession,

    /// Argon2 hashing or hash parsing failed.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher diagnostic
        message: String,
    },

    /// The CDN rejected an image upload.
    #[error("Image upload failed: {message}")]
    Upload {
        /// Status and body returned by the CDN
        message: String,
    },

    /// Database error surfaced from the store.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP transport error talking to the CDN.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error reading configuration or seed files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
