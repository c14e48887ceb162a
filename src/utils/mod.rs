pub mod error;
pub mod logger;
pub mod url_signing;
pub mod validation;
