pub mod error;
pub mod lock;
pub mod logger;
pub mod validation;
