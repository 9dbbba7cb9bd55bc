pub mod crypto;
pub mod payload;
pub mod token;
pub mod validation;
