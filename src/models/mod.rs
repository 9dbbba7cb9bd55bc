pub mod account;
pub mod application;
pub mod directory;
pub mod job;
pub mod profile;
