pub mod auth0;
pub mod config;
pub mod hash;
pub mod records;
