//! HTTP inbound adapter exposing the REST endpoints and the front-end.

pub mod accounts;
pub mod diagnostics;
pub mod error;
pub mod frontend;
pub mod health;
pub mod notes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
