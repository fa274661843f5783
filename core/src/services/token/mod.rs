//! Token lifecycle service
//!
//! Operates on issued codes as [`Token`](crate::domain::entities::Token)
//! values whose expiry can be extended, refreshed or invalidated.

mod service;


pub use service::TokenService;
