//! # Middleware Module
//!
//! Middleware intercepts HTTP requests before they reach route handlers.
//! The validation middleware here either forwards a request downstream or
//! short-circuits it with a 401 response.
//!
//! ## Our Middleware
//! - `validate`: Runs the registered authorizers against the request's session

pub mod validate;
