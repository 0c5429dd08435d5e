#![doc = "The `focusboard` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, persistence gateway, services,"]
#![doc = "authentication mechanisms, routing configuration, and error handling for"]
#![doc = "the FocusBoard API. It is used by the main binary (`main.rs`) to construct"]
#![doc = "and run the application, and by the integration tests to drive the full"]
#![doc = "HTTP stack against the in-memory store."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
