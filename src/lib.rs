#![doc = "The `taskhive` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the TaskHive API: domain"]
#![doc = "models, the credential store and task repository, JWT issuance and"]
#![doc = "verification, the authentication middleware and authorization policy,"]
#![doc = "routing configuration, and error handling. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

// lib.rs primarily declares modules for the library crate.
// The application setup (app factory) lives in main.rs; integration tests
// assemble their own App from these pieces.
