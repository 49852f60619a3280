//! Admin console client for the careers backend.
//!
//! The crate is split into the HTTP layer (`api`), the session gate (`auth`),
//! view-state controllers and client-side services (`services`), and
//! plain-text renderers (`views`).

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod views;
