//! Web layer for the browser-facing homepage.
//!
//! Uses Askama templates for server-side rendering; the page talks to the
//! JSON API for login, registration and shortening.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
