//! Blog publishing backend with content-fingerprint recommendations.
//!
//! Blogs are fingerprinted into keyword-frequency maps when written. Readers
//! get a personalized feed ranked by similarity to their stated preferences,
//! the tags of each blog, and the blogs they have already read.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
