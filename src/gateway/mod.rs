//! Gateway Module
//!
//! Caching HTTP access to the metadata service.
//!
//! # Cache domains
//! - Catalog: movie and series listings, details, credits, videos
//! - Discovery: genre lists and genre listings
//! - Person: profiles, filmographies, images
//! - Search: movie, series, person and multi search

mod client;
mod endpoints;

pub use client::ApiGateway;
