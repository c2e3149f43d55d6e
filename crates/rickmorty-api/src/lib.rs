//! # rickmorty-api - Catalog API Client
//!
//! HTTP client for the public Rick & Morty catalog. Exposes the
//! [`CatalogApi`] trait consumed by the coordinators and the reqwest-backed
//! [`CatalogClient`] implementation.
//!
//! Decoding is split into a pure layer ([`response`]) so the error-envelope
//! fallback semantics are testable without a network.

pub mod client;
pub mod response;

pub use client::{CatalogApi, CatalogClient, DEFAULT_BASE_URL};
pub use response::{decode_body, ErrorEnvelope};
