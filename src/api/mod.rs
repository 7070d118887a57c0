//! API clients for external services
//!
//! - TMDB: movie/TV listings and search

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
