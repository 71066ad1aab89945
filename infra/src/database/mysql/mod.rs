//! MySQL-specific database implementations
//!
//! MySQL implementations of repository traits using SQLx.

pub mod token_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
