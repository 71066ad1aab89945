//! Repository contracts consumed by the domain services.

pub mod token;

pub use token::TokenRepository;

#[cfg(test)]
pub use token::MockTokenRepository;
