//! Domain entities representing core business objects.

pub mod token;


pub use token::{hash_refresh_token, Claims, RefreshTokenRecord, TokenPair};
