pub mod claims;
pub mod factory;
pub mod jwks;
pub mod key_cache;
pub mod token_verifier;

pub use claims::ClaimSet;
pub use factory::build_token_verifier;
pub use jwks::HttpJwksSource;
pub use key_cache::JwksCache;
pub use token_verifier::TokenVerifier;
