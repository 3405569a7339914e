pub mod service;

pub use service::{SEED_TOKENS, TokenService, generate_token};
