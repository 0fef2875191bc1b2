//! 認証コラボレータの実装（トークン検証・ユーザー照会）

mod directory;
mod jwt;

pub use directory::{InMemoryUserDirectory, SeedError};
pub use jwt::JwtTokenVerifier;
