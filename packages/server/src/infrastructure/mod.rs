//! Infrastructure 層（ドメイン層 trait の具体実装と DTO）

pub mod auth;
pub mod dto;
pub mod registry;
pub mod socket;
