//! jsonwebtoken を使った TokenVerifier / TokenIssuer 実装
//!
//! ## 責務
//!
//! - HS256 署名付き JWT の発行と検証
//! - claim からの principal（ユーザー ID）の取り出し
//!
//! ## 設計ノート
//!
//! 失効時刻は発行時に `iat + TTL` で焼き込む。検証は jsonwebtoken の
//! 既定検証（exp 必須）に任せ、発行側の現在時刻だけ Clock で差し替え
//! られるようにしてある（期限切れトークンをテストで作るため）。

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, TokenIssueError, TokenIssuer, TokenVerifier, UserId};
use hiroba_shared::time::Clock;

/// JWT の claim
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// principal（ユーザー ID）
    id: String,
    /// 発行時刻（エポック秒）
    iat: i64,
    /// 失効時刻（エポック秒）
    exp: i64,
}

/// HS256 JWT による TokenVerifier / TokenIssuer 実装
pub struct JwtTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenVerifier {
    /// 新しい JwtTokenVerifier を作成する
    ///
    /// # Arguments
    ///
    /// * `secret` - HS256 の共有鍵
    /// * `token_ttl_secs` - 発行するトークンの有効期間（秒）
    /// * `clock` - 発行時刻の取得に使う Clock
    pub fn new(secret: &str, token_ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            token_ttl_secs,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenVerifier {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenIssueError> {
        let iat = self.clock.now_jst_millis() / 1000;
        let claims = Claims {
            id: user_id.as_str().to_string(),
            iat,
            exp: iat + self.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenIssueError::Signing(e.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("token rejected: {}", e);
            AuthError::InvalidToken
        })?;

        UserId::new(data.claims.id).map_err(|_| AuthError::InvalidToken)
    }
}
