//! UseCase: 接続認証処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthenticateClientUseCase::execute() メソッド
//! - ハンドシェイク時の認証（トークン検証、ユーザー照会、有効性チェック）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：認証に失敗した接続は登録されない
//! - 3 種類の失敗（トークン不正・ユーザー不在・無効化済み）がすべて
//!   拒否になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンとアクティブなユーザー
//! - 異常系：不正トークン、未知のユーザー、無効化されたユーザー

use std::sync::Arc;

use crate::domain::{AuthError, TokenVerifier, User, UserDirectory};

/// 接続認証のユースケース
pub struct AuthenticateClientUseCase {
    /// TokenVerifier（トークン検証の抽象化）
    token_verifier: Arc<dyn TokenVerifier>,
    /// UserDirectory（ユーザー照会の抽象化）
    user_directory: Arc<dyn UserDirectory>,
}

impl AuthenticateClientUseCase {
    /// 新しい AuthenticateClientUseCase を作成
    pub fn new(
        token_verifier: Arc<dyn TokenVerifier>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            token_verifier,
            user_directory,
        }
    }

    /// 接続認証を実行
    ///
    /// # Arguments
    ///
    /// * `token` - ハンドシェイクメタデータから取り出したトークン
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 認証成功（ユーザーのスナップショットを返す）
    /// * `Err(AuthError)` - 認証失敗（呼び出し側は接続を閉じる）
    pub async fn execute(&self, token: &str) -> Result<User, AuthError> {
        // 1. トークンを検証して principal を取り出す
        let user_id = self.token_verifier.verify(token).await?;

        // 2. ユーザーを照会
        let user = self
            .user_directory
            .find_by_id(&user_id)
            .await
            .ok_or(AuthError::UserNotFound)?;

        // 3. 有効なユーザーだけを通す
        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MockTokenVerifier, MockUserDirectory, UserId};

    fn test_user(id: &str, display_name: &str, is_active: bool) -> User {
        User::new(
            UserId::new(id.to_string()).unwrap(),
            DisplayName::new(display_name.to_string()).unwrap(),
            is_active,
        )
    }

    #[tokio::test]
    async fn test_authenticate_active_user_success() {
        // テスト項目: 有効なトークンとアクティブなユーザーで認証が成功する
        // given (前提条件):
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("u1".to_string()).unwrap()));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Some(test_user("u1", "Ana", true)));
        let usecase = AuthenticateClientUseCase::new(Arc::new(verifier), Arc::new(directory));

        // when (操作):
        let result = usecase.execute("valid-token").await;

        // then (期待する結果):
        let user = result.unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.display_name.as_str(), "Ana");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token_fails() {
        // テスト項目: トークン検証に失敗すると InvalidToken が返る
        // given (前提条件):
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().returning(|_| Err(AuthError::InvalidToken));
        let mut directory = MockUserDirectory::new();
        // トークンが不正ならユーザー照会は行われない
        directory.expect_find_by_id().never();
        let usecase = AuthenticateClientUseCase::new(Arc::new(verifier), Arc::new(directory));

        // when (操作):
        let result = usecase.execute("broken-token").await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_fails() {
        // テスト項目: トークンは有効だがユーザーが存在しないと UserNotFound が返る
        // given (前提条件):
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("ghost".to_string()).unwrap()));
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().returning(|_| None);
        let usecase = AuthenticateClientUseCase::new(Arc::new(verifier), Arc::new(directory));

        // when (操作):
        let result = usecase.execute("valid-token").await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_authenticate_inactive_user_fails() {
        // テスト項目: 無効化されたユーザーは UserInactive で拒否される
        // given (前提条件):
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("u2".to_string()).unwrap()));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Some(test_user("u2", "Bruno", false)));
        let usecase = AuthenticateClientUseCase::new(Arc::new(verifier), Arc::new(directory));

        // when (操作):
        let result = usecase.execute("valid-token").await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::UserInactive));
    }
}
