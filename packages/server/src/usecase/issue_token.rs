//! UseCase: 開発用トークン発行
//!
//! 本来のログインフローはゲートウェイの外側にあるため、既知ユーザーへの
//! トークン発行だけをデバッグエンドポイント向けに提供する。
//! 有効性（is_active）はここでは見ない。無効ユーザーのトークンも発行でき、
//! ハンドシェイク時にはじかれる。

use std::sync::Arc;

use crate::domain::{TokenIssuer, UserDirectory, UserId};

use super::error::IssueTokenError;

/// トークン発行のユースケース
pub struct IssueTokenUseCase {
    /// UserDirectory（ユーザー照会の抽象化）
    user_directory: Arc<dyn UserDirectory>,
    /// TokenIssuer（トークン発行の抽象化）
    token_issuer: Arc<dyn TokenIssuer>,
}

impl IssueTokenUseCase {
    /// 新しい IssueTokenUseCase を作成
    pub fn new(
        user_directory: Arc<dyn UserDirectory>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_directory,
            token_issuer,
        }
    }

    /// トークン発行を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 発行対象のユーザー ID
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 署名済みトークン
    /// * `Err(IssueTokenError)` - 未知のユーザー、または署名失敗
    pub async fn execute(&self, user_id: &UserId) -> Result<String, IssueTokenError> {
        // 1. 既知のユーザーかだけを確認
        self.user_directory
            .find_by_id(user_id)
            .await
            .ok_or_else(|| IssueTokenError::UnknownUser(user_id.as_str().to_string()))?;

        // 2. トークンを発行
        self.token_issuer
            .issue(user_id)
            .map_err(|e| IssueTokenError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MockUserDirectory, TokenIssueError, User};

    struct StubTokenIssuer;

    impl TokenIssuer for StubTokenIssuer {
        fn issue(&self, user_id: &UserId) -> Result<String, TokenIssueError> {
            Ok(format!("token-for-{}", user_id.as_str()))
        }
    }

    struct FailingTokenIssuer;

    impl TokenIssuer for FailingTokenIssuer {
        fn issue(&self, _user_id: &UserId) -> Result<String, TokenIssueError> {
            Err(TokenIssueError::Signing("boom".to_string()))
        }
    }

    fn test_user(id: &str, display_name: &str, is_active: bool) -> User {
        User::new(
            UserId::new(id.to_string()).unwrap(),
            DisplayName::new(display_name.to_string()).unwrap(),
            is_active,
        )
    }

    #[tokio::test]
    async fn test_issue_token_for_known_user() {
        // テスト項目: 既知のユーザーにトークンが発行される
        // given (前提条件):
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Some(test_user("u1", "Ana", true)));
        let usecase = IssueTokenUseCase::new(Arc::new(directory), Arc::new(StubTokenIssuer));

        // when (操作):
        let result = usecase
            .execute(&UserId::new("u1".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok("token-for-u1".to_string()));
    }

    #[tokio::test]
    async fn test_issue_token_for_inactive_user_succeeds() {
        // テスト項目: 無効ユーザーにも発行できる（拒否はハンドシェイク時）
        // given (前提条件):
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Some(test_user("u2", "Bruno", false)));
        let usecase = IssueTokenUseCase::new(Arc::new(directory), Arc::new(StubTokenIssuer));

        // when (操作):
        let result = usecase
            .execute(&UserId::new("u2".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_issue_token_for_unknown_user_fails() {
        // テスト項目: 未知のユーザーへの発行は UnknownUser になる
        // given (前提条件):
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().returning(|_| None);
        let usecase = IssueTokenUseCase::new(Arc::new(directory), Arc::new(StubTokenIssuer));

        // when (操作):
        let result = usecase
            .execute(&UserId::new("nobody".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(IssueTokenError::UnknownUser("nobody".to_string()))
        );
    }

    #[tokio::test]
    async fn test_issue_token_signing_failure() {
        // テスト項目: 署名失敗が Signing エラーとして返る
        // given (前提条件):
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Some(test_user("u1", "Ana", true)));
        let usecase = IssueTokenUseCase::new(Arc::new(directory), Arc::new(FailingTokenIssuer));

        // when (操作):
        let result = usecase
            .execute(&UserId::new("u1".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(IssueTokenError::Signing(_))));
    }
}
