/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

use uuid::Uuid;

use crate::services::auth::token_provider::TokenIdentity;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID（ここでは UUID を採用）
/// - `scopes` / `roles` は coarse-grained な権限情報
/// - `jti` は監査/相関用
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub scopes: Vec<String>,
    pub roles: Vec<String>,
    pub jti: Option<String>,
}

impl From<TokenIdentity> for AuthCtx {
    fn from(identity: TokenIdentity) -> Self {
        // `scope` is the OAuth-style space-separated form.
        let scopes = identity
            .scope
            .map(|s| s.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();

        Self {
            user_id: identity.user_id,
            scopes,
            roles: identity.roles.unwrap_or_default(),
            jti: identity.jti,
        }
    }
}
