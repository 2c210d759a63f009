/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: db: PgPool, auth: TokenProvider など
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<TokenProvider>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<TokenProvider>) -> Self {
        Self { db, auth }
    }
}
