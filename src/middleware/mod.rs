/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - pub fn cors(...), pub fn bearer_auth(...) など
 */
pub mod bearer_auth;
pub mod cors;
pub mod http;
