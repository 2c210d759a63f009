/*
 * Responsibility
 * - HTTP 面の公開ポイント (routes() の re-export など)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod negotiate;
mod routes;

pub use routes::routes;
