/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - /health は匿名アクセス可、/patients 系は AuthCtx 必須 (extractor 側で 401)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    patients::{
        create_patient, get_patient, inactivate_patient, list_active_patients, list_patients,
        update_patient,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/active", get(list_active_patients))
        .route(
            "/patients/{id}",
            get(get_patient).put(update_patient).delete(inactivate_patient),
        )
}
