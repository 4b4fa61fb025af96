use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/symptoms",
            get(handlers::list_symptoms).post(handlers::add_symptom),
        )
        .route(
            "/api/symptoms/:id",
            patch(handlers::update_symptom).delete(handlers::delete_symptom),
        )
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::add_appointment),
        )
        .route(
            "/api/appointments/upcoming",
            get(handlers::upcoming_appointments),
        )
        .route("/api/appointments/:id", patch(handlers::update_appointment))
        .route(
            "/api/appointments/:id/cancel",
            post(handlers::cancel_appointment),
        )
        .route("/api/specialties", get(handlers::get_specialties))
        .route("/api/specialties/:name/doctors", get(handlers::get_doctors))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/chat", post(handlers::chat))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .with_state(state)
}
