use crate::assistant::{bot_reply, health_advice};
use crate::directory::{all_specialties, doctors_by_specialty};
use crate::errors::AppError;
use crate::models::{
    Appointment, AppointmentPatch, ChatRequest, ChatResponse, DateRangeQuery, HealthData,
    NewAppointment, NewSymptom, Profile, ProfileUpdate, SummaryResponse, Symptom, SymptomLogged,
    SymptomPatch, UpcomingQuery,
};
use crate::state::AppState;
use crate::store::DEFAULT_UPCOMING_DAYS;
use crate::storage::persist_data;
use crate::summary::{build_summary, build_summary_at};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let data = state.data.lock().await;
    let summary = build_summary_at(today, &data);
    Html(render_index(&data, &summary))
}

pub async fn list_symptoms(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<Symptom>>, AppError> {
    let data = state.data.lock().await;
    let symptoms = match (range.start, range.end) {
        (Some(start), Some(end)) => {
            if start > end {
                return Err(AppError::bad_request("start must not be after end"));
            }
            data.symptoms.query_by_date_range(start, end)
        }
        (None, None) => data.symptoms.all().iter().rev().cloned().collect(),
        _ => return Err(AppError::bad_request("start and end must be given together")),
    };
    Ok(Json(symptoms))
}

pub async fn add_symptom(
    State(state): State<AppState>,
    Json(mut payload): Json<NewSymptom>,
) -> Result<Json<SymptomLogged>, AppError> {
    payload.symptom = payload.symptom.trim().to_string();
    if payload.symptom.is_empty() {
        return Err(AppError::bad_request("symptom must not be empty"));
    }

    let now = Local::now().naive_local();
    let symptom = commit(&state, |data| Ok(data.symptoms.add(payload, now))).await?;
    info!(id = symptom.id, severity = symptom.severity, "symptom logged");

    let advice = health_advice(&symptom).to_string();
    Ok(Json(SymptomLogged { symptom, advice }))
}

pub async fn update_symptom(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<SymptomPatch>,
) -> Result<Json<Symptom>, AppError> {
    let symptom = commit(&state, |data| {
        data.symptoms
            .update(id, patch)
            .ok_or_else(|| AppError::not_found("symptom", id))
    })
    .await?;
    info!(id, "symptom updated");
    Ok(Json(symptom))
}

pub async fn delete_symptom(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Symptom>, AppError> {
    let symptom = commit(&state, |data| {
        data.symptoms
            .delete(id)
            .ok_or_else(|| AppError::not_found("symptom", id))
    })
    .await?;
    info!(id, "symptom deleted");
    Ok(Json(symptom))
}

pub async fn list_appointments(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    let data = state.data.lock().await;
    Json(data.appointments.all().iter().rev().cloned().collect())
}

pub async fn upcoming_appointments(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Json<Vec<Appointment>> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    let data = state.data.lock().await;
    Json(data.appointments.upcoming(today(), days))
}

pub async fn add_appointment(
    State(state): State<AppState>,
    Json(payload): Json<NewAppointment>,
) -> Result<Json<Appointment>, AppError> {
    if payload.doctor.trim().is_empty() || payload.specialty.trim().is_empty() {
        return Err(AppError::bad_request("doctor and specialty are required"));
    }

    let appointment = commit(&state, |data| Ok(data.appointments.add(payload))).await?;
    info!(
        id = appointment.id,
        date = %appointment.date,
        status = appointment.status.as_str(),
        "appointment booked"
    );
    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = commit(&state, |data| {
        data.appointments
            .update(id, patch)
            .ok_or_else(|| AppError::not_found("appointment", id))
    })
    .await?;
    info!(id, status = appointment.status.as_str(), "appointment updated");
    Ok(Json(appointment))
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = commit(&state, |data| {
        data.appointments
            .cancel(id)
            .ok_or_else(|| AppError::not_found("appointment", id))
    })
    .await?;
    info!(id, "appointment cancelled");
    Ok(Json(appointment))
}

pub async fn get_specialties() -> Json<Vec<&'static str>> {
    Json(all_specialties())
}

pub async fn get_doctors(Path(specialty): Path<String>) -> Json<Vec<&'static str>> {
    Json(doctors_by_specialty(&specialty))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(build_summary(&data))
}

pub async fn chat(Json(payload): Json<ChatRequest>) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("message must not be empty"));
    }
    Ok(Json(ChatResponse {
        reply: bot_reply(message).to_string(),
    }))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    let data = state.data.lock().await;
    Json(data.profile.clone())
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = commit(&state, |data| {
        data.profile.update(update);
        Ok(data.profile.clone())
    })
    .await?;
    info!("profile updated");
    Ok(Json(profile))
}

/// Applies `change` to a copy of the data and swaps it in only once the
/// copy is on disk, so a failed write leaves memory untouched.
async fn commit<T>(
    state: &AppState,
    change: impl FnOnce(&mut HealthData) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let result = change(&mut next)?;
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(result)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
