//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use common::{
    Endpoint, now_millis,
    models::{
        AcknowledgeReminderRequest, AuthResponse, CreateMedicationRequest, CreateReminderRequest,
        HealthResponse, LoginRequest, MessageResponse, RegisterRequest, ReminderStatus,
        SyncRequest, SyncResponse, UpdateMedicationRequest, UpdateReminderRequest, User,
    },
};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    repositories::MOCK_USER_ID,
    state::AppState,
    validation::{validate_email, validate_name, validate_password},
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let placeholder = Uuid::nil();

    let protected_routes = Router::new()
        .route(Endpoint::Logout.route(), post(logout))
        .route(Endpoint::CurrentUser.route(), get(current_user))
        .route(
            Endpoint::Medications.route(),
            get(get_medications).post(create_medication),
        )
        .route(
            Endpoint::Medication(placeholder).route(),
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
        .route(
            Endpoint::Reminders.route(),
            get(get_reminders).post(create_reminder),
        )
        .route(
            Endpoint::Reminder(placeholder).route(),
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .route(
            Endpoint::AcknowledgeReminder(placeholder).route(),
            post(acknowledge_reminder),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route(Endpoint::Health.route(), get(health_check))
        .route(Endpoint::Login.route(), post(login))
        .route(Endpoint::Register.route(), post(register))
        .route(Endpoint::SyncReminders.route(), post(sync_reminders))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "api-service".to_string(),
    })
}

fn issue_token(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(AuthResponse { token, user })
}

/// User login endpoint
///
/// Any well-formed email with a non-empty password is accepted.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.email);

    if validate_email(&payload.email).is_err() || payload.password.is_empty() {
        warn!("Rejected login for user: {}", payload.email);
        return Err(ApiError::InvalidCredentials);
    }

    let user = state.user_repository.find_by_email(&payload.email);
    Ok(Json(issue_token(&state, user)?))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Registration attempt for user: {}", payload.email);

    validate_name(&payload.name).map_err(ApiError::BadRequest)?;
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    let user = state.user_repository.create(&payload.name, &payload.email);
    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// Logout endpoint; revokes the token the request was made with
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("Logout request for user: {}", user.id);
    state.revoke(&user.token, user.expires_at).await;

    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// Profile of the authenticated user
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    Json(state.user_repository.find_by_id(user.id, &user.email))
}

/// Get all medications
pub async fn get_medications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    Json(state.medication_repository.get_all(user.id))
}

/// Get a medication by ID
pub async fn get_medication(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let medication = state
        .medication_repository
        .find_by_id(user.id, id)
        .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;

    Ok(Json(medication))
}

/// Create a new medication
pub async fn create_medication(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateMedicationRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Medication name is required".to_string()));
    }
    if payload.times.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one dose time is required".to_string(),
        ));
    }

    let medication = state.medication_repository.create(user.id, payload);
    info!("Created medication {} for user {}", medication.id, user.id);
    Ok((StatusCode::CREATED, Json(medication)))
}

/// Update a medication
pub async fn update_medication(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMedicationRequest>,
) -> ApiResult<impl IntoResponse> {
    let medication = state
        .medication_repository
        .update(user.id, id, payload)
        .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;

    Ok(Json(medication))
}

/// Delete a medication
pub async fn delete_medication(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.medication_repository.delete(user.id, id) {
        return Err(ApiError::NotFound("Medication not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Medication deleted successfully".to_string(),
    }))
}

/// Get all reminders
pub async fn get_reminders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    Json(state.reminder_repository.get_all(user.id))
}

/// Get a reminder by ID
pub async fn get_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let reminder = state
        .reminder_repository
        .find_by_id(user.id, id)
        .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;

    Ok(Json(reminder))
}

/// Create a new reminder
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateReminderRequest>,
) -> ApiResult<impl IntoResponse> {
    if state
        .medication_repository
        .find_by_id(user.id, payload.medication_id)
        .is_none()
    {
        return Err(ApiError::BadRequest("Unknown medication".to_string()));
    }

    let reminder = state.reminder_repository.create(user.id, payload);
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Update a reminder
pub async fn update_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReminderRequest>,
) -> ApiResult<impl IntoResponse> {
    let reminder = state
        .reminder_repository
        .update(user.id, id, payload)
        .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;

    Ok(Json(reminder))
}

/// Delete a reminder
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.reminder_repository.delete(user.id, id) {
        return Err(ApiError::NotFound("Reminder not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Reminder deleted successfully".to_string(),
    }))
}

/// Acknowledge a reminder, marking it taken unless another status is given
pub async fn acknowledge_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcknowledgeReminderRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = payload.status.unwrap_or(ReminderStatus::Taken);
    if !matches!(status, ReminderStatus::Taken | ReminderStatus::Skipped) {
        return Err(ApiError::BadRequest(
            "A reminder can only be acknowledged as taken or skipped".to_string(),
        ));
    }

    let reminder = state
        .reminder_repository
        .acknowledge(user.id, id, status)
        .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;

    info!("Reminder {} acknowledged as {:?}", id, status);
    Ok(Json(reminder))
}

/// Background sync endpoint
///
/// Called by the notification worker, which has no access to the user's
/// token, so this route is public and serves the mock account.
pub async fn sync_reminders(
    State(state): State<AppState>,
    Json(payload): Json<SyncRequest>,
) -> impl IntoResponse {
    let reminders = state
        .reminder_repository
        .updated_since(MOCK_USER_ID, payload.last_sync);
    info!(
        "Sync since {}: {} changed reminders",
        payload.last_sync,
        reminders.len()
    );

    Json(SyncResponse {
        reminders,
        synced_at: now_millis(),
    })
}
