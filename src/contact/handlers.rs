use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::CurrentUser,
    contact::{
        dto::{ContactListResponse, CreateContactRequest, UpdateContactRequest},
        repo::ContactMessage,
    },
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contact))
        .route("/", get(get_contacts))
        .route("/:id", get(get_contact))
        .route("/:id", put(update_contact))
        .route("/:id", delete(delete_contact))
}

#[instrument(skip(state, payload))]
pub async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessage>>), ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.message.is_empty() {
        warn!("contact request with missing fields");
        return Err(ApiError::validation(
            "Please provide name, email, and message",
        ));
    }

    let contact =
        ContactMessage::create(&state.db, &payload.name, &payload.email, &payload.message)
            .await?;

    info!(contact_id = %contact.id, email = %contact.email, "contact message created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message_data(
            "Contact message sent successfully",
            contact,
        )),
    ))
}

#[instrument(skip(state, _user))]
pub async fn get_contacts(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<ContactListResponse>, ApiError> {
    let contacts = ContactMessage::list_all(&state.db).await?;
    Ok(Json(ContactListResponse {
        success: true,
        count: contacts.len(),
        data: contacts,
    }))
}

#[instrument(skip(state, _user))]
pub async fn get_contact(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactMessage>>, ApiError> {
    let contact = ContactMessage::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact message not found"))?;
    Ok(Json(ApiResponse::data(contact)))
}

#[instrument(skip(state, _user, payload))]
pub async fn update_contact(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactRequest>,
) -> Result<Json<ApiResponse<ContactMessage>>, ApiError> {
    // Provided fields must still pass the presence check; absent fields are
    // left alone.
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("message", &payload.message),
    ] {
        if value.as_deref() == Some("") {
            warn!(field, "contact update with empty field");
            return Err(ApiError::validation(format!("{field} must not be empty")));
        }
    }

    let updated = ContactMessage::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.message.as_deref(),
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Contact message not found"))?;

    info!(contact_id = %updated.id, status = ?updated.status, "contact message updated");
    Ok(Json(ApiResponse::message_data(
        "Contact status updated",
        updated,
    )))
}

#[instrument(skip(state, _user))]
pub async fn delete_contact(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !ContactMessage::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Contact message not found"));
    }
    info!(contact_id = %id, "contact message deleted");
    Ok(Json(ApiResponse::message("Contact message deleted")))
}
