//! Event creation and listing handlers (`/api/events`).
//!
//! Creation acquires the database connection before reading the form, so a
//! missing or unreachable database fails the request before anything is
//! uploaded.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use evently_core::event::{
    parse_event_form, Event, EventForm, ImageFile, ValidatedEventForm, IMAGE_FIELD,
};
use evently_core::media::{UploadRequest, EVENT_IMAGE_FOLDER};

use crate::{handlers::EventApiError, state::AppState};

/// Body of a successful POST.
#[derive(Debug, Serialize)]
pub struct EventCreatedResponse {
    pub message: &'static str,
    pub event: Event,
}

/// Body of a successful GET.
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub message: &'static str,
    pub events: Vec<Event>,
}

/// Create an event from a multipart form (POST /api/events).
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<EventCreatedResponse>), EventApiError> {
    let store = state.db.acquire().await.map_err(EventApiError::creation)?;

    let multipart = multipart.map_err(EventApiError::creation)?;
    let form = read_event_form(multipart)
        .await
        .map_err(EventApiError::creation)?;

    let ValidatedEventForm { draft, image } = parse_event_form(form)?;

    let mut request =
        UploadRequest::image(image.bytes, EVENT_IMAGE_FOLDER).with_file_name(image.file_name);
    if let Some(content_type) = image.content_type {
        request = request.with_content_type(content_type);
    }

    let uploaded = state
        .media
        .upload(request)
        .await
        .map_err(EventApiError::creation)?;

    let event = draft.into_event(uploaded.secure_url);
    store
        .create_event(&event)
        .await
        .map_err(EventApiError::creation)?;

    tracing::info!(event_id = %event.id, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(EventCreatedResponse {
            message: "Event created successfully",
            event,
        }),
    ))
}

/// List all events, newest first (GET /api/events).
#[axum::debug_handler]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, EventApiError> {
    let store = state.db.acquire().await.map_err(EventApiError::fetch)?;
    let events = store.list_events().await.map_err(EventApiError::fetch)?;

    tracing::debug!(count = events.len(), "Listed events");

    Ok(Json(EventListResponse {
        message: "Events fetched successfully",
        events,
    }))
}

/// Drains the multipart stream into an [`EventForm`].
///
/// Text parts become fields. The `image` part is kept only when it is a
/// file; other file parts are skipped.
async fn read_event_form(mut multipart: Multipart) -> Result<EventForm, MultipartError> {
    let mut form = EventForm::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) if name == IMAGE_FIELD => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                let mut image = ImageFile::new(file_name, bytes.to_vec());
                if let Some(content_type) = content_type {
                    image = image.with_content_type(content_type);
                }
                form.set_image(image);
            }
            Some(file_name) => {
                tracing::debug!(field = %name, %file_name, "Skipping unexpected file part");
            }
            None => {
                let value = field.text().await?;
                form.insert_field(name, value);
            }
        }
    }

    Ok(form)
}
