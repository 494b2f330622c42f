use crate::{
    AppState,
    analytics::AnalyticsEvent,
    auth::AuthUser,
    models::{
        self, Announcement, Club, ConsentRequest, ConsentStatus, CreateMeetingRequest,
        CreateRsvpRequest, Meeting, MeetingKind, Member, Rsvp, TrackEventRequest,
        UpdateMeetingRequest, UserProfile,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// --- Filter Structs ---

/// MeetingFilter
///
/// Accepted query parameters for the meeting listing endpoint (GET /api/meetings).
/// Used by Axum's Query extractor to safely bind HTTP query parameters.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct MeetingFilter {
    /// Optional filter on the meeting kind (`meeting` | `workshop` | `social`).
    #[serde(rename = "type")]
    pub kind: Option<MeetingKind>,
    /// Optional case-insensitive search over title, description, and location.
    pub search: Option<String>,
}

// --- Club Handlers ---

/// get_clubs
///
/// [Public Route] Lists every club on the platform.
#[utoipa::path(
    get,
    path = "/api/clubs",
    responses((status = 200, description = "All clubs", body = [Club]))
)]
pub async fn get_clubs(State(state): State<AppState>) -> Json<Vec<models::Club>> {
    let clubs = state.repo.get_clubs().await;
    Json(clubs)
}

/// get_club
///
/// [Public Route] Retrieves a single club by ID.
#[utoipa::path(
    get,
    path = "/api/clubs/{id}",
    params(("id" = String, Path, description = "Club ID")),
    responses((status = 200, description = "Found", body = Club))
)]
pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<models::Club>, StatusCode> {
    match state.repo.get_club(&id).await {
        Some(club) => Ok(Json(club)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_club_members
///
/// [Public Route] Lists a club's members, admins first.
#[utoipa::path(
    get,
    path = "/api/clubs/{id}/members",
    responses((status = 200, description = "Members", body = [Member]))
)]
pub async fn get_club_members(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Json<Vec<models::Member>> {
    let members = state.repo.get_club_members(&club_id).await;
    Json(members)
}

/// get_club_announcements
///
/// [Public Route] Lists a club's announcements, pinned first.
#[utoipa::path(
    get,
    path = "/api/clubs/{id}/announcements",
    responses((status = 200, description = "Announcements", body = [Announcement]))
)]
pub async fn get_club_announcements(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Json<Vec<models::Announcement>> {
    let announcements = state.repo.get_club_announcements(&club_id).await;
    Json(announcements)
}

// --- Meeting Handlers ---

/// get_meetings
///
/// [Public Route] Lists meetings with optional kind filter and search.
/// A search also emits a `search_performed` analytics event (consent-gated).
#[utoipa::path(
    get,
    path = "/api/meetings",
    params(MeetingFilter),
    responses((status = 200, description = "List filtered meetings", body = [Meeting]))
)]
pub async fn get_meetings(
    State(state): State<AppState>,
    Query(filter): Query<MeetingFilter>,
) -> Json<Vec<models::Meeting>> {
    let search = filter.search.clone();
    let meetings = state.repo.get_meetings(filter.kind, filter.search).await;
    if let Some(query) = search {
        state.analytics.track_search(&query, meetings.len()).await;
    }
    Json(meetings)
}

/// get_meeting
///
/// [Public Route] Retrieves a single meeting's details by ID.
#[utoipa::path(
    get,
    path = "/api/meetings/{id}",
    params(("id" = String, Path, description = "Meeting ID")),
    responses((status = 200, description = "Found", body = Meeting))
)]
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<models::Meeting>, StatusCode> {
    match state.repo.get_meeting(&id).await {
        Some(meeting) => Ok(Json(meeting)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// create_meeting
///
/// [Authenticated Route] Schedules a new meeting. The creator is the resolved
/// session identity, never a payload field.
#[utoipa::path(
    post,
    path = "/api/meetings",
    request_body = CreateMeetingRequest,
    responses((status = 201, description = "Meeting Scheduled", body = Meeting))
)]
pub async fn create_meeting(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateMeetingRequest>,
) -> (StatusCode, Json<models::Meeting>) {
    let meeting = state.repo.create_meeting(payload, &user_id).await;
    state.analytics.track_meeting_scheduled(&meeting.id).await;
    (StatusCode::CREATED, Json(meeting))
}

/// update_meeting
///
/// [Authenticated Route] Applies a partial update to a meeting, including the
/// post-meeting `summary` and `recording_url` fields.
#[utoipa::path(
    put,
    path = "/api/meetings/{id}",
    request_body = UpdateMeetingRequest,
    responses((status = 200, description = "Updated", body = Meeting))
)]
pub async fn update_meeting(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMeetingRequest>,
) -> Result<Json<models::Meeting>, StatusCode> {
    match state.repo.update_meeting(&id, payload).await {
        Some(meeting) => Ok(Json(meeting)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// delete_meeting
///
/// [Authenticated Route] Removes a meeting and its RSVPs.
#[utoipa::path(
    delete,
    path = "/api/meetings/{id}",
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_meeting(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.repo.delete_meeting(&id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// --- RSVP Handlers ---

/// get_rsvps
///
/// [Public Route] Lists the RSVPs recorded for a meeting.
#[utoipa::path(
    get,
    path = "/api/meetings/{id}/rsvps",
    responses((status = 200, description = "RSVPs", body = [Rsvp]))
)]
pub async fn get_rsvps(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Json<Vec<models::Rsvp>> {
    let rsvps = state.repo.get_rsvps(&meeting_id).await;
    Json(rsvps)
}

/// create_rsvp
///
/// [Authenticated Route] Records the caller's answer to a meeting invitation.
/// Upsert semantics: a new answer replaces the caller's previous one for the
/// same meeting. An `attending` answer emits a `meeting_joined` event.
#[utoipa::path(
    post,
    path = "/api/meetings/{id}/rsvps",
    request_body = CreateRsvpRequest,
    responses(
        (status = 201, description = "RSVP Recorded", body = Rsvp),
        (status = 404, description = "Meeting Not Found")
    )
)]
pub async fn create_rsvp(
    AuthUser { id, email, name }: AuthUser,
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
    Json(payload): Json<CreateRsvpRequest>,
) -> Result<(StatusCode, Json<models::Rsvp>), StatusCode> {
    match state
        .repo
        .upsert_rsvp(&meeting_id, &id, &name, &email, payload.status)
        .await
    {
        Some(rsvp) => {
            if rsvp.status == models::RsvpStatus::Attending {
                state.analytics.track_meeting_joined(&meeting_id).await;
            }
            Ok((StatusCode::CREATED, Json(rsvp)))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Profile Handler ---

/// get_me
///
/// [Authenticated Route] Retrieves the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/me",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_me(AuthUser { id, email, name }: AuthUser) -> Json<models::UserProfile> {
    Json(UserProfile { id, email, name })
}

// --- Analytics Handlers ---

/// track_event
///
/// [Authenticated Route] Forwards a named event from the frontend to the
/// configured analytics sink. Accepted unconditionally; whether it is actually
/// delivered depends on the provider and the consent flag.
#[utoipa::path(
    post,
    path = "/api/analytics/event",
    request_body = TrackEventRequest,
    responses((status = 202, description = "Accepted"))
)]
pub async fn track_event(
    State(state): State<AppState>,
    Json(payload): Json<TrackEventRequest>,
) -> StatusCode {
    let event = AnalyticsEvent {
        name: payload.name,
        url: payload.url,
        properties: payload.properties,
    };
    state.analytics.track_event(event).await;
    StatusCode::ACCEPTED
}

/// set_consent
///
/// [Authenticated Route] Grants or revokes analytics consent for the process.
#[utoipa::path(
    post,
    path = "/api/analytics/consent",
    request_body = ConsentRequest,
    responses((status = 200, description = "Consent Updated", body = ConsentStatus))
)]
pub async fn set_consent(
    State(state): State<AppState>,
    Json(payload): Json<ConsentRequest>,
) -> Json<models::ConsentStatus> {
    if payload.granted {
        state.analytics.grant_consent();
    } else {
        state.analytics.revoke_consent();
    }
    Json(ConsentStatus {
        granted: state.analytics.consent_status(),
    })
}

/// get_consent
///
/// [Public Route] Reports the current consent flag.
#[utoipa::path(
    get,
    path = "/api/analytics/consent",
    responses((status = 200, description = "Consent Status", body = ConsentStatus))
)]
pub async fn get_consent(State(state): State<AppState>) -> Json<models::ConsentStatus> {
    Json(ConsentStatus {
        granted: state.analytics.consent_status(),
    })
}
