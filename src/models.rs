use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Application Schemas ---

/// User
///
/// A platform account. The portal carries no credential material; identity is
/// owned by the external authentication service.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Club
///
/// The primary community entity. Every meeting, RSVP, and announcement hangs
/// off a club.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub description: String,
    pub avatar: Option<String>,
    // The founding user; club admin by definition.
    pub owner_id: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// MemberRole
///
/// The RBAC field for club membership: admins manage content and invites,
/// members consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

/// Member
///
/// A user's membership in a club, with the embedded profile the frontend
/// renders on the members page.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Member {
    pub id: String,
    pub user_id: String,
    pub club_id: String,
    pub role: MemberRole,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
    pub user: User,
}

/// MeetingKind
///
/// The three meeting flavors the scheduler distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MeetingKind {
    #[default]
    Meeting,
    Workshop,
    Social,
}

/// Meeting
///
/// A scheduled club gathering. `agenda` and `summary` hold markdown rendered by
/// the frontend; `start_time`/`end_time` are wall-clock `HH:MM` strings, matching
/// the wire format the frontend already speaks.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MeetingKind,
    #[ts(type = "string")]
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub agenda: String,
    pub max_attendees: Option<u32>,
    pub created_by: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    // Post-meeting fields, absent until filled in by an update.
    pub summary: Option<String>,
    pub recording_url: Option<String>,
}

/// RsvpStatus
///
/// Serialized in kebab-case (`not-attending`) for frontend compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum RsvpStatus {
    #[default]
    Attending,
    NotAttending,
    Maybe,
}

/// Rsvp
///
/// A user's answer to a meeting invitation. At most one per (meeting, user):
/// answering again replaces the previous record.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Rsvp {
    pub id: String,
    pub meeting_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub status: RsvpStatus,
    #[ts(type = "string")]
    pub rsvp_date: DateTime<Utc>,
}

/// Announcement
///
/// Club-scoped notice. Pinned announcements sort ahead of the rest.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Announcement {
    pub id: String,
    pub club_id: String,
    pub title: String,
    pub content: String,
    pub created_by: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub pinned: bool,
}

// --- Request Payloads (Input Schemas) ---

/// CreateMeetingRequest
///
/// Input payload for scheduling a meeting (POST /api/meetings).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateMeetingRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MeetingKind,
    #[ts(type = "string")]
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub agenda: String,
    pub max_attendees: Option<u32>,
}

/// UpdateMeetingRequest
///
/// Partial update payload (PUT /api/meetings/{id}). Uses `Option<T>` for all
/// fields with `#[serde(skip_serializing_if = "Option::is_none")]` so only the
/// provided fields travel in the JSON payload. `summary` and `recording_url`
/// are only settable here, after the meeting has happened.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateMeetingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MeetingKind>,

    #[ts(type = "string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
}

/// CreateRsvpRequest
///
/// Input payload for answering a meeting invitation (POST /api/meetings/{id}/rsvps).
/// The caller's identity comes from the session, not the payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateRsvpRequest {
    pub status: RsvpStatus,
}

// --- Analytics Payloads ---

/// TrackEventRequest
///
/// Input payload for forwarding a named analytics event (POST /api/analytics/event).
/// Properties are an ordered string map so repeated dispatches serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TrackEventRequest {
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    // Page URL, for page-view style events.
    pub url: Option<String>,
}

/// ConsentRequest
///
/// Input payload for the consent toggle (POST /api/analytics/consent).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ConsentRequest {
    pub granted: bool,
}

/// ConsentStatus
///
/// Output schema for GET /api/analytics/consent.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ConsentStatus {
    pub granted: bool,
}

// --- Profile Schema (Output) ---

/// UserProfile
///
/// Output schema for the authenticated user's profile (GET /api/me).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}
