use crate::models::{
    Announcement, Club, CreateMeetingRequest, Meeting, MeetingKind, Member, MemberRole, Rsvp,
    RsvpStatus, UpdateMeetingRequest, User,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all data access. Handlers interact with
/// this trait and never with a concrete store, so the in-memory sample-data
/// implementation below can later be swapped for a real backend without
/// touching the HTTP layer.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn get_user(&self, id: &str) -> Option<User>;

    // --- Clubs ---
    async fn get_clubs(&self) -> Vec<Club>;
    async fn get_club(&self, id: &str) -> Option<Club>;
    // Admins sort ahead of members, then by join date.
    async fn get_club_members(&self, club_id: &str) -> Vec<Member>;

    // --- Announcements ---
    // Pinned announcements sort ahead of the rest, newest first within each group.
    async fn get_club_announcements(&self, club_id: &str) -> Vec<Announcement>;

    // --- Meetings ---
    // Listing with optional kind filter and case-insensitive search.
    async fn get_meetings(&self, kind: Option<MeetingKind>, search: Option<String>)
        -> Vec<Meeting>;
    async fn get_meeting(&self, id: &str) -> Option<Meeting>;
    async fn create_meeting(&self, req: CreateMeetingRequest, created_by: &str) -> Meeting;
    // Partial update; only `Some` fields are applied.
    async fn update_meeting(&self, id: &str, req: UpdateMeetingRequest) -> Option<Meeting>;
    async fn delete_meeting(&self, id: &str) -> bool;

    // --- RSVPs ---
    async fn get_rsvps(&self, meeting_id: &str) -> Vec<Rsvp>;
    // Upsert: a user's new answer replaces their previous one for the same
    // meeting. Returns None if the meeting does not exist.
    async fn upsert_rsvp(
        &self,
        meeting_id: &str,
        user_id: &str,
        user_name: &str,
        user_email: &str,
        status: RsvpStatus,
    ) -> Option<Rsvp>;
}

/// RepositoryState
///
/// The concrete type used to share the data layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// InMemoryRepository
///
/// Non-persistent sample-data store standing in for a real backend. Rows live
/// in `RwLock<Vec<_>>` collections; everything is recreated at process start
/// and no durability or cross-restart consistency is promised.
pub struct InMemoryRepository {
    clubs: RwLock<Vec<Club>>,
    members: RwLock<Vec<Member>>,
    meetings: RwLock<Vec<Meeting>>,
    rsvps: RwLock<Vec<Rsvp>>,
    announcements: RwLock<Vec<Announcement>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryRepository {
    /// An empty store. Useful for tests that want full control over contents.
    pub fn new() -> Self {
        Self {
            clubs: RwLock::new(Vec::new()),
            members: RwLock::new(Vec::new()),
            meetings: RwLock::new(Vec::new()),
            rsvps: RwLock::new(Vec::new()),
            announcements: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
        }
    }

    /// seeded
    ///
    /// The store loaded with the development sample data set: two clubs with
    /// their memberships, three meetings, two RSVPs, two announcements,
    /// three users.
    pub fn seeded() -> Self {
        Self {
            clubs: RwLock::new(seed_clubs()),
            members: RwLock::new(seed_members()),
            meetings: RwLock::new(seed_meetings()),
            rsvps: RwLock::new(seed_rsvps()),
            announcements: RwLock::new(seed_announcements()),
            users: RwLock::new(seed_users()),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn get_clubs(&self) -> Vec<Club> {
        self.clubs.read().await.clone()
    }

    async fn get_club(&self, id: &str) -> Option<Club> {
        self.clubs.read().await.iter().find(|c| c.id == id).cloned()
    }

    async fn get_club_members(&self, club_id: &str) -> Vec<Member> {
        let mut list: Vec<Member> = self
            .members
            .read()
            .await
            .iter()
            .filter(|m| m.club_id == club_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            let rank = |r: MemberRole| match r {
                MemberRole::Admin => 0,
                MemberRole::Member => 1,
            };
            rank(a.role)
                .cmp(&rank(b.role))
                .then(a.joined_at.cmp(&b.joined_at))
        });
        list
    }

    async fn get_club_announcements(&self, club_id: &str) -> Vec<Announcement> {
        let mut list: Vec<Announcement> = self
            .announcements
            .read()
            .await
            .iter()
            .filter(|a| a.club_id == club_id)
            .cloned()
            .collect();
        // Pinned first, newest first within each group.
        list.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.created_at.cmp(&a.created_at))
        });
        list
    }

    async fn get_meetings(
        &self,
        kind: Option<MeetingKind>,
        search: Option<String>,
    ) -> Vec<Meeting> {
        let needle = search.map(|s| s.to_lowercase());
        let mut list: Vec<Meeting> = self
            .meetings
            .read()
            .await
            .iter()
            .filter(|m| kind.is_none_or(|k| m.kind == k))
            .filter(|m| {
                needle.as_ref().is_none_or(|n| {
                    m.title.to_lowercase().contains(n)
                        || m.description.to_lowercase().contains(n)
                        || m.location.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.start_time.cmp(&b.start_time)));
        list
    }

    async fn get_meeting(&self, id: &str) -> Option<Meeting> {
        self.meetings
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    async fn create_meeting(&self, req: CreateMeetingRequest, created_by: &str) -> Meeting {
        let meeting = Meeting {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            description: req.description,
            kind: req.kind,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            agenda: req.agenda,
            max_attendees: req.max_attendees,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
            summary: None,
            recording_url: None,
        };
        self.meetings.write().await.push(meeting.clone());
        meeting
    }

    async fn update_meeting(&self, id: &str, req: UpdateMeetingRequest) -> Option<Meeting> {
        let mut meetings = self.meetings.write().await;
        let meeting = meetings.iter_mut().find(|m| m.id == id)?;

        if let Some(title) = req.title {
            meeting.title = title;
        }
        if let Some(description) = req.description {
            meeting.description = description;
        }
        if let Some(kind) = req.kind {
            meeting.kind = kind;
        }
        if let Some(date) = req.date {
            meeting.date = date;
        }
        if let Some(start_time) = req.start_time {
            meeting.start_time = start_time;
        }
        if let Some(end_time) = req.end_time {
            meeting.end_time = end_time;
        }
        if let Some(location) = req.location {
            meeting.location = location;
        }
        if let Some(agenda) = req.agenda {
            meeting.agenda = agenda;
        }
        if let Some(max_attendees) = req.max_attendees {
            meeting.max_attendees = Some(max_attendees);
        }
        if let Some(summary) = req.summary {
            meeting.summary = Some(summary);
        }
        if let Some(recording_url) = req.recording_url {
            meeting.recording_url = Some(recording_url);
        }

        Some(meeting.clone())
    }

    async fn delete_meeting(&self, id: &str) -> bool {
        let mut meetings = self.meetings.write().await;
        let before = meetings.len();
        meetings.retain(|m| m.id != id);
        let deleted = meetings.len() < before;
        if deleted {
            // Orphaned RSVPs go with the meeting.
            self.rsvps.write().await.retain(|r| r.meeting_id != id);
        }
        deleted
    }

    async fn get_rsvps(&self, meeting_id: &str) -> Vec<Rsvp> {
        self.rsvps
            .read()
            .await
            .iter()
            .filter(|r| r.meeting_id == meeting_id)
            .cloned()
            .collect()
    }

    async fn upsert_rsvp(
        &self,
        meeting_id: &str,
        user_id: &str,
        user_name: &str,
        user_email: &str,
        status: RsvpStatus,
    ) -> Option<Rsvp> {
        // Reject answers to meetings that do not exist.
        self.get_meeting(meeting_id).await?;

        let rsvp = Rsvp {
            id: Uuid::new_v4().to_string(),
            meeting_id: meeting_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
            status,
            rsvp_date: Utc::now(),
        };

        let mut rsvps = self.rsvps.write().await;
        rsvps.retain(|r| !(r.meeting_id == meeting_id && r.user_id == user_id));
        rsvps.push(rsvp.clone());
        Some(rsvp)
    }
}

// --- Seed Data ---
// The development sample set. Timestamps are fixed so repeated runs (and test
// assertions) see identical rows.

fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid seed timestamp")
        .with_timezone(&Utc)
}

fn day(iso: &str) -> NaiveDate {
    iso.parse().expect("valid seed date")
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "user-1".into(),
            email: "demo@nivaro.com".into(),
            name: "Demo User".into(),
            avatar: None,
            created_at: ts("2024-01-01T00:00:00Z"),
        },
        User {
            id: "user-2".into(),
            email: "alice@example.com".into(),
            name: "Alice Johnson".into(),
            avatar: None,
            created_at: ts("2024-01-02T00:00:00Z"),
        },
        User {
            id: "user-3".into(),
            email: "bob@example.com".into(),
            name: "Bob Smith".into(),
            avatar: None,
            created_at: ts("2024-01-03T00:00:00Z"),
        },
    ]
}

fn seed_clubs() -> Vec<Club> {
    vec![
        Club {
            id: "club-1".into(),
            name: "Tech Innovators".into(),
            description: "A community for technology enthusiasts and innovators".into(),
            avatar: None,
            owner_id: "user-1".into(),
            created_at: ts("2024-01-01T00:00:00Z"),
            updated_at: ts("2024-01-15T00:00:00Z"),
        },
        Club {
            id: "club-2".into(),
            name: "Book Club".into(),
            description: "Monthly book discussions and literary events".into(),
            avatar: None,
            owner_id: "user-2".into(),
            created_at: ts("2024-01-05T00:00:00Z"),
            updated_at: ts("2024-01-10T00:00:00Z"),
        },
    ]
}

fn seed_members() -> Vec<Member> {
    let users = seed_users();
    vec![
        Member {
            id: "member-1".into(),
            user_id: "user-1".into(),
            club_id: "club-1".into(),
            role: MemberRole::Admin,
            joined_at: ts("2024-01-01T00:00:00Z"),
            user: users[0].clone(),
        },
        Member {
            id: "member-2".into(),
            user_id: "user-2".into(),
            club_id: "club-1".into(),
            role: MemberRole::Member,
            joined_at: ts("2024-01-10T00:00:00Z"),
            user: users[1].clone(),
        },
        Member {
            id: "member-3".into(),
            user_id: "user-2".into(),
            club_id: "club-2".into(),
            role: MemberRole::Admin,
            joined_at: ts("2024-01-05T00:00:00Z"),
            user: users[1].clone(),
        },
    ]
}

fn seed_meetings() -> Vec<Meeting> {
    vec![
        Meeting {
            id: "1".into(),
            title: "Weekly Club Meeting".into(),
            description: "Our regular weekly meeting to discuss club activities and upcoming events.".into(),
            kind: MeetingKind::Meeting,
            date: day("2024-01-15"),
            start_time: "18:00".into(),
            end_time: "19:30".into(),
            location: "Room 101, Student Center".into(),
            agenda: "# Weekly Meeting Agenda\n\n## Topics\n1. Welcome new members\n2. Review last week's activities\n3. Plan upcoming events\n4. Q&A Session".into(),
            max_attendees: Some(50),
            created_by: "admin".into(),
            created_at: ts("2024-01-10T10:00:00Z"),
            summary: None,
            recording_url: None,
        },
        Meeting {
            id: "2".into(),
            title: "Photography Workshop".into(),
            description: "Learn the basics of digital photography with hands-on exercises.".into(),
            kind: MeetingKind::Workshop,
            date: day("2024-01-20"),
            start_time: "14:00".into(),
            end_time: "17:00".into(),
            location: "Art Building, Studio 2".into(),
            agenda: "# Photography Workshop\n\n## Schedule\n- **2:00-2:30 PM**: Introduction to Camera Settings\n- **2:30-3:15 PM**: Composition Techniques\n- **3:15-3:30 PM**: Break\n- **3:30-4:30 PM**: Hands-on Practice\n- **4:30-5:00 PM**: Review and Feedback".into(),
            max_attendees: Some(20),
            created_by: "admin".into(),
            created_at: ts("2024-01-08T15:30:00Z"),
            summary: None,
            recording_url: None,
        },
        Meeting {
            id: "3".into(),
            title: "Welcome Social Event".into(),
            description: "A casual social gathering to welcome new members and build community.".into(),
            kind: MeetingKind::Social,
            date: day("2024-01-25"),
            start_time: "19:00".into(),
            end_time: "22:00".into(),
            location: "Student Lounge".into(),
            agenda: "# Welcome Social\n\n## Activities\n- Icebreaker games\n- Food and refreshments\n- Group photos\n- Networking time".into(),
            max_attendees: None,
            created_by: "admin".into(),
            created_at: ts("2024-01-05T12:00:00Z"),
            summary: None,
            recording_url: None,
        },
    ]
}

fn seed_rsvps() -> Vec<Rsvp> {
    vec![
        Rsvp {
            id: "1".into(),
            meeting_id: "1".into(),
            user_id: "user1".into(),
            user_name: "John Doe".into(),
            user_email: "john@example.com".into(),
            status: RsvpStatus::Attending,
            rsvp_date: ts("2024-01-12T10:00:00Z"),
        },
        Rsvp {
            id: "2".into(),
            meeting_id: "1".into(),
            user_id: "user2".into(),
            user_name: "Jane Smith".into(),
            user_email: "jane@example.com".into(),
            status: RsvpStatus::Maybe,
            rsvp_date: ts("2024-01-13T14:30:00Z"),
        },
    ]
}

fn seed_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "announcement-1".into(),
            club_id: "club-1".into(),
            title: "Welcome New Members!".into(),
            content: "We're excited to have new members joining our tech community.".into(),
            created_by: "user-1".into(),
            created_at: ts("2024-01-15T00:00:00Z"),
            pinned: true,
        },
        Announcement {
            id: "announcement-2".into(),
            club_id: "club-1".into(),
            title: "Meeting Schedule Update".into(),
            content: "Our weekly meetings will now be held on Thursdays instead of Fridays.".into(),
            created_by: "user-1".into(),
            created_at: ts("2024-01-18T00:00:00Z"),
            pinned: false,
        },
    ]
}
