use nivaro_portal::models::{
    CreateMeetingRequest, MeetingKind, MemberRole, RsvpStatus, UpdateMeetingRequest,
};
use nivaro_portal::repository::{InMemoryRepository, Repository};

#[tokio::test]
async fn seeded_store_contains_the_sample_data() {
    let repo = InMemoryRepository::seeded();

    assert_eq!(repo.get_clubs().await.len(), 2);
    assert_eq!(repo.get_meetings(None, None).await.len(), 3);
    assert_eq!(repo.get_rsvps("1").await.len(), 2);

    let club = repo.get_club("club-1").await.expect("seeded club");
    assert_eq!(club.name, "Tech Innovators");
    assert_eq!(club.owner_id, "user-1");

    let user = repo.get_user("user-1").await.expect("seeded user");
    assert_eq!(user.email, "demo@nivaro.com");
}

#[tokio::test]
async fn meeting_filters_narrow_by_kind_and_search() {
    let repo = InMemoryRepository::seeded();

    let workshops = repo.get_meetings(Some(MeetingKind::Workshop), None).await;
    assert_eq!(workshops.len(), 1);
    assert_eq!(workshops[0].title, "Photography Workshop");

    // Search is case-insensitive and reaches the location field.
    let by_location = repo
        .get_meetings(None, Some("student lounge".to_string()))
        .await;
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].title, "Welcome Social Event");

    let none = repo.get_meetings(None, Some("quantum".to_string())).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn create_then_update_applies_only_provided_fields() {
    let repo = InMemoryRepository::new();

    let created = repo
        .create_meeting(
            CreateMeetingRequest {
                title: "Planning Session".to_string(),
                description: "Quarterly planning.".to_string(),
                kind: MeetingKind::Meeting,
                date: "2024-03-01".parse().unwrap(),
                start_time: "10:00".to_string(),
                end_time: "11:00".to_string(),
                location: "Room 4".to_string(),
                agenda: "# Plan".to_string(),
                max_attendees: None,
            },
            "user-2",
        )
        .await;
    assert_eq!(created.created_by, "user-2");
    assert!(created.summary.is_none());

    let updated = repo
        .update_meeting(
            &created.id,
            UpdateMeetingRequest {
                location: Some("Room 9".to_string()),
                summary: Some("Shipped the plan.".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("meeting exists");

    assert_eq!(updated.location, "Room 9");
    assert_eq!(updated.summary.as_deref(), Some("Shipped the plan."));
    // Untouched fields survive the partial update.
    assert_eq!(updated.title, "Planning Session");
    assert_eq!(updated.start_time, "10:00");

    assert!(
        repo.update_meeting("missing", UpdateMeetingRequest::default())
            .await
            .is_none()
    );
}

#[tokio::test]
async fn delete_meeting_removes_its_rsvps() {
    let repo = InMemoryRepository::seeded();

    assert!(repo.delete_meeting("1").await);
    assert!(repo.get_meeting("1").await.is_none());
    assert!(repo.get_rsvps("1").await.is_empty());

    // Deleting again reports nothing happened.
    assert!(!repo.delete_meeting("1").await);
}

#[tokio::test]
async fn rsvp_upsert_is_keyed_by_meeting_and_user() {
    let repo = InMemoryRepository::seeded();

    let first = repo
        .upsert_rsvp("1", "user-9", "Ada", "ada@example.com", RsvpStatus::Attending)
        .await
        .expect("meeting exists");
    assert_eq!(first.status, RsvpStatus::Attending);
    assert_eq!(repo.get_rsvps("1").await.len(), 3);

    // Same user, same meeting: replaced, not appended.
    let second = repo
        .upsert_rsvp("1", "user-9", "Ada", "ada@example.com", RsvpStatus::NotAttending)
        .await
        .expect("meeting exists");
    assert_eq!(second.status, RsvpStatus::NotAttending);
    let rsvps = repo.get_rsvps("1").await;
    assert_eq!(rsvps.len(), 3);
    let ada: Vec<_> = rsvps.iter().filter(|r| r.user_id == "user-9").collect();
    assert_eq!(ada.len(), 1);
    assert_eq!(ada[0].status, RsvpStatus::NotAttending);

    // A different meeting is a separate answer.
    repo.upsert_rsvp("2", "user-9", "Ada", "ada@example.com", RsvpStatus::Maybe)
        .await
        .expect("meeting exists");
    assert_eq!(repo.get_rsvps("2").await.len(), 1);

    // Unknown meetings reject the RSVP.
    assert!(
        repo.upsert_rsvp("404", "user-9", "Ada", "ada@example.com", RsvpStatus::Maybe)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn club_members_list_admins_first_with_profiles() {
    let repo = InMemoryRepository::seeded();

    let members = repo.get_club_members("club-1").await;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].role, MemberRole::Admin);
    assert_eq!(members[0].user.name, "Demo User");
    assert_eq!(members[1].role, MemberRole::Member);
    assert_eq!(members[1].user.email, "alice@example.com");

    // Membership is per club; Alice admins the book club on her own.
    let members = repo.get_club_members("club-2").await;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, "user-2");
    assert_eq!(members[0].role, MemberRole::Admin);

    assert!(repo.get_club_members("club-404").await.is_empty());
}

#[tokio::test]
async fn announcements_list_pinned_first() {
    let repo = InMemoryRepository::seeded();

    let announcements = repo.get_club_announcements("club-1").await;
    assert_eq!(announcements.len(), 2);
    assert!(announcements[0].pinned);
    assert!(!announcements[1].pinned);

    assert!(repo.get_club_announcements("club-2").await.is_empty());
}
