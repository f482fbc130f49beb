//! Profile upsert and merge behaviour

mod support;

use std::time::Duration;

use common::{InMemoryStore, PROFILES_COLLECTION, RankedStore};
use ranking::models::{AccountType, ProfilePatch};
use ranking::{AccountService, OAuthIdentity, ProfileError, ProfileService};
use serde_json::json;
use support::{Op, RecordingStore};

fn display_name(name: &str) -> ProfilePatch {
    ProfilePatch {
        display_name: Some(name.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn first_save_creates_profile_from_defaults() {
    let store = RecordingStore::new(InMemoryStore::new());
    let service = ProfileService::new(store.clone());

    let profile = service.save_profile("new-user", &display_name("A")).await.unwrap();

    assert_eq!(profile.user_id, "new-user");
    assert_eq!(profile.display_name, "A");
    assert!(!profile.completed_profile);
    assert!(profile.interests.is_empty());
    assert!(profile.hobbies.is_empty());
    assert!(profile.created_at.is_some());
    assert_eq!(store.calls(), vec![Op::Get, Op::Put]);

    let stored = store
        .inner
        .get(PROFILES_COLLECTION, "new-user")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["displayName"], json!("A"));
    assert_eq!(stored["bio"], json!(""));
    assert_eq!(stored["skills"], json!([]));
}

#[tokio::test]
async fn later_saves_merge_instead_of_replacing() {
    let store = RecordingStore::new(InMemoryStore::new());
    let service = ProfileService::new(store.clone());

    let created = service.save_profile("u1", &display_name("A")).await.unwrap();
    store.reset();

    let patch = ProfilePatch {
        bio: Some("hello".to_string()),
        ..Default::default()
    };
    let merged = service.save_profile("u1", &patch).await.unwrap();

    assert_eq!(merged.display_name, "A");
    assert_eq!(merged.bio, "hello");
    assert_eq!(merged.created_at, created.created_at);
    assert_eq!(store.calls(), vec![Op::Get, Op::Patch]);

    let reread = service.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(reread, merged);
}

#[tokio::test]
async fn interests_are_replaced_whole() {
    let service = ProfileService::new(RecordingStore::new(InMemoryStore::new()));

    let first = ProfilePatch {
        interests: Some(vec!["X".to_string()]),
        ..Default::default()
    };
    service.save_profile("u1", &first).await.unwrap();

    let second = ProfilePatch {
        interests: Some(vec!["Y".to_string(), "Z".to_string()]),
        ..Default::default()
    };
    let profile = service.save_profile("u1", &second).await.unwrap();

    assert_eq!(profile.interests, vec!["Y", "Z"]);
}

#[tokio::test]
async fn catalog_interest_update_replaces_list() {
    let service = ProfileService::new(RecordingStore::new(InMemoryStore::new()));

    service
        .update_interests("u1", vec!["Chess".to_string(), "Hiking".to_string()])
        .await
        .unwrap();
    let profile = service
        .update_interests("u1", vec!["Poetry".to_string()])
        .await
        .unwrap();

    assert_eq!(profile.interests, vec!["Poetry"]);
    assert!(profile.updated_at.is_some());
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let service = ProfileService::new(RecordingStore::new(InMemoryStore::new()));
    assert!(service.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn completion_check_is_fail_safe() {
    let store = RecordingStore::new(InMemoryStore::new());
    let service = ProfileService::new(store.clone());

    // Absent
    assert!(!service.has_completed_profile("u1").await);

    // Present but not complete
    service.save_profile("u1", &display_name("A")).await.unwrap();
    assert!(!service.has_completed_profile("u1").await);

    // Explicitly complete
    let done = ProfilePatch {
        completed_profile: Some(true),
        ..Default::default()
    };
    service.save_profile("u1", &done).await.unwrap();
    assert!(service.has_completed_profile("u1").await);

    // Store failure
    store.fail(Op::Get);
    assert!(!service.has_completed_profile("u1").await);
}

#[tokio::test]
async fn non_boolean_completion_flag_is_not_complete() {
    let inner = InMemoryStore::new();
    let serde_json::Value::Object(doc) =
        json!({"userId": "u1", "completedProfile": "yes"})
    else {
        unreachable!();
    };
    inner.put(PROFILES_COLLECTION, "u1", doc).await.unwrap();

    let service = ProfileService::new(RecordingStore::new(inner));
    assert!(!service.has_completed_profile("u1").await);
}

#[tokio::test]
async fn save_failures_propagate() {
    let store = RecordingStore::new(InMemoryStore::new());
    store.fail(Op::Put);
    let service = ProfileService::new(store);

    let err = service.save_profile("u1", &display_name("A")).await.unwrap_err();
    assert!(matches!(err, ProfileError::Store(_)));
}

#[tokio::test]
async fn oauth_sign_in_after_registration_keeps_profile_fields() {
    let store = RecordingStore::new(InMemoryStore::new());
    let profiles = ProfileService::new(store.clone());
    let accounts = AccountService::new(profiles.clone());

    let registered = accounts
        .record_registration("u1", "ada@example.com", "Ada")
        .await
        .unwrap();
    profiles
        .update_interests("u1", vec!["Chess".to_string()])
        .await
        .unwrap();

    let identity = OAuthIdentity {
        user_id: "u1".to_string(),
        provider: AccountType::Google,
        email: None,
        display_name: Some("Ada L.".to_string()),
        photo_url: Some("https://photos.example.com/ada.png".to_string()),
    };
    let profile = accounts.record_oauth_sign_in(&identity).await.unwrap();

    assert_eq!(profile.display_name, "Ada L.");
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert_eq!(profile.interests, vec!["Chess"]);
    assert_eq!(
        profile.photo_url.as_deref(),
        Some("https://photos.example.com/ada.png")
    );
    assert_eq!(profile.created_at, registered.created_at);
    assert_eq!(profile.account_type, Some(AccountType::Email));
}

#[tokio::test]
async fn every_save_stamps_updated_at() {
    let service = ProfileService::new(RecordingStore::new(InMemoryStore::new()));

    let created = service.save_profile("u1", &display_name("A")).await.unwrap();
    let first = created.updated_at.expect("creation stamps updatedAt");

    tokio::time::sleep(Duration::from_millis(5)).await;
    let bio = ProfilePatch {
        bio: Some("hello".to_string()),
        ..Default::default()
    };
    let updated = service.save_profile("u1", &bio).await.unwrap();

    let second = updated.updated_at.expect("update stamps updatedAt");
    assert!(second > first);
    assert_eq!(updated.created_at, created.created_at);

    let stored = service.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(stored.updated_at, Some(second));
}

#[tokio::test]
async fn registration_after_oauth_sign_in_keeps_account_type() {
    let store = RecordingStore::new(InMemoryStore::new());
    let accounts = AccountService::new(ProfileService::new(store.clone()));

    let identity = OAuthIdentity {
        user_id: "u1".to_string(),
        provider: AccountType::Github,
        email: None,
        display_name: Some("Octo".to_string()),
        photo_url: None,
    };
    accounts.record_oauth_sign_in(&identity).await.unwrap();

    let profile = accounts
        .record_registration("u1", "octo@example.com", "Octo")
        .await
        .unwrap();

    assert_eq!(profile.account_type, Some(AccountType::Github));
    let stored = store
        .inner
        .get(PROFILES_COLLECTION, "u1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["accountType"], json!("github"));
}

#[tokio::test]
async fn corrupt_profile_is_not_patched() {
    let inner = InMemoryStore::new();
    let serde_json::Value::Object(doc) =
        json!({"userId": "u1", "interests": "not-a-list"})
    else {
        unreachable!();
    };
    inner.put(PROFILES_COLLECTION, "u1", doc).await.unwrap();
    let store = RecordingStore::new(inner);
    let service = ProfileService::new(store.clone());

    let bio = ProfilePatch {
        bio: Some("hello".to_string()),
        ..Default::default()
    };
    let err = service.save_profile("u1", &bio).await.unwrap_err();

    assert!(matches!(err, ProfileError::Corrupt(_)));
    assert_eq!(store.calls(), vec![Op::Get]);
    let stored = store
        .inner
        .get(PROFILES_COLLECTION, "u1")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.contains_key("bio"));
}
