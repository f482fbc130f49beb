//! Profile persistence with create-or-merge semantics
//!
//! Every mutation goes through [`ProfileService::save_profile`]: the first
//! write creates the document from defaults, later writes merge field by
//! field and never replace the whole document.

use std::sync::Arc;

use chrono::Utc;
use common::document::merge_shallow;
use common::{PROFILES_COLLECTION, RankedStore};
use tracing::{error, info};

use crate::catalog;
use crate::error::{ProfileError, ProfileResult};
use crate::models::{ProfilePatch, UserProfile};
use crate::validation;

/// Reads and writes user profiles
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn RankedStore>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(store: Arc<dyn RankedStore>) -> Self {
        Self { store }
    }

    /// Create or update a profile.
    ///
    /// Every write stamps `updatedAt`. An existing profile is patched and the
    /// merged view is returned without re-reading the store. A missing
    /// profile is created from defaults with `patch` laid over them.
    pub async fn save_profile(
        &self,
        user_id: &str,
        patch: &ProfilePatch,
    ) -> ProfileResult<UserProfile> {
        let changes = patch.clone().touched(Utc::now()).to_document()?;

        match self.store.get(PROFILES_COLLECTION, user_id).await? {
            Some(existing) => {
                info!("Updating profile for {}", user_id);
                let merged = UserProfile::from_document(merge_shallow(existing, &changes))?;
                self.store
                    .patch(PROFILES_COLLECTION, user_id, changes)
                    .await
                    .map_err(|e| {
                        error!("Failed to update profile {}: {}", user_id, e);
                        e
                    })?;

                Ok(merged)
            }
            None => {
                info!("Creating profile for {}", user_id);
                let defaults = UserProfile::new(user_id, Utc::now()).to_document()?;
                let created = merge_shallow(defaults, &changes);
                self.store
                    .put(PROFILES_COLLECTION, user_id, created.clone())
                    .await
                    .map_err(|e| {
                        error!("Failed to create profile {}: {}", user_id, e);
                        e
                    })?;

                Ok(UserProfile::from_document(created)?)
            }
        }
    }

    /// Fetch a profile; `None` when it does not exist
    pub async fn get_profile(&self, user_id: &str) -> ProfileResult<Option<UserProfile>> {
        match self.store.get(PROFILES_COLLECTION, user_id).await? {
            Some(doc) => Ok(Some(UserProfile::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Whether the profile is explicitly marked complete.
    ///
    /// Read failures count as incomplete.
    pub async fn has_completed_profile(&self, user_id: &str) -> bool {
        match self.get_profile(user_id).await {
            Ok(profile) => profile.is_some_and(|p| p.completed_profile),
            Err(e) => {
                error!("Error checking profile completion for {}: {}", user_id, e);
                false
            }
        }
    }

    pub async fn update_display_name(
        &self,
        user_id: &str,
        name: &str,
    ) -> ProfileResult<UserProfile> {
        let name = validation::validate_display_name(name).map_err(ProfileError::Invalid)?;
        let patch = ProfilePatch {
            display_name: Some(name),
            ..Default::default()
        };
        self.save_profile(user_id, &patch).await
    }

    pub async fn update_photo_url(&self, user_id: &str, url: &str) -> ProfileResult<UserProfile> {
        validation::validate_photo_url(url).map_err(ProfileError::Invalid)?;
        let patch = ProfilePatch {
            photo_url: Some(url.to_string()),
            ..Default::default()
        };
        self.save_profile(user_id, &patch).await
    }

    /// Replace the whole interest list
    pub async fn update_interests(
        &self,
        user_id: &str,
        interests: Vec<String>,
    ) -> ProfileResult<UserProfile> {
        if let Some(unknown) = interests.iter().find(|i| !catalog::is_known_interest(i)) {
            return Err(ProfileError::Invalid(format!("Unknown interest: {}", unknown)));
        }

        let patch = ProfilePatch {
            interests: Some(interests),
            ..Default::default()
        };
        self.save_profile(user_id, &patch).await
    }

    /// Replace the whole collaboration preference list
    pub async fn update_collaboration_preferences(
        &self,
        user_id: &str,
        preferences: Vec<String>,
    ) -> ProfileResult<UserProfile> {
        if let Some(unknown) = preferences
            .iter()
            .find(|p| !catalog::is_known_collaboration_type(p))
        {
            return Err(ProfileError::Invalid(format!(
                "Unknown collaboration type: {}",
                unknown
            )));
        }

        let patch = ProfilePatch {
            collaboration_preferences: Some(preferences),
            ..Default::default()
        };
        self.save_profile(user_id, &patch).await
    }

    /// Apply `patch` and mark the profile complete
    pub async fn complete_profile(
        &self,
        user_id: &str,
        patch: ProfilePatch,
    ) -> ProfileResult<UserProfile> {
        let patch = ProfilePatch {
            completed_profile: Some(true),
            ..patch
        };
        self.save_profile(user_id, &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::InMemoryStore;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_update_display_name_trims_and_touches() {
        let service = service();
        let profile = service.update_display_name("u1", "  Ada ").await.unwrap();

        assert_eq!(profile.display_name, "Ada");
        assert!(profile.updated_at.is_some());
        assert!(profile.created_at.is_some());
    }

    #[tokio::test]
    async fn test_rejects_unknown_interest() {
        let service = service();
        let err = service
            .update_interests("u1", vec!["Chess".to_string(), "Knitting".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::Invalid(_)));
        assert!(service.get_profile("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_profile_sets_flag() {
        let service = service();
        let patch = ProfilePatch {
            bio: Some("climber".to_string()),
            ..Default::default()
        };

        let profile = service.complete_profile("u1", patch).await.unwrap();
        assert!(profile.completed_profile);
        assert_eq!(profile.bio, "climber");
        assert!(service.has_completed_profile("u1").await);
    }
}
