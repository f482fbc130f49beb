//! Profile bootstrap for sign-up and sign-in
//!
//! The identity provider authenticates the user elsewhere; this module only
//! records the outcome in the user's profile.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ProfileError, ProfileResult};
use crate::models::{AccountType, ProfilePatch, UserProfile};
use crate::profile::ProfileService;
use crate::validation;

/// Identity returned by an OAuth provider after sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthIdentity {
    pub user_id: String,
    pub provider: AccountType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Records registrations and OAuth sign-ins
#[derive(Clone)]
pub struct AccountService {
    profiles: ProfileService,
}

impl AccountService {
    /// Create a new account service
    pub fn new(profiles: ProfileService) -> Self {
        Self { profiles }
    }

    /// Create the profile of a user who just registered with email and password.
    ///
    /// A profile left by an earlier provider sign-in keeps its `accountType`.
    pub async fn record_registration(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> ProfileResult<UserProfile> {
        info!("Recording email registration for {}", user_id);

        validation::validate_email(email).map_err(ProfileError::Invalid)?;
        let display_name =
            validation::validate_display_name(display_name).map_err(ProfileError::Invalid)?;

        let exists = self.profiles.get_profile(user_id).await?.is_some();

        let patch = ProfilePatch {
            display_name: Some(display_name),
            email: Some(email.to_string()),
            account_type: (!exists).then_some(AccountType::Email),
            ..Default::default()
        };
        self.profiles.save_profile(user_id, &patch).await
    }

    /// Create or refresh the profile of a user who signed in through a provider.
    ///
    /// Fields the provider did not return are left untouched. `createdAt` and
    /// `accountType` of an existing profile are preserved.
    pub async fn record_oauth_sign_in(
        &self,
        identity: &OAuthIdentity,
    ) -> ProfileResult<UserProfile> {
        info!(
            "Recording {} sign-in for {}",
            identity.provider.as_str(),
            identity.user_id
        );

        if identity.provider == AccountType::Email {
            return Err(ProfileError::Invalid(
                "Email accounts are recorded at registration".to_string(),
            ));
        }

        // accountType is fixed by whichever sign-up created the profile
        let exists = self.profiles.get_profile(&identity.user_id).await?.is_some();

        let patch = ProfilePatch {
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone(),
            account_type: (!exists).then_some(identity.provider),
            ..Default::default()
        };
        self.profiles.save_profile(&identity.user_id, &patch).await
    }
}
