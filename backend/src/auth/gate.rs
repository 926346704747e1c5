//! The authorization gate.
//!
//! Answers, for a given session and a requested resource, whether access is
//! permitted. The decision is pure and idempotent over already-fetched
//! state: nothing is retried and nothing is written. On success the resolved
//! profile is handed back so callers avoid a second lookup.

use std::sync::Arc;

use tooldeck_store::models::{AccountStatus, PlanTier, Profile, Role, Session, Tool};
use tooldeck_store::ProfileStore;

use super::errors::AuthError;

#[derive(Clone)]
pub struct Gate {
    profiles: Arc<dyn ProfileStore>,
}

impl Gate {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Gate { profiles }
    }

    /// Resolves the session's profile and checks it against the optional
    /// role and plan floors.
    ///
    /// Role and plan comparisons use the single total order defined on the
    /// enums (`user < moderator < admin`, `free < pro < premium < custom`).
    /// A session without a profile is an integrity failure and is treated
    /// exactly like a missing session.
    pub async fn authorize(
        &self,
        session: Option<&Session>,
        required_role: Option<Role>,
        required_plan: Option<PlanTier>,
    ) -> Result<Profile, AuthError> {
        let session = session.ok_or(AuthError::Unauthenticated)?;
        let profile = self
            .profiles
            .get_profile(session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if let Some(required) = required_role {
            if profile.role < required {
                return Err(AuthError::Forbidden);
            }
        }
        if let Some(required) = required_plan {
            if profile.plan < required {
                return Err(AuthError::Forbidden);
            }
        }
        Ok(profile)
    }

    /// Tool-specific gate: the account must be active, the tool must be
    /// active, and non-free tools require the profile's plan to meet the
    /// tool's minimum.
    pub fn authorize_tool(profile: &Profile, tool: &Tool) -> Result<(), AuthError> {
        if profile.account_status != AccountStatus::Active {
            return Err(AuthError::Forbidden);
        }
        if !tool.is_active {
            return Err(AuthError::Forbidden);
        }
        if !tool.is_free && profile.plan < tool.min_plan_required {
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tooldeck_store::memory::MemoryStore;
    use uuid::Uuid;

    fn session_for(user_id: Uuid) -> Session {
        let now = Utc::now();
        Session {
            token: "token".to_string(),
            user_id,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    fn tool(is_free: bool, min_plan: PlanTier) -> Tool {
        let now = Utc::now();
        Tool {
            id: Uuid::new_v4(),
            name: "Design Suite".to_string(),
            description: None,
            category_id: None,
            is_active: true,
            is_free,
            min_plan_required: min_plan,
            created_at: now,
            updated_at: now,
        }
    }

    async fn gate_with(profile: &Profile) -> Gate {
        let store = Arc::new(MemoryStore::new());
        store.insert_profile(profile.clone()).await.unwrap();
        Gate::new(store)
    }

    #[tokio::test]
    async fn missing_session_is_unauthenticated() {
        let gate = Gate::new(Arc::new(MemoryStore::new()));
        let err = gate.authorize(None, None, None).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn session_without_profile_is_unauthenticated() {
        let gate = Gate::new(Arc::new(MemoryStore::new()));
        let session = session_for(Uuid::new_v4());
        let err = gate.authorize(Some(&session), None, None).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn user_role_cannot_pass_admin_floor() {
        let profile = Profile::new("u@d.e".to_string(), "U".to_string());
        let gate = gate_with(&profile).await;
        let session = session_for(profile.id);

        let err = gate
            .authorize(Some(&session), Some(Role::Admin), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[tokio::test]
    async fn moderator_passes_moderator_floor_and_admin_passes_everything() {
        let mut moderator = Profile::new("m@d.e".to_string(), "M".to_string());
        moderator.role = Role::Moderator;
        let gate = gate_with(&moderator).await;
        let session = session_for(moderator.id);

        assert!(gate
            .authorize(Some(&session), Some(Role::Moderator), None)
            .await
            .is_ok());
        assert!(matches!(
            gate.authorize(Some(&session), Some(Role::Admin), None)
                .await
                .unwrap_err(),
            AuthError::Forbidden
        ));
    }

    #[tokio::test]
    async fn plan_floor_uses_tier_order() {
        let mut profile = Profile::new("p@d.e".to_string(), "P".to_string());
        profile.plan = PlanTier::Pro;
        let gate = gate_with(&profile).await;
        let session = session_for(profile.id);

        assert!(gate
            .authorize(Some(&session), None, Some(PlanTier::Pro))
            .await
            .is_ok());
        assert!(matches!(
            gate.authorize(Some(&session), None, Some(PlanTier::Premium))
                .await
                .unwrap_err(),
            AuthError::Forbidden
        ));
    }

    #[tokio::test]
    async fn allowed_decision_carries_the_resolved_profile() {
        let profile = Profile::new("x@d.e".to_string(), "X".to_string());
        let gate = gate_with(&profile).await;
        let session = session_for(profile.id);

        let resolved = gate.authorize(Some(&session), None, None).await.unwrap();
        assert_eq!(resolved.id, profile.id);
        assert_eq!(resolved.email, profile.email);
    }

    #[test]
    fn tool_gate_requires_active_account() {
        let mut profile = Profile::new("s@d.e".to_string(), "S".to_string());
        profile.account_status = AccountStatus::Suspended;
        let err = Gate::authorize_tool(&profile, &tool(true, PlanTier::Free)).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[test]
    fn free_tools_ignore_the_plan_floor() {
        let profile = Profile::new("f@d.e".to_string(), "F".to_string());
        assert!(Gate::authorize_tool(&profile, &tool(true, PlanTier::Premium)).is_ok());
    }

    #[test]
    fn paid_tools_enforce_the_plan_floor() {
        let mut profile = Profile::new("g@d.e".to_string(), "G".to_string());
        profile.plan = PlanTier::Pro;
        assert!(Gate::authorize_tool(&profile, &tool(false, PlanTier::Pro)).is_ok());
        assert!(matches!(
            Gate::authorize_tool(&profile, &tool(false, PlanTier::Premium)).unwrap_err(),
            AuthError::Forbidden
        ));
    }

    #[test]
    fn inactive_tools_are_forbidden_for_everyone() {
        let mut profile = Profile::new("a@d.e".to_string(), "A".to_string());
        profile.role = Role::Admin;
        profile.plan = PlanTier::Custom;
        let mut t = tool(true, PlanTier::Free);
        t.is_active = false;
        assert!(matches!(
            Gate::authorize_tool(&profile, &t).unwrap_err(),
            AuthError::Forbidden
        ));
    }
}
