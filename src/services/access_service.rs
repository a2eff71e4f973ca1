use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{PaymentEvent, UnlockMethod, User},
        dto::response::UnlockResponse,
    },
    repositories::UserRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Not a purchase-completed event.
    Ignored,
    UnknownUser,
    AlreadyUnlocked,
    Unlocked,
}

/// One-way LOCKED -> UNLOCKED gate in front of the quiz.
pub struct AccessService {
    user_repository: Arc<dyn UserRepository>,
    passcode: SecretString,
}

impl AccessService {
    pub fn new(user_repository: Arc<dyn UserRepository>, passcode: SecretString) -> Self {
        Self {
            user_repository,
            passcode,
        }
    }

    async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    pub async fn is_unlocked(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.get_user(user_id).await?.unlocked)
    }

    pub async fn require_unlocked(&self, user_id: &str) -> AppResult<()> {
        if self.is_unlocked(user_id).await? {
            Ok(())
        } else {
            Err(AppError::AccessDenied(
                "Quiz access is locked. Purchase access or enter a passcode to unlock."
                    .to_string(),
            ))
        }
    }

    /// Exact, case-sensitive comparison.
    pub fn passcode_matches(&self, code: &str) -> bool {
        code == self.passcode.expose_secret()
    }

    pub async fn unlock(&self, user_id: &str, code: &str) -> AppResult<UnlockResponse> {
        let user = self.get_user(user_id).await?;
        if user.unlocked {
            return Ok(UnlockResponse { unlocked: true });
        }

        if !self.passcode_matches(code) {
            log::warn!("Rejected passcode unlock attempt for user {}", user_id);
            return Ok(UnlockResponse { unlocked: false });
        }

        if self
            .user_repository
            .mark_unlocked(user_id, UnlockMethod::Passcode)
            .await?
        {
            log::info!("User {} unlocked quiz access by passcode", user_id);
        }

        Ok(UnlockResponse { unlocked: true })
    }

    /// Applies a verified payment event. Repeated confirmations for the same
    /// user are no-ops.
    pub async fn apply_payment_event(&self, event: &PaymentEvent) -> AppResult<PaymentOutcome> {
        if !event.is_purchase_completed() {
            log::debug!("Ignoring payment event of type '{}'", event.event_type);
            return Ok(PaymentOutcome::Ignored);
        }

        let user_id = event.user_id.as_deref().ok_or_else(|| {
            AppError::PaymentVerificationError(
                "purchase event carries no user_id metadata".to_string(),
            )
        })?;

        if self.user_repository.find_by_id(user_id).await?.is_none() {
            log::warn!("Payment event for unknown user {}", user_id);
            return Ok(PaymentOutcome::UnknownUser);
        }

        let changed = self
            .user_repository
            .mark_unlocked(user_id, UnlockMethod::Payment)
            .await?;

        if changed {
            log::info!(
                "User {} unlocked quiz access by payment (amount: {:?})",
                user_id,
                event.amount
            );
            Ok(PaymentOutcome::Unlocked)
        } else {
            Ok(PaymentOutcome::AlreadyUnlocked)
        }
    }
}
