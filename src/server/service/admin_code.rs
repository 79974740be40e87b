//! One-time bootstrap codes for promoting the first administrator.
//!
//! When the platform starts without any admin, a random code is generated and logged.
//! Logging in with that code grants admin rights once; the code then disappears. Codes
//! live only in memory and expire after a short TTL.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of a bootstrap code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);

const CODE_LENGTH: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone)]
struct IssuedCode {
    code: String,
    expires_at: Instant,
}

/// Issues and redeems bootstrap admin codes.
///
/// Cloning shares the same stored code.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Issues a new 32 character alphanumeric code, replacing any previous one.
    pub async fn generate(&self) -> String {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();

        *self.code.write().await = Some(IssuedCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        code
    }

    /// Redeems `input` if it matches the stored, unexpired code.
    ///
    /// A successful redemption removes the code. Expired codes are removed on sight.
    /// Mismatches leave the stored code untouched.
    pub async fn redeem(&self, input: &str) -> bool {
        let mut guard = self.code.write().await;

        let Some(issued) = guard.as_ref() else {
            return false;
        };

        if Instant::now() >= issued.expires_at {
            *guard = None;
            return false;
        }

        if issued.code == input {
            *guard = None;
            return true;
        }

        false
    }

    #[cfg(test)]
    /// Whether an unexpired code is currently outstanding.
    pub async fn is_pending(&self) -> bool {
        self.code
            .read()
            .await
            .as_ref()
            .is_some_and(|issued| Instant::now() < issued.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generates_32_character_code() {
        let service = AdminCodeService::new();
        assert!(!service.is_pending().await);

        let code = service.generate().await;

        assert_eq!(code.len(), 32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(service.is_pending().await);
    }

    #[tokio::test]
    async fn redeems_code_exactly_once() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.redeem(&code).await);
        assert!(!service.redeem(&code).await);
        assert!(!service.is_pending().await);
    }

    #[tokio::test]
    async fn wrong_code_keeps_stored_code() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(!service.redeem("definitely-not-it").await);
        assert!(service.redeem(&code).await);
    }

    #[tokio::test]
    async fn rejects_when_nothing_was_issued() {
        let service = AdminCodeService::new();
        assert!(!service.redeem("anything").await);
    }

    #[tokio::test]
    async fn expired_code_cannot_be_redeemed() {
        let service = AdminCodeService::with_ttl(Duration::from_millis(20));
        let code = service.generate().await;

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(!service.is_pending().await);
        assert!(!service.redeem(&code).await);
    }

    #[tokio::test]
    async fn regenerating_replaces_previous_code() {
        let service = AdminCodeService::new();
        let first = service.generate().await;
        let second = service.generate().await;

        assert!(!service.redeem(&first).await);
        assert!(service.redeem(&second).await);
    }
}
