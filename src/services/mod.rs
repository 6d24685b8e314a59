//! Services module
//!
//! This module contains business logic services: the XP ledger, the award
//! cooldown, the moderation gate, outbound replies and profile lookups.

pub mod ledger;
pub mod moderation;
pub mod notifier;
pub mod profile;
pub mod rate_limit;

// Re-export commonly used services
pub use ledger::{Standing, XpLedger};
pub use moderation::{ModerationGate, Verdict};
pub use notifier::{Notifier, SendOptions};
pub use profile::{DisplayUser, ProfileResolver};
pub use rate_limit::RateLimiter;

use teloxide::Bot;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub ledger: XpLedger,
    pub rate_limiter: RateLimiter,
    pub moderation: ModerationGate,
    pub notifier: Notifier,
    pub profiles: ProfileResolver,
    pub settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: Settings) -> Result<Self> {
        let ledger = XpLedger::new(&settings.redis)?;
        let rate_limiter = RateLimiter::new(&settings.redis, &settings.xp)?;
        let notifier = Notifier::new(bot.clone(), settings.notifier.clone());
        let moderation = ModerationGate::new(
            bot.clone(),
            ledger.clone(),
            notifier.clone(),
            settings.xp.min_xp,
        );
        let profiles = ProfileResolver::new(bot);

        Ok(Self {
            ledger,
            rate_limiter,
            moderation,
            notifier,
            profiles,
            settings,
        })
    }
}
