use std::time::Duration;

use thiserror::Error;

use crate::{
    activation::{ActivationProgress, ActivationScript},
    context::SubscriptionContext,
};

/// The three screens of the protection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Paywall
    #[default]
    Landing,
    /// Cosmetic activation animation
    Loading,
    /// Static "you are protected" display
    Protected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("{message}")]
    NotSubscribed { message: String },
}

const NOT_SUBSCRIBED_MESSAGE: &str = "An active subscription is required to activate protection.";

/// Screen gate: `Landing -> Loading -> Protected -> Landing`.
///
/// Only a subscribed context may leave the landing screen.
#[derive(Debug, Clone, Default)]
pub struct ProtectionFlow {
    screen: Screen,
    script: ActivationScript,
}

impl ProtectionFlow {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn script(&self) -> &ActivationScript {
        &self.script
    }

    /// Start the activation animation. The caller measures elapsed time from
    /// here and feeds it to `advance`.
    pub fn begin_activation(&mut self, ctx: &SubscriptionContext) -> Result<Screen, GateError> {
        if !ctx.is_subscribed() {
            return Err(GateError::NotSubscribed {
                message: NOT_SUBSCRIBED_MESSAGE.to_string(),
            });
        }

        if self.screen == Screen::Landing {
            self.screen = Screen::Loading;
        }
        Ok(self.screen)
    }

    /// Move Loading to Protected once the activation script has completed.
    pub fn advance(&mut self, elapsed: Duration) -> Screen {
        if self.screen == Screen::Loading && self.script.is_complete(elapsed) {
            self.screen = Screen::Protected;
        }
        self.screen
    }

    /// Progress to render while loading.
    pub fn progress(&self, elapsed: Duration) -> Option<ActivationProgress> {
        (self.screen == Screen::Loading).then(|| self.script.progress_at(elapsed))
    }

    pub fn back_to_home(&mut self) -> Screen {
        self.screen = Screen::Landing;
        self.screen
    }
}
