//! services/app/src/shell.rs
//!
//! Defines the application's shared state and the splash timer.

use std::sync::Arc;
use std::time::Duration;

use edusmart_core::session::{AuthEvent, Session};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::ai::AiCapability;
use crate::config::Config;

/// How long the splash screen stays up before advancing to the welcome
/// screen on its own.
pub const SPLASH_DURATION: Duration = Duration::from_millis(3000);

//=========================================================================================
// AppState
//=========================================================================================

/// The shared application state, created once at startup. The session behind
/// the mutex is the single source of truth for what is visible now.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub ai: Arc<AiCapability>,
    pub config: Arc<Config>,
}

//=========================================================================================
// SplashTimer
//=========================================================================================

/// Fires `AuthEvent::SplashTimeout` once, 3000 ms after the session enters
/// the splash screen. Dropping (or cancelling) the timer before it fires
/// guarantees the event is never delivered, so a torn-down shell cannot
/// transition a session it no longer owns.
pub struct SplashTimer {
    token: CancellationToken,
}

impl SplashTimer {
    /// Starts the timer against the given session.
    pub fn start(session: Arc<Mutex<Session>>) -> Self {
        let token = CancellationToken::new();
        let timer_token = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = timer_token.cancelled() => {}
                _ = tokio::time::sleep(SPLASH_DURATION) => {
                    session.lock().await.handle_auth(AuthEvent::SplashTimeout);
                }
            }
        });

        Self { token }
    }

    /// Cancels the timer. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for SplashTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
