//! Lifecycle of the WhatsApp gateway session: a poller turns gateway status
//! responses into events, a driver folds events into the readiness flag.
//! The session can cycle between linked and unlinked for the whole process
//! lifetime; readiness is never persisted and is re-derived after a restart
//! by linking again.

use super::ReadyFlag;
use actix_web::client::Client;
use futures::{channel::mpsc, StreamExt};
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A linking code is pending; the operator scans it from WhatsApp's
    /// Linked Devices screen.
    PairingCode(String),
    Ready,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Unlinked,
    Ready,
}

impl SessionState {
    pub fn apply(self, event: &SessionEvent) -> SessionState {
        match event {
            SessionEvent::Ready => SessionState::Ready,
            SessionEvent::Disconnected => SessionState::Unlinked,
            SessionEvent::PairingCode(_) => self,
        }
    }

    pub fn is_ready(self) -> bool {
        matches!(self, SessionState::Ready)
    }
}

#[derive(Deserialize)]
struct GatewayStatus {
    status: String,
    qr: Option<String>,
}

impl GatewayStatus {
    fn into_event(self) -> SessionEvent {
        match self.status.as_str() {
            "ready" | "authenticated" => SessionEvent::Ready,
            "qr" => match self.qr {
                Some(code) => SessionEvent::PairingCode(code),
                None => SessionEvent::Disconnected,
            },
            _ => SessionEvent::Disconnected,
        }
    }
}

/// Polls the gateway session status and emits an event per poll. An
/// unreachable gateway counts as disconnected. Stops when the driver goes
/// away.
pub async fn watch(
    gateway_url: String,
    interval: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let client = Client::builder().timeout(POLL_TIMEOUT).finish();
    let status_url = format!("{}/session/status", gateway_url);

    loop {
        let event = poll_status(&client, &status_url).await;
        if events.unbounded_send(event).is_err() {
            break;
        }
        actix_rt::time::delay_for(interval).await;
    }
}

async fn poll_status(client: &Client, status_url: &str) -> SessionEvent {
    let mut resp = match client.get(status_url).send().await {
        Ok(resp) => resp,
        Err(err) => {
            debug!("session status poll failed: {}", err);
            return SessionEvent::Disconnected;
        }
    };
    if !resp.status().is_success() {
        debug!("session status poll returned {}", resp.status());
        return SessionEvent::Disconnected;
    }

    match resp.json::<GatewayStatus>().await {
        Ok(status) => status.into_event(),
        Err(err) => {
            debug!("session status body unreadable: {}", err);
            SessionEvent::Disconnected
        }
    }
}

/// Applies incoming events to the session state machine and mirrors the
/// result into the shared readiness flag. Transitions and new pairing codes
/// are logged once, not on every poll.
pub async fn drive(mut events: mpsc::UnboundedReceiver<SessionEvent>, ready: ReadyFlag) {
    let mut state = SessionState::Unlinked;
    let mut last_code: Option<String> = None;

    while let Some(event) = events.next().await {
        if let SessionEvent::PairingCode(code) = &event {
            if last_code.as_deref() != Some(code.as_str()) {
                info!(
                    "--- SCAN THIS CODE FROM WHATSAPP LINKED DEVICES ---\n{}",
                    code
                );
                last_code = Some(code.clone());
            }
        }

        let next = state.apply(&event);
        if next != state {
            match next {
                SessionState::Ready => info!("WhatsApp Automation Client is READY!"),
                SessionState::Unlinked => warn!("WhatsApp Client was logged out."),
            }
            state = next;
            ready.set(state.is_ready());
        }
    }
}
