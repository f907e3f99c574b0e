pub mod session;

use crate::{config::Config, models::appointments::NewAppointment};
use actix_web::client::Client;
use async_trait::async_trait;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use thiserror::Error;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("messaging gateway request failed: {0}")]
    Transport(String),
    #[error("messaging gateway rejected the message (status {0})")]
    Rejected(u16),
}

/// Whether the messaging session is currently linked and able to send.
/// Written only by the session driver, read from request handlers.
#[derive(Clone, Default)]
pub struct ReadyFlag(Arc<AtomicBool>);

impl ReadyFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::SeqCst)
    }
}

/// Port the booking service talks to. The session can drop between a positive
/// readiness check and the send, so `send_booking_alert` may still fail.
#[async_trait(?Send)]
pub trait Notify {
    fn is_ready(&self) -> bool;

    async fn send_booking_alert(&self, appointment: &NewAppointment) -> Result<(), NotifyError>;
}

/// Sends booking alerts to one fixed recipient through the WhatsApp gateway.
pub struct Notifier {
    client: Client,
    messages_url: String,
    recipient_chat: String,
    ready: ReadyFlag,
}

impl Notifier {
    pub fn new(config: &Config, ready: ReadyFlag) -> Self {
        Notifier {
            client: Client::builder().timeout(SEND_TIMEOUT).finish(),
            messages_url: format!("{}/messages", config.gateway_url),
            recipient_chat: chat_id(&config.notify_recipient),
            ready,
        }
    }
}

#[async_trait(?Send)]
impl Notify for Notifier {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    async fn send_booking_alert(&self, appointment: &NewAppointment) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "chatId": self.recipient_chat,
            "message": format_alert(appointment),
        });

        let resp = self
            .client
            .post(self.messages_url.as_str())
            .send_json(&payload)
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        if !resp.status().is_success() {
            return Err(NotifyError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

fn chat_id(recipient: &str) -> String {
    if recipient.contains('@') {
        recipient.to_string()
    } else {
        format!("{}@c.us", recipient)
    }
}

fn format_alert(appointment: &NewAppointment) -> String {
    format!(
        "*NEW APPOINTMENT CONFIRMED*\n\n\
         Patient: {}\n\
         Contact: {}\n\
         Service: {}\n\
         Date: {}\n\n\
         _This is an automated notification from your website._",
        appointment.name, appointment.phone, appointment.service, appointment.appointment_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_gets_chat_suffix() {
        assert_eq!(chat_id("918080301527"), "918080301527@c.us");
    }

    #[test]
    fn full_chat_id_is_kept_as_is() {
        assert_eq!(chat_id("918080301527@c.us"), "918080301527@c.us");
    }

    #[test]
    fn alert_embeds_all_booking_fields() {
        let alert = format_alert(&NewAppointment {
            name: "Jane Doe".to_string(),
            phone: "5551234567".to_string(),
            service: "Cleaning".to_string(),
            appointment_date: "2024-06-01".to_string(),
        });

        assert!(alert.contains("Patient: Jane Doe"));
        assert!(alert.contains("Contact: 5551234567"));
        assert!(alert.contains("Service: Cleaning"));
        assert!(alert.contains("Date: 2024-06-01"));
    }
}
