use anyhow::Context;
use std::{env, time::Duration};

/// Environment-supplied configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Base URL of the local WhatsApp automation gateway.
    pub gateway_url: String,
    /// Fixed recipient of booking notifications: bare phone digits or a full
    /// chat id (`<digits>@c.us`).
    pub notify_recipient: String,
    pub session_poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not found")?;
        let notify_recipient =
            env::var("NOTIFY_RECIPIENT").context("NOTIFY_RECIPIENT not found")?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(port) => port.parse().context("PORT is not a valid port number")?,
            Err(_) => 5000,
        };

        let gateway_url = env::var("WHATSAPP_GATEWAY_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
            .trim_end_matches('/')
            .to_string();
        let poll_secs = match env::var("WHATSAPP_POLL_SECS") {
            Ok(secs) => secs
                .parse()
                .context("WHATSAPP_POLL_SECS is not a valid number of seconds")?,
            Err(_) => 3,
        };

        Ok(Config {
            database_url,
            host,
            port,
            gateway_url,
            notify_recipient,
            session_poll_interval: Duration::from_secs(poll_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
