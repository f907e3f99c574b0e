use crate::protocol::ApiError;
use serde::Deserialize;

/// Fields default to empty strings so an omitted field fails the same
/// validation as an empty one instead of a serde-shaped 400.
#[derive(Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub date: String,
}

impl BookingRequest {
    /// Presence check only. Phone and date formats are deliberately not
    /// validated.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty()
            || self.phone.is_empty()
            || self.service.is_empty()
            || self.date.is_empty()
        {
            return Err(ApiError::Validation);
        }
        Ok(())
    }
}
