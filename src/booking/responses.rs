use crate::{models::appointments::Appointment, utils::format_time_str};
use serde::Serialize;

#[derive(Serialize)]
pub struct BookingResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct AppointmentItem {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub appointment_date: String,
    pub created_at: String,
}

impl From<Appointment> for AppointmentItem {
    fn from(row: Appointment) -> Self {
        AppointmentItem {
            id: row.id,
            name: row.name,
            phone: row.phone,
            service: row.service,
            appointment_date: row.appointment_date,
            created_at: format_time_str(&row.created_at),
        }
    }
}
