use crate::schema::appointments;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct Appointment {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub appointment_date: String,
    pub created_at: NaiveDateTime,
}

/// Client-supplied part of a row. `id` and `created_at` are assigned by the
/// database on insert and never accepted from the outside.
#[derive(Clone, Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub appointment_date: String,
}
