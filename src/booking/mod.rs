mod requests;
mod responses;

use crate::{
    database,
    models::appointments::NewAppointment,
    notify::{Notify, Notifier},
    protocol::ApiError,
    DbPool,
};
use actix_web::{get, post, web, HttpResponse};
use log::{debug, warn};

use self::{
    requests::BookingRequest,
    responses::{AppointmentItem, BookingResponse},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_booking).service(list_bookings);
}

/// How the notification attempt of an already-saved booking turned out.
/// All three variants are reported as success; callers tell them apart by
/// the message text.
#[derive(Debug, PartialEq)]
enum BookingOutcome {
    Notified,
    NotifyFailed,
    Skipped,
}

impl BookingOutcome {
    fn message(&self) -> &'static str {
        match self {
            BookingOutcome::Notified => "Appointment saved and WhatsApp notification sent!",
            BookingOutcome::NotifyFailed => "Appointment saved, but WhatsApp notification failed.",
            BookingOutcome::Skipped => "Appointment saved. (WhatsApp sync in progress)",
        }
    }
}

/// Best-effort notification step. Runs only after the row is durably saved
/// and never fails the booking.
async fn notify_outcome<N: Notify>(notifier: &N, appointment: &NewAppointment) -> BookingOutcome {
    if !notifier.is_ready() {
        debug!("WhatsApp client not ready yet, appointment saved to DB only");
        return BookingOutcome::Skipped;
    }
    match notifier.send_booking_alert(appointment).await {
        Ok(()) => BookingOutcome::Notified,
        Err(err) => {
            warn!("WhatsApp Notification Error: {}", err);
            BookingOutcome::NotifyFailed
        }
    }
}

#[post("/bookings")]
async fn create_booking(
    pool: web::Data<DbPool>,
    notifier: web::Data<Notifier>,
    info: web::Json<BookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let info = info.into_inner();
    info.validate()?;

    let data = NewAppointment {
        name: info.name,
        phone: info.phone,
        service: info.service,
        appointment_date: info.date,
    };
    let id = database::insert_appointment(&pool, data.clone())
        .await
        .map_err(|err| ApiError::storage("Failed to save appointment", err))?;
    debug!("appointment {} saved", id);

    let outcome = notify_outcome(notifier.get_ref(), &data).await;
    Ok(HttpResponse::Ok().json(BookingResponse {
        message: outcome.message().to_string(),
    }))
}

#[get("/bookings")]
async fn list_bookings(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let rows = database::list_appointments(&pool)
        .await
        .map_err(|err| ApiError::storage("Failed to fetch appointments", err))?;

    let items: Vec<AppointmentItem> = rows.into_iter().map(AppointmentItem::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotifyError;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct StubNotifier {
        ready: bool,
        fail: bool,
        sends: Cell<u32>,
    }

    impl StubNotifier {
        fn new(ready: bool, fail: bool) -> Self {
            StubNotifier {
                ready,
                fail,
                sends: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl Notify for StubNotifier {
        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn send_booking_alert(
            &self,
            _appointment: &NewAppointment,
        ) -> Result<(), NotifyError> {
            self.sends.set(self.sends.get() + 1);
            if self.fail {
                Err(NotifyError::Transport("session dropped".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn booking() -> NewAppointment {
        NewAppointment {
            name: "Jane Doe".to_string(),
            phone: "5551234567".to_string(),
            service: "Cleaning".to_string(),
            appointment_date: "2024-06-01".to_string(),
        }
    }

    #[actix_rt::test]
    async fn not_ready_skips_without_attempting_a_send() {
        let notifier = StubNotifier::new(false, false);
        let outcome = notify_outcome(&notifier, &booking()).await;
        assert_eq!(outcome, BookingOutcome::Skipped);
        assert_eq!(notifier.sends.get(), 0);
    }

    #[actix_rt::test]
    async fn delivered_alert_reports_notified() {
        let notifier = StubNotifier::new(true, false);
        let outcome = notify_outcome(&notifier, &booking()).await;
        assert_eq!(outcome, BookingOutcome::Notified);
        assert_eq!(notifier.sends.get(), 1);
        assert!(outcome.message().contains("sent"));
    }

    #[actix_rt::test]
    async fn failed_send_is_still_a_successful_booking() {
        let notifier = StubNotifier::new(true, true);
        let outcome = notify_outcome(&notifier, &booking()).await;
        assert_eq!(outcome, BookingOutcome::NotifyFailed);
        assert_eq!(notifier.sends.get(), 1);
        assert!(outcome.message().starts_with("Appointment saved"));
    }

    #[test]
    fn outcome_messages_are_distinct() {
        let messages = [
            BookingOutcome::Notified.message(),
            BookingOutcome::NotifyFailed.message(),
            BookingOutcome::Skipped.message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
