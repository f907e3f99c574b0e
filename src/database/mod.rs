use crate::{
    models::appointments::{Appointment, NewAppointment},
    DbPool,
};
use actix_web::web;
use anyhow::Context;
use diesel::{prelude::*, r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::Bigint>
);

pub fn get_db_conn(
    pool: &web::Data<DbPool>,
) -> anyhow::Result<PooledConnection<ConnectionManager<MysqlConnection>>> {
    pool.get().context("DB connection")
}

/// Inserts one appointment row and returns the id the store assigned to it.
/// The `LAST_INSERT_ID()` read shares the insert's connection, so concurrent
/// bookings cannot cross-read each other's ids.
pub async fn insert_appointment(
    pool: &web::Data<DbPool>,
    data: NewAppointment,
) -> anyhow::Result<u64> {
    use crate::schema::appointments;

    let conn = get_db_conn(pool)?;
    let id = web::block(move || {
        conn.transaction(|| {
            diesel::insert_into(appointments::table)
                .values(&data)
                .execute(&conn)
                .context("DB error")?;

            diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("DB error")
        })
    })
    .await?;

    Ok(id)
}

/// Snapshot of all appointments, newest first.
pub async fn list_appointments(pool: &web::Data<DbPool>) -> anyhow::Result<Vec<Appointment>> {
    use crate::schema::appointments;

    let conn = get_db_conn(pool)?;
    let rows = web::block(move || {
        appointments::table
            .order(appointments::created_at.desc())
            .load::<Appointment>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(rows)
}
