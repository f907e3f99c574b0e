#[macro_use]
extern crate diesel;

mod booking;
mod config;
mod database;
mod models;
mod notify;
mod protocol;
mod schema;
mod utils;

use actix_web::{middleware, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use futures::channel::mpsc;

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = config::Config::from_env().expect("invalid configuration");

    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url.clone());
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let ready = notify::ReadyFlag::default();
    let (event_tx, event_rx) = mpsc::unbounded();
    actix_rt::spawn(notify::session::watch(
        config.gateway_url.clone(),
        config.session_poll_interval,
        event_tx,
    ));
    actix_rt::spawn(notify::session::drive(event_rx, ready.clone()));

    let bind = config.bind_addr();
    log::info!("Server is running on http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .data(pool.clone())
            .data(notify::Notifier::new(&config, ready.clone()))
            .configure(booking::config)
    })
    .bind(bind)?
    .run()
    .await
}
