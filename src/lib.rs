use actix_web::web::{self, Data, FormConfig, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod action;
pub mod campaign;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod offer;
pub mod schedule;
pub mod seed;
pub mod store;
pub mod ticket;
pub mod typedid;
pub mod view;

use clock::Clock;
use config::Config;
use database::Database;
use error::Error;

/// Registers the extractor error formats and every dashboard route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(FormConfig::default().error_handler(|err, _req| {
        // format form errors with custom format
        Error::InvalidForm(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(ticket::endpoints::get_tickets)
    .service(ticket::endpoints::create_ticket)
    .service(ticket::endpoints::get_ticket_by_id)
    .service(ticket::endpoints::update_ticket)
    .service(ticket::endpoints::add_note_to_ticket)
    .service(ticket::endpoints::escalate_ticket)
    .service(ticket::endpoints::close_ticket)
    // must precede the by-id route
    .service(campaign::endpoints::get_campaign_stats)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(campaign::endpoints::update_campaign)
    .service(campaign::endpoints::set_campaign_active)
    .service(campaign::endpoints::duplicate_campaign)
    .service(offer::endpoints::get_offers)
    .service(offer::endpoints::get_offer_by_id)
    .service(clock::endpoints::get_clock)
    .default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db = Database::new(seed::seed(config.seed), config.highlight_duration)?;
    let db = Data::new(db);

    let clock = Clock::new();
    let _clock_refresh = clock.start(config.clock_refresh);
    let clock = Data::new(clock);

    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(clock.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .workers(config.workers)
    .bind(config.address())?
    .run()
    .await?;

    Ok(())
}
