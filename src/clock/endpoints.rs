use actix_web::get;
use actix_web::web::{Data, Json};

use crate::error::Error;

use super::{Clock, ClockSnapshot};

#[get("/dashboard/clock")]
#[tracing::instrument(skip(clock))]
pub async fn get_clock(clock: Data<Clock>) -> Result<Json<ClockSnapshot>, Error> {
    let snapshot = clock.snapshot().await;

    Ok(Json(snapshot))
}
