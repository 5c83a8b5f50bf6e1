use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::errors::ApiError;
use crate::models::show_models::{NewShow, ShowListingEntry, ShowListingRow, ShowPayload};
use crate::schema::{artists, shows, venues};
use crate::utils::aggregation_utils::format_start_time;

/// All shows joined with their venue and artist, ordered by start time.
pub async fn list_shows(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;

    let rows: Vec<ShowListingRow> = shows::table
        .inner_join(venues::table)
        .inner_join(artists::table)
        .select((
            shows::venue_id,
            venues::name,
            shows::artist_id,
            artists::name,
            artists::image_link,
            shows::start_time,
        ))
        .order(shows::start_time)
        .load(&mut conn)?;

    let data: Vec<ShowListingEntry> = rows
        .into_iter()
        .map(|row| ShowListingEntry {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_start_time(row.start_time),
        })
        .collect();

    Ok(HttpResponse::Ok().json(data))
}

pub async fn create_show(
    pool: web::Data<DbPool>,
    payload: web::Json<ShowPayload>,
) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    let new_show = NewShow::from(payload.into_inner());

    let inserted = conn.transaction(|conn| {
        diesel::insert_into(shows::table)
            .values(&new_show)
            .execute(conn)
    });

    match inserted {
        Ok(_) => {
            log::info!(
                "show listed: artist {} at venue {}",
                new_show.artist_id,
                new_show.venue_id
            );
            Ok(HttpResponse::Created().json(json!({
                "message": "Show was successfully listed!",
            })))
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
            Err(ApiError::BadReference(
                "artist_id or venue_id does not reference an existing row",
            ))
        }
        Err(e) => Err(ApiError::persistence(
            "An error occurred. Show could not be listed.".to_string(),
            e,
        )),
    }
}
