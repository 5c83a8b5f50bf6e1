use actix_web::{web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::errors::ApiError;
use crate::models::search_models::{SearchQuery, SearchResults};
use crate::models::show_models::{ArtistShowEntry, ShowWithArtist};
use crate::models::venue_models::{
    NewVenue, Venue, VenueChangeset, VenueDetail, VenueListItem, VenuePayload, VenueRow,
};
use crate::schema::{artists, shows, venues};
use crate::utils::aggregation_utils::{
    format_start_time, group_venues_by_area, split_by_start_time, upcoming_counts,
};

/// Venue listing grouped by (city, state), each venue annotated with its
/// upcoming-show count.
pub async fn list_venues(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let rows: Vec<VenueRow> = venues::table
        .select((venues::id, venues::name, venues::city, venues::state))
        .load(&mut conn)?;

    let upcoming: Vec<i32> = shows::table
        .filter(shows::start_time.gt(now))
        .select(shows::venue_id)
        .load(&mut conn)?;

    let areas = group_venues_by_area(rows, &upcoming_counts(&upcoming));
    Ok(HttpResponse::Ok().json(areas))
}

/// Case-insensitive substring search over venue names.
pub async fn search_venues(
    pool: web::Data<DbPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let hits: Vec<(i32, String)> = venues::table
        .filter(venues::name.ilike(query.pattern()))
        .select((venues::id, venues::name))
        .order(venues::id)
        .load(&mut conn)?;

    let upcoming: Vec<i32> = shows::table
        .filter(shows::start_time.gt(now))
        .select(shows::venue_id)
        .load(&mut conn)?;
    let counts = upcoming_counts(&upcoming);

    let data: Vec<VenueListItem> = hits
        .into_iter()
        .map(|(id, name)| VenueListItem {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect();

    Ok(HttpResponse::Ok().json(SearchResults {
        count: data.len(),
        data,
    }))
}

/// Venue detail with its shows partitioned into upcoming and past. Both
/// partitions are always computed, whatever the other contains.
pub async fn get_venue(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let venue_id = path.into_inner();
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let venue = venues::table
        .find(venue_id)
        .select(Venue::as_select())
        .first::<Venue>(&mut conn)
        .optional()?
        .ok_or(ApiError::not_found("Venue", venue_id))?;

    let rows: Vec<ShowWithArtist> = shows::table
        .inner_join(artists::table)
        .filter(shows::venue_id.eq(venue_id))
        .select((shows::start_time, artists::id, artists::name, artists::image_link))
        .order(shows::start_time)
        .load(&mut conn)?;

    let (upcoming, past) = split_by_start_time(rows, now, |row| row.start_time);
    let to_entry = |row: ShowWithArtist| ArtistShowEntry {
        artist_id: row.artist_id,
        artist_name: row.artist_name,
        artist_image_link: row.artist_image_link,
        start_time: format_start_time(row.start_time),
    };
    let upcoming: Vec<_> = upcoming.into_iter().map(to_entry).collect();
    let past: Vec<_> = past.into_iter().map(to_entry).collect();

    Ok(HttpResponse::Ok().json(VenueDetail {
        venue,
        upcoming_shows_count: upcoming.len(),
        upcoming_shows: upcoming,
        past_shows_count: past.len(),
        past_shows: past,
    }))
}

/// Current mutable fields of a venue, for populating the edit form.
pub async fn edit_venue(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let venue_id = path.into_inner();
    let mut conn = get_conn(&pool)?;

    let venue = venues::table
        .find(venue_id)
        .select(Venue::as_select())
        .first::<Venue>(&mut conn)
        .optional()?
        .ok_or(ApiError::not_found("Venue", venue_id))?;

    Ok(HttpResponse::Ok().json(venue))
}

pub async fn create_venue(
    pool: web::Data<DbPool>,
    payload: web::Json<VenuePayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let mut conn = get_conn(&pool)?;
    let new_venue = NewVenue::from(payload);

    let venue: Venue = conn
        .transaction(|conn| {
            diesel::insert_into(venues::table)
                .values(&new_venue)
                .returning(Venue::as_returning())
                .get_result(conn)
        })
        .map_err(|e| {
            ApiError::persistence(
                format!(
                    "An error occurred. Venue {} could not be listed.",
                    new_venue.name
                ),
                e,
            )
        })?;

    log::info!("venue {} listed as id {}", venue.name, venue.id);
    Ok(HttpResponse::Created().json(json!({
        "message": format!("Venue {} was successfully listed!", venue.name),
        "venue": venue,
    })))
}

pub async fn update_venue(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    payload: web::Json<VenuePayload>,
) -> Result<HttpResponse, ApiError> {
    let venue_id = path.into_inner();
    let payload = payload.into_inner();
    payload.validate()?;

    let mut conn = get_conn(&pool)?;
    let changeset = VenueChangeset::from(payload);

    let updated: Option<Venue> = conn
        .transaction(|conn| {
            diesel::update(venues::table.find(venue_id))
                .set(&changeset)
                .returning(Venue::as_returning())
                .get_result(conn)
                .optional()
        })
        .map_err(|e| {
            ApiError::persistence(
                format!(
                    "An error occurred. Venue {} could not be updated.",
                    changeset.name
                ),
                e,
            )
        })?;

    let venue = updated.ok_or(ApiError::not_found("Venue", venue_id))?;
    log::info!("venue {} updated", venue.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Venue {} was successfully updated!", venue.name),
        "venue": venue,
    })))
}

/// Deletes the venue together with its shows; a show has no lifecycle beyond
/// the link it represents, so it dies with its venue.
pub async fn delete_venue(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let venue_id = path.into_inner();
    let mut conn = get_conn(&pool)?;

    let deleted = conn
        .transaction(|conn| {
            diesel::delete(shows::table.filter(shows::venue_id.eq(venue_id))).execute(conn)?;
            diesel::delete(venues::table.find(venue_id)).execute(conn)
        })
        .map_err(|e| {
            ApiError::persistence("An error occurred. Venue could not be deleted.".to_string(), e)
        })?;

    if deleted == 0 {
        return Err(ApiError::not_found("Venue", venue_id));
    }

    log::info!("venue {venue_id} deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Venue was successfully deleted!",
    })))
}
