use actix_web::{web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;

use crate::db::{get_conn, DbPool};
use crate::errors::ApiError;
use crate::models::artist_models::{
    Artist, ArtistChangeset, ArtistDetail, ArtistListItem, ArtistPayload, NewArtist,
};
use crate::models::search_models::{SearchQuery, SearchResults};
use crate::models::show_models::{ShowWithVenue, VenueShowEntry};
use crate::schema::{artists, shows, venues};
use crate::utils::aggregation_utils::{format_start_time, split_by_start_time, upcoming_counts};

/// Flat artist listing ordered by id, each with its upcoming-show count.
pub async fn list_artists(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let rows: Vec<(i32, String)> = artists::table
        .select((artists::id, artists::name))
        .order(artists::id)
        .load(&mut conn)?;

    let upcoming: Vec<i32> = shows::table
        .filter(shows::start_time.gt(now))
        .select(shows::artist_id)
        .load(&mut conn)?;
    let counts = upcoming_counts(&upcoming);

    let data: Vec<ArtistListItem> = rows
        .into_iter()
        .map(|(id, name)| ArtistListItem {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect();

    Ok(HttpResponse::Ok().json(data))
}

/// Case-insensitive substring search over artist names.
pub async fn search_artists(
    pool: web::Data<DbPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let hits: Vec<(i32, String)> = artists::table
        .filter(artists::name.ilike(query.pattern()))
        .select((artists::id, artists::name))
        .order(artists::id)
        .load(&mut conn)?;

    let upcoming: Vec<i32> = shows::table
        .filter(shows::start_time.gt(now))
        .select(shows::artist_id)
        .load(&mut conn)?;
    let counts = upcoming_counts(&upcoming);

    let data: Vec<ArtistListItem> = hits
        .into_iter()
        .map(|(id, name)| ArtistListItem {
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

/// Artist detail with its shows partitioned into upcoming and past. The two
/// partitions are independent: an artist with no upcoming shows still gets
/// its full past list.
pub async fn get_artist(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let artist_id = path.into_inner();
    let mut conn = get_conn(&pool)?;
    let now = Utc::now().naive_utc();

    let artist = artists::table
        .find(artist_id)
        .select(Artist::as_select())
        .first::<Artist>(&mut conn)
        .optional()?
        .ok_or(ApiError::not_found("Artist", artist_id))?;

    let rows: Vec<ShowWithVenue> = shows::table
        .inner_join(venues::table)
        .filter(shows::artist_id.eq(artist_id))
        .select((shows::start_time, venues::id, venues::name, venues::image_link))
        .order(shows::start_time)
        .load(&mut conn)?;

    let (upcoming, past) = split_by_start_time(rows, now, |row| row.start_time);
    let to_entry = |row: ShowWithVenue| VenueShowEntry {
        venue_id: row.venue_id,
        venue_name: row.venue_name,
        venue_image_link: row.venue_image_link,
        start_time: format_start_time(row.start_time),
    };
    let upcoming: Vec<_> = upcoming.into_iter().map(to_entry).collect();
    let past: Vec<_> = past.into_iter().map(to_entry).collect();

    Ok(HttpResponse::Ok().json(ArtistDetail {
        artist,
        upcoming_shows_count: upcoming.len(),
        upcoming_shows: upcoming,
        past_shows_count: past.len(),
        past_shows: past,
    }))
}

/// Current mutable fields of an artist, for populating the edit form.
pub async fn edit_artist(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let artist_id = path.into_inner();
    let mut conn = get_conn(&pool)?;

    let artist = artists::table
        .find(artist_id)
        .select(Artist::as_select())
        .first::<Artist>(&mut conn)
        .optional()?
        .ok_or(ApiError::not_found("Artist", artist_id))?;

    Ok(HttpResponse::Ok().json(artist))
}

pub async fn create_artist(
    pool: web::Data<DbPool>,
    payload: web::Json<ArtistPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let mut conn = get_conn(&pool)?;
    let new_artist = NewArtist::from(payload);

    let artist: Artist = conn
        .transaction(|conn| {
            diesel::insert_into(artists::table)
                .values(&new_artist)
                .returning(Artist::as_returning())
                .get_result(conn)
        })
        .map_err(|e| {
            ApiError::persistence(
                format!(
                    "An error occurred. Artist {} could not be listed.",
                    new_artist.name
                ),
                e,
            )
        })?;

    log::info!("artist {} listed as id {}", artist.name, artist.id);
    Ok(HttpResponse::Created().json(json!({
        "message": format!("Artist {} was successfully listed!", artist.name),
        "artist": artist,
    })))
}

pub async fn update_artist(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    payload: web::Json<ArtistPayload>,
) -> Result<HttpResponse, ApiError> {
    let artist_id = path.into_inner();
    let payload = payload.into_inner();
    payload.validate()?;

    let mut conn = get_conn(&pool)?;
    let changeset = ArtistChangeset::from(payload);

    let updated: Option<Artist> = conn
        .transaction(|conn| {
            diesel::update(artists::table.find(artist_id))
                .set(&changeset)
                .returning(Artist::as_returning())
                .get_result(conn)
                .optional()
        })
        .map_err(|e| {
            ApiError::persistence(
                format!(
                    "An error occurred. Artist {} could not be updated.",
                    changeset.name
                ),
                e,
            )
        })?;

    let artist = updated.ok_or(ApiError::not_found("Artist", artist_id))?;
    log::info!("artist {} updated", artist.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Artist {} was successfully updated!", artist.name),
        "artist": artist,
    })))
}
