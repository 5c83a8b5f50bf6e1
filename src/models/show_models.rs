use chrono::NaiveDateTime;
use diesel::prelude::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// Submitted show form. A show is a pure association and is immutable once
/// created, so there is no changeset type for it.
#[derive(Deserialize, Debug, Clone)]
pub struct ShowPayload {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shows)]
pub struct NewShow {
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub artist_id: i32,
}

impl From<ShowPayload> for NewShow {
    fn from(p: ShowPayload) -> Self {
        NewShow {
            start_time: p.start_time,
            venue_id: p.venue_id,
            artist_id: p.artist_id,
        }
    }
}

/// A venue's show joined with its artist.
#[derive(Queryable, Debug, Clone)]
pub struct ShowWithArtist {
    pub start_time: NaiveDateTime,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// An artist's show joined with its venue.
#[derive(Queryable, Debug, Clone)]
pub struct ShowWithVenue {
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

/// Show entry on a venue detail page, carrying the artist counterpart.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ArtistShowEntry {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Show entry on an artist detail page, carrying the venue counterpart.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct VenueShowEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// One row of the full shows listing, joined with both counterparts.
#[derive(Queryable, Debug)]
pub struct ShowListingRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

#[derive(Serialize, Debug)]
pub struct ShowListingEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}
