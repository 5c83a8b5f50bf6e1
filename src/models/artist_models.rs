use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, FieldError};
use crate::utils::validation_utils::{require_genres, require_text};

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::artists)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Submitted artist form; shared between create and edit.
#[derive(Deserialize, Debug, Clone)]
pub struct ArtistPayload {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistPayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors: Vec<FieldError> = Vec::new();
        require_text("name", &self.name, &mut errors);
        require_text("city", &self.city, &mut errors);
        require_text("state", &self.state, &mut errors);
        require_text("phone", &self.phone, &mut errors);
        require_genres(&self.genres, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::artists)]
#[diesel(treat_none_as_null = true)]
pub struct ArtistChangeset {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<ArtistPayload> for NewArtist {
    fn from(p: ArtistPayload) -> Self {
        NewArtist {
            name: p.name,
            city: p.city,
            state: p.state,
            phone: p.phone,
            genres: p.genres,
            image_link: p.image_link,
            facebook_link: p.facebook_link,
            website_link: p.website_link,
            seeking_venue: p.seeking_venue,
            seeking_description: p.seeking_description,
        }
    }
}

impl From<ArtistPayload> for ArtistChangeset {
    fn from(p: ArtistPayload) -> Self {
        ArtistChangeset {
            name: p.name,
            city: p.city,
            state: p.state,
            phone: p.phone,
            genres: p.genres,
            image_link: p.image_link,
            facebook_link: p.facebook_link,
            website_link: p.website_link,
            seeking_venue: p.seeking_venue,
            seeking_description: p.seeking_description,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ArtistListItem {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Artist detail page data: the record plus its shows split by start time.
#[derive(Serialize, Debug)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub upcoming_shows: Vec<crate::models::show_models::VenueShowEntry>,
    pub upcoming_shows_count: usize,
    pub past_shows: Vec<crate::models::show_models::VenueShowEntry>,
    pub past_shows_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_genres_and_name_are_both_reported() {
        let p = ArtistPayload {
            name: String::new(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            genres: vec![],
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        };
        match p.validate().unwrap_err() {
            ApiError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["name", "genres"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
