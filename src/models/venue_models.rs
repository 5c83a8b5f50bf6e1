use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, FieldError};
use crate::utils::validation_utils::{require_genres, require_text};

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::venues)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Submitted venue form. One payload serves create and edit: an update
/// overwrites every mutable field, so none of the required ones is optional.
#[derive(Deserialize, Debug, Clone)]
pub struct VenuePayload {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    // Checkbox-derived: absent means unchecked.
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenuePayload {
    /// Structural validation; must pass before any persistence attempt.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors: Vec<FieldError> = Vec::new();
        require_text("name", &self.name, &mut errors);
        require_text("city", &self.city, &mut errors);
        require_text("state", &self.state, &mut errors);
        require_text("address", &self.address, &mut errors);
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
#[diesel(table_name = crate::schema::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::venues)]
#[diesel(treat_none_as_null = true)]
pub struct VenueChangeset {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenuePayload> for NewVenue {
    fn from(p: VenuePayload) -> Self {
        NewVenue {
            name: p.name,
            city: p.city,
            state: p.state,
            address: p.address,
            phone: p.phone,
            genres: p.genres,
            image_link: p.image_link,
            facebook_link: p.facebook_link,
            website_link: p.website_link,
            seeking_talent: p.seeking_talent,
            seeking_description: p.seeking_description,
        }
    }
}

impl From<VenuePayload> for VenueChangeset {
    fn from(p: VenuePayload) -> Self {
        VenueChangeset {
            name: p.name,
            city: p.city,
            state: p.state,
            address: p.address,
            phone: p.phone,
            genres: p.genres,
            image_link: p.image_link,
            facebook_link: p.facebook_link,
            website_link: p.website_link,
            seeking_talent: p.seeking_talent,
            seeking_description: p.seeking_description,
        }
    }
}

/// Slim row used by the area listing and search, where only identity and the
/// grouping key are needed.
#[derive(Queryable, Debug, Clone)]
pub struct VenueRow {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct VenueListItem {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// One (city, state) group of the venues listing.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueListItem>,
}

/// Venue detail page data: the record plus its shows split by start time.
#[derive(Serialize, Debug)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub upcoming_shows: Vec<crate::models::show_models::ArtistShowEntry>,
    pub upcoming_shows_count: usize,
    pub past_shows: Vec<crate::models::show_models::ArtistShowEntry>,
    pub past_shows_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> VenuePayload {
        VenuePayload {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            image_link: None,
            facebook_link: None,
            website_link: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some("Looking for local artists.".into()),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn blank_required_fields_are_each_reported() {
        let mut p = payload();
        p.name = "  ".into();
        p.phone = String::new();
        let err = p.validate().unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["name", "phone"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_genres_are_rejected() {
        let mut p = payload();
        p.genres.clear();
        let err = p.validate().unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "genres");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn seeking_talent_defaults_to_unchecked() {
        // Checkbox fields are simply absent when unchecked.
        let p: VenuePayload = serde_json::from_value(serde_json::json!({
            "name": "The Dueling Pianos Bar",
            "city": "New York",
            "state": "NY",
            "address": "335 Delancey Street",
            "phone": "914-003-1132",
            "genres": ["Classical", "R&B", "Hip-Hop"]
        }))
        .unwrap();
        assert!(!p.seeking_talent);
        assert!(p.validate().is_ok());
    }
}
