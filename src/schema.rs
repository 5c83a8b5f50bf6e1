diesel::table! {
    artists (id) {
        id -> Int4,
        name -> Varchar,
        #[max_length = 120]
        city -> Varchar,
        #[max_length = 120]
        state -> Varchar,
        #[max_length = 120]
        phone -> Varchar,
        genres -> Array<Text>,
        #[max_length = 500]
        image_link -> Nullable<Varchar>,
        #[max_length = 120]
        facebook_link -> Nullable<Varchar>,
        #[max_length = 500]
        website_link -> Nullable<Varchar>,
        seeking_venue -> Bool,
        #[max_length = 500]
        seeking_description -> Nullable<Varchar>,
    }
}

diesel::table! {
    shows (id) {
        id -> Int4,
        start_time -> Timestamp,
        venue_id -> Int4,
        artist_id -> Int4,
    }
}

diesel::table! {
    venues (id) {
        id -> Int4,
        name -> Varchar,
        #[max_length = 120]
        city -> Varchar,
        #[max_length = 120]
        state -> Varchar,
        #[max_length = 120]
        address -> Varchar,
        #[max_length = 120]
        phone -> Varchar,
        genres -> Array<Text>,
        #[max_length = 500]
        image_link -> Nullable<Varchar>,
        #[max_length = 120]
        facebook_link -> Nullable<Varchar>,
        #[max_length = 500]
        website_link -> Nullable<Varchar>,
        seeking_talent -> Bool,
        #[max_length = 500]
        seeking_description -> Nullable<Varchar>,
    }
}

diesel::joinable!(shows -> artists (artist_id));
diesel::joinable!(shows -> venues (venue_id));

diesel::allow_tables_to_appear_in_same_query!(
    artists,
    shows,
    venues,
);
