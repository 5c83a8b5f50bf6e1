pub mod artist_models;
pub mod search_models;
pub mod show_models;
pub mod venue_models;
