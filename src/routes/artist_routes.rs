use actix_web::web;

use crate::handlers::artist_handlers::{
    create_artist, edit_artist, get_artist, list_artists, search_artists, update_artist,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/artists")
            .route("", web::get().to(list_artists))
            .route("", web::post().to(create_artist))
            .route("/search", web::get().to(search_artists))
            .route("/{artist_id}", web::get().to(get_artist))
            .route("/{artist_id}", web::put().to(update_artist))
            .route("/{artist_id}/edit", web::get().to(edit_artist)),
    );
}
