use actix_web::web;

use crate::handlers::venue_handlers::{
    create_venue, delete_venue, edit_venue, get_venue, list_venues, search_venues, update_venue,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/venues")
            .route("", web::get().to(list_venues))
            .route("", web::post().to(create_venue))
            // Registered before the id routes so "search" never parses as one.
            .route("/search", web::get().to(search_venues))
            .route("/{venue_id}", web::get().to(get_venue))
            .route("/{venue_id}", web::put().to(update_venue))
            .route("/{venue_id}", web::delete().to(delete_venue))
            .route("/{venue_id}/edit", web::get().to(edit_venue)),
    );
}
