use actix_web::web;

use crate::handlers::show_handlers::{create_show, list_shows};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shows")
            .route("", web::get().to(list_shows))
            .route("", web::post().to(create_show)),
    );
}
