pub mod artist_handlers;
pub mod show_handlers;
pub mod venue_handlers;
