//! HTTP handlers and route configuration.

mod favorites;
mod health;
mod posts;
mod upload;
mod webhooks;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Blog routes
            .service(
                web::scope("/blog")
                    .route("", web::get().to(posts::list_mine))
                    .route("", web::post().to(posts::create))
                    // Registered before /{id} so "public" is not taken
                    // for a post id.
                    .route("/public", web::get().to(posts::list_public))
                    .route("/{id}", web::get().to(posts::read))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::remove))
                    .route("/{id}/favorite", web::post().to(favorites::add))
                    .route("/{id}/favorite", web::delete().to(favorites::remove)),
            )
            // Media upload
            .route("/upload", web::post().to(upload::upload))
            .route("/upload", web::get().to(upload::upload_hint))
            // Identity provider webhook
            .route("/webhooks/clerk", web::post().to(webhooks::receive)),
    );
}
