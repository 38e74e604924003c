//! HTTP handlers and route configuration.

mod admin;
mod blog;
mod health;

use actix_web::{HttpResponse, http::header, web};

/// 303 to `location`, dropping the current navigation target.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blog::landing))
        .route("/health", web::get().to(health::health_check))
        // Public blog
        .route("/blog", web::get().to(blog::list))
        .route(
            "/blog/category/{category}",
            web::get().to(blog::list_by_category),
        )
        .route("/blog/{slug}", web::get().to(blog::detail))
        .route("/blog/{slug}/comments", web::post().to(blog::add_comment))
        // Admin area - everything under /posts is behind the access guard
        .service(
            web::scope("/admin")
                .route("/login", web::get().to(admin::login_page))
                .route("/login", web::post().to(admin::login))
                .route("/logout", web::post().to(admin::logout))
                .route("/posts", web::get().to(admin::post_list))
                .route("/posts", web::post().to(admin::create_post))
                .route("/posts/new", web::get().to(admin::new_post))
                .route("/posts/{id}", web::get().to(admin::edit_post))
                .route("/posts/{id}", web::post().to(admin::update_post))
                .route("/posts/{id}/delete", web::post().to(admin::delete_post)),
        );
}
