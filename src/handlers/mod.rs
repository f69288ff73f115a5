pub mod admin;
pub mod auth;
pub mod chat;
pub mod designs;
pub mod notifications;
pub mod orders;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by the bearer-token extractor) ──
    cfg.service(web::scope("/auth").route("/me", web::get().to(auth::me)));

    // ── Order routes (all owner-scoped) ──
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(orders::list_my_orders))
            .route("", web::post().to(orders::create_order))
            .route("/cart", web::post().to(orders::add_to_cart))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::delete().to(orders::delete_order))
            .route("/{id}/submit", web::post().to(orders::submit_for_review)),
    );

    // ── Saved design routes ──
    cfg.service(
        web::scope("/designs")
            .route("", web::get().to(designs::list_designs))
            .route("", web::post().to(designs::register_design))
            .route("/combine", web::post().to(designs::combine_designs))
            .route("/{id}", web::delete().to(designs::delete_design)),
    );

    // ── Admin review routes (role-checked via AdminUser) ──
    cfg.service(
        web::scope("/admin")
            .route("/orders", web::get().to(admin::list_orders))
            .route(
                "/orders/{id}/status",
                web::put().to(admin::update_order_status),
            )
            .route("/orders/{id}", web::delete().to(admin::delete_order)),
    );

    // ── Support chat routes ──
    cfg.service(
        web::scope("/chat")
            .route("/conversations", web::get().to(chat::list_conversations))
            .route("/conversations", web::post().to(chat::open_conversation))
            .route(
                "/conversations/{id}/messages",
                web::get().to(chat::get_messages),
            )
            .route(
                "/conversations/{id}/messages",
                web::post().to(chat::send_message),
            )
            .route(
                "/conversations/{id}/read",
                web::put().to(chat::mark_conversation_read),
            ),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::list_notifications))
            .route("/{id}/read", web::put().to(notifications::mark_read)),
    );
}
