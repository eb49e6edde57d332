use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(pdf_routes(config))
        .merge(intelligence_routes())
        .routes(routes!(handlers::health::health))
}

fn pdf_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            handlers::pdf::list_pdfs,
            handlers::pdf::create_pdf
        ))
        .routes(routes!(
            handlers::pdf::get_pdf,
            handlers::pdf::update_pdf,
            handlers::pdf::delete_pdf
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::pdf::upload_pdf))
        .layer(handlers::pdf::upload_body_limit(
            config.storage.max_object_size,
        ));

    crud.merge(upload)
}

fn intelligence_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::intelligence::summarize_text))
        .routes(routes!(handlers::intelligence::ask_pdf))
}
