use axum::Router;

pub fn create_test_app() -> Router {
    guidance_backend::create_app()
}
