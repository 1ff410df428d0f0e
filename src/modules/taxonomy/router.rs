use axum::{Router, routing::get};

use super::controller::{create_category, create_tag, list_categories, list_tags};
use crate::state::AppState;

pub fn init_categories_router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

pub fn init_tags_router() -> Router<AppState> {
    Router::new().route("/", get(list_tags).post(create_tag))
}
