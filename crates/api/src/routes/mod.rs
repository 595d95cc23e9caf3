//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod integration;
pub mod periods;
pub mod reports;
pub mod vouchers;

/// Creates the API router with all resource routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(accounts::routes())
        .merge(vouchers::routes())
        .merge(periods::routes())
        .merge(reports::routes())
        .merge(integration::routes())
}
