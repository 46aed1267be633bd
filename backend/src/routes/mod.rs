//! Route definitions for the Kiosk Ledger API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Reports
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/usage", get(handlers::get_usage))
        .route("/ledger", get(handlers::get_ledger))
        .route("/fees/transactions", get(handlers::get_transaction_fees))
        .nest("/inventory", inventory_routes())
        .nest("/exports", export_routes())
        // Settings
        .route(
            "/settings/pos-fee",
            get(handlers::get_pos_fee).put(handlers::update_pos_fee),
        )
        .route("/reset", post(handlers::reset))
        // Records
        .nest("/products", product_routes())
        .nest("/sales", sale_routes())
        .nest("/fixed-costs", fixed_cost_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/ingredient-batches", ingredient_batch_routes())
        .nest("/strawberry-batches", strawberry_batch_routes())
        .nest("/waste", waste_routes())
        .nest("/classifier", classifier_routes())
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_inventory))
        .route("/:ingredient_id/adjustment", put(handlers::set_adjustment))
}

fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/sales.csv", get(handlers::export_sales))
        .route("/inventory.csv", get(handlers::export_inventory))
        .route("/waste.csv", get(handlers::export_waste))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/:id/cost", get(handlers::get_product_cost))
}

fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sale))
        .route("/:id", delete(handlers::delete_sale))
}

fn fixed_cost_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fixed_costs).post(handlers::create_fixed_cost),
        )
        .route(
            "/:id",
            put(handlers::update_fixed_cost).delete(handlers::delete_fixed_cost),
        )
}

fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:id",
            put(handlers::update_ingredient).delete(handlers::delete_ingredient),
        )
        .route("/:id/cost", get(handlers::get_ingredient_cost))
}

fn ingredient_batch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredient_batches).post(handlers::create_ingredient_batch),
        )
        .route("/:id", delete(handlers::delete_ingredient_batch))
}

fn strawberry_batch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_strawberry_batches).post(handlers::create_strawberry_batch),
        )
        .route("/active", get(handlers::get_active_strawberry_batch))
        .route("/for-date", get(handlers::get_strawberry_batch_for_date))
        .route(
            "/:id",
            put(handlers::update_strawberry_batch).delete(handlers::delete_strawberry_batch),
        )
}

fn waste_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_waste).post(handlers::create_waste))
        .route("/:id", delete(handlers::delete_waste))
}

fn classifier_routes() -> Router<AppState> {
    Router::new()
        .route("/combinations", post(handlers::find_combinations))
        .route("/commit", post(handlers::commit_combinations))
}
