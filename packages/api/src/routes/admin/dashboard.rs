use axum::{Extension, Json, extract::State};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::{
    entity::{
        order,
        prelude::*,
        product, user,
        sea_orm_active_enums::{PaymentStatus, UserRole},
    },
    error::ApiError,
    middleware::jwt::AuthUser,
    service::orders::AdminOrderRow,
    state::AppState,
};

/// Products at or below this stock level show up on the dashboard's
/// restock list.
const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub total_products: u64,
    pub total_customers: u64,
    pub recent_orders: Vec<AdminOrderRow>,
    pub low_stock_products: Vec<product::Model>,
}

/// One-shot aggregate view for the admin landing page. Revenue counts
/// only orders whose payment is reported completed.
#[tracing::instrument(name = "GET /admin/dashboard", skip(state, user))]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>, ApiError> {
    user.require_admin(&state).await?;

    let total_orders = Order::find().count(&state.db).await?;

    let total_revenue: Option<Option<Decimal>> = Order::find()
        .select_only()
        .column_as(order::Column::TotalAmount.sum(), "revenue")
        .filter(order::Column::PaymentStatus.eq(PaymentStatus::Completed))
        .into_tuple()
        .one(&state.db)
        .await?;
    let total_revenue = total_revenue.flatten().unwrap_or(Decimal::ZERO);

    let total_products = Product::find()
        .filter(product::Column::IsActive.eq(true))
        .count(&state.db)
        .await?;

    let total_customers = User::find()
        .filter(user::Column::Role.eq(UserRole::Customer))
        .count(&state.db)
        .await?;

    let recent_orders = Order::find()
        .find_also_related(User)
        .order_by_desc(order::Column::CreatedAt)
        .limit(10)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|(order, customer)| {
            let (customer_name, customer_email, customer_phone) = customer.map_or_else(
                || ("Unknown".to_string(), String::new(), None),
                |u| (u.name, u.email, u.phone),
            );
            AdminOrderRow {
                order,
                customer_name,
                customer_email,
                customer_phone,
            }
        })
        .collect();

    let low_stock_products = Product::find()
        .filter(product::Column::StockQuantity.lte(LOW_STOCK_THRESHOLD))
        .filter(product::Column::IsActive.eq(true))
        .order_by_asc(product::Column::StockQuantity)
        .all(&state.db)
        .await?;

    Ok(Json(DashboardResponse {
        total_orders,
        total_revenue,
        total_products,
        total_customers,
        recent_orders,
        low_stock_products,
    }))
}
