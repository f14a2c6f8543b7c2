use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::{
    entity::{order, prelude::*, sea_orm_active_enums::UserRole, user},
    error::ApiError,
    middleware::jwt::AuthUser,
    routes::{Pagination, PaginationParams},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;

/// Customer row with lifetime order aggregates.
#[derive(Debug, Serialize)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub total_orders: i64,
    pub total_spent: Decimal,
}

#[derive(Serialize)]
pub struct ListCustomersResponse {
    pub customers: Vec<CustomerRow>,
    pub pagination: Pagination,
}

#[tracing::instrument(name = "GET /admin/customers", skip(state, user))]
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListCustomersResponse>, ApiError> {
    user.require_admin(&state).await?;
    let (page, limit) = params.resolve(DEFAULT_PAGE_SIZE);

    let total = User::find()
        .filter(user::Column::Role.eq(UserRole::Customer))
        .count(&state.db)
        .await?;

    let customers = User::find()
        .filter(user::Column::Role.eq(UserRole::Customer))
        .order_by_desc(user::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(&state.db)
        .await?;

    let ids: Vec<String> = customers.iter().map(|customer| customer.id.clone()).collect();
    let mut aggregates: HashMap<String, (i64, Decimal)> = HashMap::new();
    if !ids.is_empty() {
        let rows: Vec<(String, i64, Option<Decimal>)> = Order::find()
            .select_only()
            .column(order::Column::UserId)
            .column_as(order::Column::Id.count(), "total_orders")
            .column_as(order::Column::TotalAmount.sum(), "total_spent")
            .filter(order::Column::UserId.is_in(ids))
            .group_by(order::Column::UserId)
            .into_tuple()
            .all(&state.db)
            .await?;
        for (user_id, orders, spent) in rows {
            aggregates.insert(user_id, (orders, spent.unwrap_or(Decimal::ZERO)));
        }
    }

    let customers = customers
        .into_iter()
        .map(|customer| {
            let (total_orders, total_spent) = aggregates
                .get(&customer.id)
                .copied()
                .unwrap_or((0, Decimal::ZERO));
            CustomerRow {
                id: customer.id,
                name: customer.name,
                email: customer.email,
                phone: customer.phone,
                address: customer.address,
                created_at: customer.created_at,
                total_orders,
                total_spent,
            }
        })
        .collect();

    Ok(Json(ListCustomersResponse {
        customers,
        pagination: Pagination::new(page, limit, total),
    }))
}
