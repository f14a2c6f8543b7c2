//! Read side of order history, for customers and for the admin panel.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::{
    entity::{order, order_item, prelude::*, sea_orm_active_enums::OrderStatus},
    error::ApiError,
    not_found,
};

/// An order row plus a one-line recap of what is in it, e.g.
/// `"Basmati Rice x2,Almonds x1"`. `None` when the order somehow has
/// no line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: order_item::Model,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Vec<OrderItemDetail>,
}

/// Admin listing row carrying the customer's identity alongside the
/// order itself.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderRow {
    #[serde(flatten)]
    pub order: order::Model,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderDetail {
    #[serde(flatten)]
    pub order: order::Model,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<OrderItemDetail>,
}

/// Newest-first page of the caller's own orders plus the total row
/// count for pagination.
pub async fn my_orders<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    page: u64,
    limit: u64,
) -> Result<(Vec<OrderSummary>, u64), ApiError> {
    let total = Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    let orders = Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(db)
        .await?;

    let summaries = attach_item_summaries(db, orders).await?;
    Ok((summaries, total))
}

async fn attach_item_summaries<C: ConnectionTrait>(
    db: &C,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderSummary>, ApiError> {
    let ids: Vec<String> = orders.iter().map(|order| order.id.clone()).collect();

    let mut parts: HashMap<String, Vec<String>> = HashMap::new();
    if !ids.is_empty() {
        let items = OrderItem::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .find_also_related(Product)
            .all(db)
            .await?;
        for (item, product) in items {
            let name = product.map_or_else(|| "Unknown".to_string(), |product| product.name);
            parts
                .entry(item.order_id)
                .or_default()
                .push(format!("{} x{}", name, item.quantity));
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = parts.remove(&order.id).map(|names| names.join(","));
            OrderSummary { order, items }
        })
        .collect())
}

async fn order_items_with_products<C: ConnectionTrait>(
    db: &C,
    order_id: &str,
) -> Result<Vec<OrderItemDetail>, ApiError> {
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .find_also_related(Product)
        .all(db)
        .await?;

    Ok(items
        .into_iter()
        .map(|(item, product)| {
            let (name, image) = product
                .map_or_else(|| ("Unknown".to_string(), None), |p| (p.name, p.image));
            OrderItemDetail { item, name, image }
        })
        .collect())
}

/// Full order detail, scoped to the owning customer.
pub async fn get_order<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    order_id: &str,
) -> Result<OrderDetail, ApiError> {
    let order = Order::find_by_id(order_id)
        .filter(order::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| not_found!("Order not found"))?;

    let items = order_items_with_products(db, &order.id).await?;
    Ok(OrderDetail { order, items })
}

/// Admin page over all orders, optionally narrowed to one status.
pub async fn list_orders<C: ConnectionTrait>(
    db: &C,
    status: Option<OrderStatus>,
    page: u64,
    limit: u64,
) -> Result<(Vec<AdminOrderRow>, u64), ApiError> {
    let mut count = Order::find();
    let mut query = Order::find().find_also_related(User);
    if let Some(status) = status {
        count = count.filter(order::Column::Status.eq(status));
        query = query.filter(order::Column::Status.eq(status));
    }

    let total = count.count(db).await?;

    let rows = query
        .order_by_desc(order::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(db)
        .await?;

    let orders = rows
        .into_iter()
        .map(|(order, user)| {
            let (customer_name, customer_email, customer_phone) = user.map_or_else(
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

    Ok((orders, total))
}

/// Admin order detail with the customer's contact information.
pub async fn admin_get_order<C: ConnectionTrait>(
    db: &C,
    order_id: &str,
) -> Result<AdminOrderDetail, ApiError> {
    let (order, user) = Order::find_by_id(order_id)
        .find_also_related(User)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("Order not found"))?;

    let (customer_name, customer_email, customer_phone, customer_address) = user.map_or_else(
        || ("Unknown".to_string(), String::new(), None, None),
        |u| (u.name, u.email, u.phone, u.address),
    );

    let items = order_items_with_products(db, &order.id).await?;
    Ok(AdminOrderDetail {
        order,
        customer_name,
        customer_email,
        customer_phone,
        customer_address,
        items,
    })
}
