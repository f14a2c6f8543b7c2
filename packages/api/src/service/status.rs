//! Order lifecycle transitions for customers and admins.
//!
//! Both roles funnel through the same rules: `cancelled` is terminal,
//! customers may only cancel orders that have not shipped, and any
//! transition into `cancelled` puts the reserved stock back. Stock
//! restoration and the status write share one transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait, sea_query::Expr,
};

use crate::{
    bad_request,
    entity::{
        order, order_item,
        prelude::*,
        product, user,
        sea_orm_active_enums::{OrderStatus, PaymentStatus, UserRole},
    },
    error::ApiError,
    not_found,
};

/// Whether `role` may move an order from `from` to `to`.
pub fn transition_allowed(role: UserRole, from: OrderStatus, to: OrderStatus) -> bool {
    if from == OrderStatus::Cancelled {
        return false;
    }
    match role {
        UserRole::Admin => true,
        UserRole::Customer => {
            matches!(from, OrderStatus::Pending | OrderStatus::Confirmed)
                && to == OrderStatus::Cancelled
        }
    }
}

/// Puts every line item of the order back into product stock.
async fn restore_stock<C: ConnectionTrait>(db: &C, order_id: &str) -> Result<(), ApiError> {
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await?;

    for item in items {
        Product::update_many()
            .col_expr(
                product::Column::StockQuantity,
                Expr::col(product::Column::StockQuantity).add(item.quantity),
            )
            .filter(product::Column::Id.eq(&item.product_id))
            .exec(db)
            .await?;
    }

    Ok(())
}

async fn mark_cancelled<C: ConnectionTrait>(
    db: &C,
    order: order::Model,
) -> Result<order::Model, ApiError> {
    restore_stock(db, &order.id).await?;

    let mut active: order::ActiveModel = order.into();
    active.status = Set(OrderStatus::Cancelled);
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

/// Customer-side cancellation. The lookup is scoped to the caller, and
/// an order that exists but is past the cancellable window reports the
/// same not-found error so the endpoint leaks nothing about other
/// users' orders.
pub async fn cancel_order<C>(db: &C, user_id: &str, order_id: &str) -> Result<order::Model, ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .filter(order::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .filter(|order| transition_allowed(UserRole::Customer, order.status, OrderStatus::Cancelled))
        .ok_or_else(|| not_found!("Order not found or cannot be cancelled"))?;

    let order = mark_cancelled(&txn, order).await?;
    txn.commit().await?;
    Ok(order)
}

/// Admin-side status change. Any target status is reachable except out
/// of `cancelled`; moving into `cancelled` restores stock exactly once.
pub async fn set_status<C>(
    db: &C,
    order_id: &str,
    status: OrderStatus,
) -> Result<order::Model, ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found!("Order not found"))?;

    if !transition_allowed(UserRole::Admin, order.status, status) {
        return Err(bad_request!("Cannot update a cancelled order"));
    }

    let order = if status == OrderStatus::Cancelled {
        mark_cancelled(&txn, order).await?
    } else {
        let mut active: order::ActiveModel = order.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(&txn).await?
    };

    txn.commit().await?;
    Ok(order)
}

/// Self-reported payment confirmation. Owners may update their own
/// orders, admins anyone's. A completed payment on a still-pending
/// order confirms it in the same write.
pub async fn set_payment_status<C: ConnectionTrait>(
    db: &C,
    actor: &user::Model,
    order_id: &str,
    payment_status: PaymentStatus,
) -> Result<order::Model, ApiError> {
    let mut query = Order::find_by_id(order_id);
    if actor.role != UserRole::Admin {
        query = query.filter(order::Column::UserId.eq(&actor.id));
    }

    let order = query
        .one(db)
        .await?
        .ok_or_else(|| not_found!("Order not found"))?;

    let confirm =
        payment_status == PaymentStatus::Completed && order.status == OrderStatus::Pending;

    let mut active: order::ActiveModel = order.into();
    active.payment_status = Set(payment_status);
    if confirm {
        active.status = Set(OrderStatus::Confirmed);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_terminal_for_everyone() {
        for to in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!transition_allowed(UserRole::Admin, OrderStatus::Cancelled, to));
            assert!(!transition_allowed(UserRole::Customer, OrderStatus::Cancelled, to));
        }
    }

    #[test]
    fn customers_cancel_only_before_processing() {
        assert!(transition_allowed(
            UserRole::Customer,
            OrderStatus::Pending,
            OrderStatus::Cancelled
        ));
        assert!(transition_allowed(
            UserRole::Customer,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled
        ));
        assert!(!transition_allowed(
            UserRole::Customer,
            OrderStatus::Processing,
            OrderStatus::Cancelled
        ));
        assert!(!transition_allowed(
            UserRole::Customer,
            OrderStatus::Shipped,
            OrderStatus::Cancelled
        ));
        assert!(!transition_allowed(
            UserRole::Customer,
            OrderStatus::Pending,
            OrderStatus::Shipped
        ));
    }

    #[test]
    fn admins_move_orders_freely_until_cancelled() {
        assert!(transition_allowed(
            UserRole::Admin,
            OrderStatus::Pending,
            OrderStatus::Delivered
        ));
        assert!(transition_allowed(
            UserRole::Admin,
            OrderStatus::Shipped,
            OrderStatus::Cancelled
        ));
        assert!(transition_allowed(
            UserRole::Admin,
            OrderStatus::Delivered,
            OrderStatus::Pending
        ));
    }
}
