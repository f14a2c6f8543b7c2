//! Cart data access. Every write is scoped to the owning user so one
//! customer can never touch another customer's cart rows.

use chrono::{NaiveDateTime, Utc};
use kirana_types::create_id;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::{
    bad_request,
    entity::{cart_item, prelude::*, product},
    error::ApiError,
    not_found,
};

/// One cart row joined with the product it points at.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub stock_quantity: i32,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_amount: Decimal,
}

/// Adds a product to the cart, folding into the existing row when the
/// product is already there. The stock check covers the combined
/// quantity, not just the increment. Returns the row plus whether it
/// was newly created.
pub async fn add_item<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    product_id: &str,
    quantity: i32,
) -> Result<(cart_item::Model, bool), ApiError> {
    if quantity < 1 {
        return Err(bad_request!("Valid quantity required"));
    }

    let product = Product::find_by_id(product_id)
        .filter(product::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| not_found!("Product not found"))?;

    let existing = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(db)
        .await?;

    let requested = existing.as_ref().map_or(0, |entry| entry.quantity) + quantity;
    if product.stock_quantity < requested {
        return Err(bad_request!("Insufficient stock"));
    }

    match existing {
        Some(entry) => {
            let mut active: cart_item::ActiveModel = entry.into();
            active.quantity = Set(requested);
            Ok((active.update(db).await?, false))
        }
        None => {
            let entry = cart_item::ActiveModel {
                id: Set(create_id()),
                user_id: Set(user_id.to_string()),
                product_id: Set(product_id.to_string()),
                quantity: Set(quantity),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(db)
            .await?;
            Ok((entry, true))
        }
    }
}

/// Replaces the quantity on a cart row the user owns.
pub async fn set_quantity<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    cart_item_id: &str,
    quantity: i32,
) -> Result<cart_item::Model, ApiError> {
    if quantity < 1 {
        return Err(bad_request!("Valid quantity required"));
    }

    let Some((entry, Some(product))) = CartItem::find_by_id(cart_item_id)
        .filter(cart_item::Column::UserId.eq(user_id))
        .find_also_related(Product)
        .one(db)
        .await?
    else {
        return Err(not_found!("Cart item not found"));
    };

    if product.stock_quantity < quantity {
        return Err(bad_request!("Insufficient stock"));
    }

    let mut active: cart_item::ActiveModel = entry.into();
    active.quantity = Set(quantity);
    Ok(active.update(db).await?)
}

pub async fn remove_item<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    cart_item_id: &str,
) -> Result<(), ApiError> {
    let deleted = CartItem::delete_many()
        .filter(cart_item::Column::Id.eq(cart_item_id))
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if deleted.rows_affected == 0 {
        return Err(not_found!("Cart item not found"));
    }

    Ok(())
}

/// Removes every cart row for the user. Safe to call on an empty cart.
pub async fn clear<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<u64, ApiError> {
    let deleted = CartItem::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(deleted.rows_affected)
}

/// Loads the cart joined with live product data. Rows whose product has
/// been deactivated are hidden from the view but stay in the table so
/// they reappear if the product comes back.
pub async fn get_cart<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<CartView, ApiError> {
    let rows = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .find_also_related(Product)
        .filter(product::Column::IsActive.eq(true))
        .order_by_desc(cart_item::Column::CreatedAt)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    let mut total = Decimal::ZERO;

    for (entry, product) in rows {
        let Some(product) = product else { continue };
        let line_total = product.price * Decimal::from(entry.quantity);
        total += line_total;
        items.push(CartLine {
            id: entry.id,
            user_id: entry.user_id,
            product_id: entry.product_id,
            quantity: entry.quantity,
            created_at: entry.created_at,
            name: product.name,
            price: product.price,
            image: product.image,
            stock_quantity: product.stock_quantity,
            total_price: line_total,
        });
    }

    Ok(CartView {
        items,
        total_amount: total.round_dp(2),
    })
}
