//! Checkout turns a cart into an order inside a single transaction.
//!
//! Stock is debited with a conditional `UPDATE .. SET stock_quantity =
//! stock_quantity - ? WHERE id = ? AND stock_quantity >= ?` so two
//! concurrent checkouts can never drive a product negative. If any line
//! fails that guard the transaction rolls back and the cart is left
//! untouched.

use chrono::Utc;
use kirana_types::create_id;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait, sea_query::Expr,
};
use serde::Serialize;

use crate::{
    bad_request,
    entity::{
        cart_item, order, order_item,
        prelude::*,
        product,
        sea_orm_active_enums::{OrderStatus, PaymentStatus},
    },
    error::ApiError,
    payment::{self, qr, upi},
    state::StoreConfig,
};

#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub delivery_address: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// What the storefront needs to render the payment screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub id: String,
    pub total_amount: Decimal,
    pub qr_code: String,
    pub order_reference: String,
    pub upi_string: String,
}

pub async fn create_order<C>(
    db: &C,
    user_id: &str,
    request: CreateOrder,
    store: &StoreConfig,
) -> Result<PlacedOrder, ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let delivery_address = request.delivery_address.trim();
    let phone = request.phone.trim();
    if delivery_address.is_empty() || phone.is_empty() {
        return Err(bad_request!("Delivery address and phone are required"));
    }

    let txn = db.begin().await?;

    let lines = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .find_also_related(Product)
        .filter(product::Column::IsActive.eq(true))
        .all(&txn)
        .await?;

    if lines.is_empty() {
        return Err(bad_request!("Cart is empty"));
    }

    let mut total = Decimal::ZERO;
    let mut purchase = Vec::with_capacity(lines.len());
    for (entry, product) in lines {
        let Some(product) = product else { continue };
        if product.stock_quantity < entry.quantity {
            return Err(bad_request!(
                "Insufficient stock for {}. Available: {}",
                product.name,
                product.stock_quantity
            ));
        }
        total += product.price * Decimal::from(entry.quantity);
        purchase.push((entry, product));
    }
    let total = total.round_dp(2);

    let reference = payment::order_reference();
    let upi_string = upi::payment_string(store, total, &reference);
    let qr_code = qr::qr_data_url(&upi_string)?;

    let now = Utc::now().naive_utc();
    let order_id = create_id();
    order::ActiveModel {
        id: Set(order_id.clone()),
        user_id: Set(user_id.to_string()),
        total_amount: Set(total),
        status: Set(OrderStatus::Pending),
        payment_status: Set(PaymentStatus::Pending),
        payment_method: Set("upi".to_string()),
        delivery_address: Set(delivery_address.to_string()),
        phone: Set(phone.to_string()),
        notes: Set(request.notes.clone()),
        order_reference: Set(reference.clone()),
        upi_string: Set(upi_string.clone()),
        qr_code: Set(qr_code.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let items: Vec<order_item::ActiveModel> = purchase
        .iter()
        .map(|(entry, product)| order_item::ActiveModel {
            id: Set(create_id()),
            order_id: Set(order_id.clone()),
            product_id: Set(product.id.clone()),
            quantity: Set(entry.quantity),
            price: Set(product.price),
        })
        .collect();
    OrderItem::insert_many(items).exec(&txn).await?;

    for (entry, product) in &purchase {
        let debited = Product::update_many()
            .col_expr(
                product::Column::StockQuantity,
                Expr::col(product::Column::StockQuantity).sub(entry.quantity),
            )
            .filter(product::Column::Id.eq(&product.id))
            .filter(product::Column::StockQuantity.gte(entry.quantity))
            .exec(&txn)
            .await?;

        // Zero rows means another checkout won the race since our read.
        if debited.rows_affected == 0 {
            return Err(bad_request!(
                "Insufficient stock for {}. Available: {}",
                product.name,
                product.stock_quantity
            ));
        }
    }

    CartItem::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(PlacedOrder {
        id: order_id,
        total_amount: total,
        qr_code,
        order_reference: reference,
        upi_string,
    })
}
