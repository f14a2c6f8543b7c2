//! `SeaORM` Entities for the storefront schema

pub mod prelude;
pub mod sea_orm_active_enums;

pub mod cart_item;
pub mod category;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
