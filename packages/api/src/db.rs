use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    Schema, Set, sea_query::Index,
};

use kirana_types::create_id;

use crate::entity::{cart_item, category, prelude::*, product, sea_orm_active_enums::UserRole, user};

/// Creates any missing tables from the entity definitions, plus the unique
/// index that folds duplicate cart adds into one row. Safe to run on every
/// start.
pub async fn setup(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut users = schema.create_table_from_entity(User);
    let mut categories = schema.create_table_from_entity(Category);
    let mut products = schema.create_table_from_entity(Product);
    let mut cart_items = schema.create_table_from_entity(CartItem);
    let mut orders = schema.create_table_from_entity(Order);
    let mut order_items = schema.create_table_from_entity(OrderItem);

    for stmt in [
        users.if_not_exists(),
        categories.if_not_exists(),
        products.if_not_exists(),
        cart_items.if_not_exists(),
        orders.if_not_exists(),
        order_items.if_not_exists(),
    ] {
        db.execute(builder.build(stmt)).await?;
    }

    let cart_unique = Index::create()
        .name("idx_cart_items_user_product")
        .table(cart_item::Entity)
        .col(cart_item::Column::UserId)
        .col(cart_item::Column::ProductId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&cart_unique)).await?;

    Ok(())
}

/// bcrypt("password"), cost 10. The hash the store ships with so a fresh
/// deployment has a working back-office login.
const ADMIN_EMAIL: &str = "admin@foodstore.com";
const ADMIN_PASSWORD_HASH: &str = "$2a$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi";

/// Seeds the default admin account, categories and sample catalog. No-op
/// when any user already exists; returns whether anything was written.
pub async fn seed(db: &DatabaseConnection) -> Result<bool, DbErr> {
    if User::find().count(db).await? > 0 {
        return Ok(false);
    }

    let now = Utc::now().naive_utc();

    user::ActiveModel {
        id: Set(create_id()),
        name: Set("Admin".to_string()),
        email: Set(ADMIN_EMAIL.to_string()),
        password_hash: Set(ADMIN_PASSWORD_HASH.to_string()),
        phone: Set(None),
        address: Set(None),
        role: Set(UserRole::Admin),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    let categories = [
        ("Snacks", "Packaged snacks and chips"),
        ("Beverages", "Drinks and juices"),
        ("Dairy", "Milk products and dairy items"),
        ("Grains & Cereals", "Rice, wheat, and other grains"),
        ("Spices", "Spices and seasonings"),
    ];

    let mut category_ids = Vec::with_capacity(categories.len());
    for (name, description) in categories {
        let id = create_id();
        category::ActiveModel {
            id: Set(id.clone()),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            image: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await?;
        category_ids.push(id);
    }

    // (name, description, price in hundredths, category index, stock, weight, brand)
    let catalog: [(&str, &str, i64, usize, i32, &str, &str); 10] = [
        (
            "Premium Basmati Rice",
            "Long grain aromatic basmati rice perfect for biryanis and pulao",
            29999,
            3,
            50,
            "5kg",
            "India Gate",
        ),
        (
            "Organic Whole Wheat Flour",
            "Stone ground organic wheat flour for healthy rotis",
            8999,
            3,
            30,
            "2kg",
            "Organic India",
        ),
        (
            "Mixed Fruit Juice",
            "Fresh mixed fruit juice with no added sugar",
            4599,
            1,
            25,
            "1L",
            "Real",
        ),
        (
            "Potato Chips - Classic Salted",
            "Crispy potato chips with perfect salt seasoning",
            2599,
            0,
            100,
            "50g",
            "Lays",
        ),
        (
            "Fresh Milk",
            "Pure cow milk rich in calcium and protein",
            2899,
            2,
            20,
            "500ml",
            "Amul",
        ),
        (
            "Turmeric Powder",
            "Pure turmeric powder for cooking and health benefits",
            6599,
            4,
            40,
            "200g",
            "MDH",
        ),
        (
            "Green Tea Bags",
            "Premium green tea bags for healthy lifestyle",
            12599,
            1,
            35,
            "25 bags",
            "Twinings",
        ),
        (
            "Paneer",
            "Fresh cottage cheese perfect for curries",
            8599,
            2,
            15,
            "200g",
            "Mother Dairy",
        ),
        (
            "Masala Oats",
            "Healthy breakfast option with Indian spices",
            5599,
            3,
            45,
            "500g",
            "Quaker",
        ),
        (
            "Chocolate Cookies",
            "Delicious chocolate chip cookies for tea time",
            3599,
            0,
            60,
            "100g",
            "Britannia",
        ),
    ];

    let products = catalog
        .into_iter()
        .map(
            |(name, description, price, category, stock, weight, brand)| product::ActiveModel {
                id: Set(create_id()),
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                price: Set(Decimal::new(price, 2)),
                category_id: Set(Some(category_ids[category].clone())),
                stock_quantity: Set(stock),
                image: Set(None),
                weight: Set(Some(weight.to_string())),
                expiry_date: Set(None),
                brand: Set(Some(brand.to_string())),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            },
        )
        .collect::<Vec<_>>();

    Product::insert_many(products).exec(db).await?;

    tracing::info!(
        "Seeded default admin, {} categories and sample catalog",
        category_ids.len()
    );
    Ok(true)
}
