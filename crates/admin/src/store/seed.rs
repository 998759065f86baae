//! Deterministic seed data for the mock collections.
//!
//! Fixed IDs and timestamps keep list ordering and pagination stable
//! across restarts, which the integration tests rely on.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use orchard_core::{
    AdminRole, AdminUserId, BrandId, CouponId, CouponType, Email, ProductId, ShippingMethodId,
    ShippingRateId, UserId, UserRole, UserStatus, VariantId,
};

use crate::error::{AdminError, Result};
use crate::models::{
    AdminAccount, Brand, Coupon, Product, ProductVariant, ShippingMethod, ShippingRate, User,
};
use crate::services::passwords;

/// First ID handed out for records created at runtime. Seed IDs stay
/// below this.
pub const FIRST_FREE_ID: i64 = 1000;

/// Default dev credentials: `root@orchard.test` / this password.
const DEV_ROOT_PASSWORD: &str = "orchard-dev-root";
/// Default dev credentials: `staff@orchard.test` / this password.
const DEV_STAFF_PASSWORD: &str = "orchard-dev-staff";

pub struct SeedData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub brands: Vec<Brand>,
    pub coupons: Vec<Coupon>,
    pub shipping_rates: Vec<ShippingRate>,
    pub shipping_methods: Vec<ShippingMethod>,
    pub admins: Vec<AdminAccount>,
}

pub fn seed_data() -> Result<SeedData> {
    Ok(SeedData {
        users: users(),
        products: products(),
        brands: brands(),
        coupons: coupons(),
        shipping_rates: shipping_rates(),
        shipping_methods: shipping_methods(),
        admins: admins()?,
    })
}

fn day(month: u32, day: u32) -> DateTime<Utc> {
    // Seed data lives in the first half of 2025.
    Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn email(raw: &str) -> Email {
    // Seed addresses are static literals; a parse failure is a programming
    // error surfaced in tests, not a runtime condition.
    Email::parse(raw).unwrap_or_else(|_| unreachable!("invalid seed email: {raw}"))
}

fn users() -> Vec<User> {
    let rows: [(i64, &str, &str, UserRole, UserStatus, u32, u32); 8] = [
        (1, "Ada Lovelace", "ada@example.com", UserRole::Admin, UserStatus::Active, 1, 6),
        (2, "Grace Hopper", "grace@example.com", UserRole::Manager, UserStatus::Active, 1, 14),
        (3, "Alan Turing", "alan@example.com", UserRole::Customer, UserStatus::Active, 2, 2),
        (4, "Katherine Johnson", "katherine@example.com", UserRole::Customer, UserStatus::Active, 2, 20),
        (5, "Edsger Dijkstra", "edsger@example.com", UserRole::Customer, UserStatus::Inactive, 3, 8),
        (6, "Barbara Liskov", "barbara@example.com", UserRole::Customer, UserStatus::Active, 3, 25),
        (7, "Donald Knuth", "donald@example.com", UserRole::Customer, UserStatus::Suspended, 4, 11),
        (8, "Margaret Hamilton", "margaret@example.com", UserRole::Manager, UserStatus::Active, 4, 30),
    ];

    rows.into_iter()
        .map(|(id, name, mail, role, status, m, d)| User {
            id: UserId::from(id),
            name: name.to_string(),
            email: email(mail),
            role,
            status,
            created_at: day(m, d),
        })
        .collect()
}

fn products() -> Vec<Product> {
    let rows: [(i64, &str, i64, u32, &str, Option<i64>, u32, u32); 10] = [
        (101, "Trail Runner Shoes", 12999, 42, "footwear", Some(201), 1, 10),
        (102, "Alpine Day Pack", 8950, 7, "packs", Some(202), 1, 18),
        (103, "Merino Base Layer", 6400, 0, "apparel", Some(203), 2, 3),
        (104, "Titanium Cook Set", 11900, 15, "camp-kitchen", Some(204), 2, 9),
        (105, "Featherlite Tent", 34900, 4, "shelter", Some(202), 2, 27),
        (106, "Insulated Flask", 3250, 88, "camp-kitchen", Some(204), 3, 5),
        (107, "Ridge Softshell", 15800, 23, "apparel", Some(203), 3, 16),
        (108, "Summit Headlamp", 4999, 10, "lighting", Some(205), 4, 1),
        (109, "Glacier Sunglasses", 7600, 31, "accessories", Some(205), 4, 22),
        (110, "Approach Sandals", 5900, 0, "footwear", Some(201), 5, 7),
    ];

    let mut products: Vec<Product> = rows
        .into_iter()
        .map(|(id, name, cents, stock, category, brand, m, d)| Product {
            id: ProductId::from(id),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            stock,
            category: category.to_string(),
            brand_id: brand.map(BrandId::from),
            archived: false,
            variants: vec![],
            created_at: day(m, d),
        })
        .collect();

    // A couple of products carry variants and one is archived.
    if let Some(shoes) = products.first_mut() {
        shoes.variants = vec![
            ProductVariant {
                id: VariantId::from(151),
                name: "US 9".to_string(),
                price: Decimal::new(12999, 2),
                stock: 18,
            },
            ProductVariant {
                id: VariantId::from(152),
                name: "US 10".to_string(),
                price: Decimal::new(12999, 2),
                stock: 24,
            },
        ];
    }
    if let Some(sandals) = products.last_mut() {
        sandals.archived = true;
    }

    products
}

fn brands() -> Vec<Brand> {
    let rows: [(i64, &str, u32, u32); 5] = [
        (201, "Cairn Footwear", 1, 2),
        (202, "North Col", 1, 4),
        (203, "Woolgather", 1, 9),
        (204, "Basecamp Supply", 2, 1),
        (205, "Lumen Gear", 2, 12),
    ];

    rows.into_iter()
        .map(|(id, name, m, d)| Brand {
            id: BrandId::from(id),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            active: true,
            created_at: day(m, d),
        })
        .collect()
}

fn coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            id: CouponId::from(301),
            code: "WELCOME10".to_string(),
            coupon_type: CouponType::Percentage,
            value: Decimal::from(10),
            min_order_value: Decimal::ZERO,
            active: true,
            expires_at: None,
            created_at: day(1, 2),
        },
        Coupon {
            id: CouponId::from(302),
            code: "SUMMER25".to_string(),
            coupon_type: CouponType::Percentage,
            value: Decimal::from(25),
            min_order_value: Decimal::from(100),
            active: true,
            expires_at: Some(day(9, 1)),
            created_at: day(2, 15),
        },
        Coupon {
            id: CouponId::from(303),
            code: "TENOFF".to_string(),
            coupon_type: CouponType::Fixed,
            value: Decimal::from(10),
            min_order_value: Decimal::from(50),
            active: true,
            expires_at: None,
            created_at: day(3, 1),
        },
        Coupon {
            id: CouponId::from(304),
            code: "FREESHIP".to_string(),
            coupon_type: CouponType::Shipping,
            value: Decimal::ZERO,
            min_order_value: Decimal::from(75),
            active: true,
            expires_at: None,
            created_at: day(3, 20),
        },
        Coupon {
            id: CouponId::from(305),
            code: "EXPIRED5".to_string(),
            coupon_type: CouponType::Fixed,
            value: Decimal::from(5),
            min_order_value: Decimal::ZERO,
            active: false,
            expires_at: Some(day(2, 1)),
            created_at: day(1, 10),
        },
    ]
}

fn shipping_rates() -> Vec<ShippingRate> {
    let rows: [(i64, &str, i64, u32, u32, u32, u32); 4] = [
        (401, "US", 599, 3, 7, 1, 3),
        (402, "Canada", 999, 5, 10, 1, 3),
        (403, "EU", 1499, 7, 14, 2, 8),
        (404, "APAC", 1999, 10, 21, 2, 8),
    ];

    rows.into_iter()
        .map(|(id, region, cents, min, max, m, d)| ShippingRate {
            id: ShippingRateId::from(id),
            region: region.to_string(),
            rate: Decimal::new(cents, 2),
            min_days: min,
            max_days: max,
            created_at: day(m, d),
        })
        .collect()
}

fn shipping_methods() -> Vec<ShippingMethod> {
    let rows: [(i64, &str, &str, bool, u32, u32); 4] = [
        (451, "Ground", "UPS", true, 1, 5),
        (452, "Express", "FedEx", true, 1, 5),
        (453, "Economy", "USPS", true, 2, 10),
        (454, "Freight", "DHL", false, 3, 15),
    ];

    rows.into_iter()
        .map(|(id, name, carrier, active, m, d)| ShippingMethod {
            id: ShippingMethodId::from(id),
            name: name.to_string(),
            carrier: carrier.to_string(),
            active,
            created_at: day(m, d),
        })
        .collect()
}

fn admins() -> Result<Vec<AdminAccount>> {
    let hash = |password: &str| {
        passwords::hash_password(password)
            .map_err(|e| AdminError::Internal(format!("seed password hashing failed: {e}")))
    };

    Ok(vec![
        AdminAccount {
            id: AdminUserId::from(501),
            name: "Root Admin".to_string(),
            email: email("root@orchard.test"),
            role: AdminRole::SuperAdmin,
            password_hash: hash(DEV_ROOT_PASSWORD)?,
            created_at: day(1, 1),
        },
        AdminAccount {
            id: AdminUserId::from(502),
            name: "Staff Admin".to_string(),
            email: email("staff@orchard.test"),
            role: AdminRole::Admin,
            password_hash: hash(DEV_STAFF_PASSWORD)?,
            created_at: day(1, 1),
        },
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_below_first_free() {
        let data = seed_data().unwrap();
        assert!(data.users.iter().all(|u| i64::from(u.id) < FIRST_FREE_ID));
        assert!(
            data.products
                .iter()
                .all(|p| i64::from(p.id) < FIRST_FREE_ID)
        );
        assert!(data.admins.iter().all(|a| i64::from(a.id) < FIRST_FREE_ID));
    }

    #[test]
    fn test_seed_emails_are_unique() {
        let data = seed_data().unwrap();
        let mut emails: Vec<&str> = data.users.iter().map(|u| u.email.as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), data.users.len());
    }

    #[test]
    fn test_dev_admin_password_verifies() {
        let data = seed_data().unwrap();
        let root = data.admins.first().unwrap();
        assert!(passwords::verify_password(DEV_ROOT_PASSWORD, &root.password_hash));
        assert!(!passwords::verify_password("wrong", &root.password_hash));
    }

    #[test]
    fn test_product_status_spread() {
        let products = products();
        let statuses: Vec<orchard_core::ProductStatus> =
            products.iter().map(Product::status).collect();
        assert!(statuses.contains(&orchard_core::ProductStatus::Active));
        assert!(statuses.contains(&orchard_core::ProductStatus::LowStock));
        assert!(statuses.contains(&orchard_core::ProductStatus::OutOfStock));
        assert!(statuses.contains(&orchard_core::ProductStatus::Archived));
    }
}
