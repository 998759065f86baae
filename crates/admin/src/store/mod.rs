//! In-memory collections backing the admin CRUD endpoints.
//!
//! Persistence is delegated to an unseen backend; this store holds seeded
//! mock collections behind `tokio::sync::RwLock` so concurrent requests
//! see consistent snapshots. List reads clone a snapshot and hand it to
//! the shared query engine.

mod seed;

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::RwLock;

use orchard_core::{
    BrandId, CouponId, CouponType, Email, ListParams, Page, ProductId, ShippingMethodId,
    ShippingRateId, UserId, UserRole, UserStatus, VariantId, select,
};

use crate::error::{AdminError, Result};
use crate::models::{
    AdminAccount, Brand, Coupon, Product, ProductVariant, ShippingMethod, ShippingRate, User,
};

/// Mock collections shared across requests.
pub struct MockStore {
    users: RwLock<Vec<User>>,
    products: RwLock<Vec<Product>>,
    brands: RwLock<Vec<Brand>>,
    coupons: RwLock<Vec<Coupon>>,
    shipping_rates: RwLock<Vec<ShippingRate>>,
    shipping_methods: RwLock<Vec<ShippingMethod>>,
    admins: RwLock<Vec<AdminAccount>>,
    next_id: AtomicI64,
}

impl MockStore {
    /// Build the store with its deterministic seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails (admin password hashing).
    pub fn seeded() -> Result<Self> {
        let data = seed::seed_data()?;
        Ok(Self {
            users: RwLock::new(data.users),
            products: RwLock::new(data.products),
            brands: RwLock::new(data.brands),
            coupons: RwLock::new(data.coupons),
            shipping_rates: RwLock::new(data.shipping_rates),
            shipping_methods: RwLock::new(data.shipping_methods),
            admins: RwLock::new(data.admins),
            next_id: AtomicI64::new(seed::FIRST_FREE_ID),
        })
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    // =========================================================================
    // Admin accounts
    // =========================================================================

    /// Look up an admin account by email for login.
    pub async fn find_admin_by_email(&self, email: &str) -> Option<AdminAccount> {
        self.admins
            .read()
            .await
            .iter()
            .find(|a| a.email.as_str().eq_ignore_ascii_case(email))
            .cloned()
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn list_users(&self, params: &ListParams) -> Page<User> {
        select(&self.users.read().await, params)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("user {id}")))
    }

    /// Create a user. Email uniqueness is enforced case-insensitively.
    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        let email = Email::parse(&input.email)
            .map_err(|e| AdminError::Validation(format!("email: {e}")))?;
        let name = non_empty(&input.name, "name")?;

        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email.as_str().eq_ignore_ascii_case(email.as_str()))
        {
            return Err(AdminError::Validation(format!(
                "email already in use: {email}"
            )));
        }

        let user = User {
            id: UserId::from(self.allocate_id()),
            name,
            email,
            role: input.role.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User> {
        let mut users = self.users.write().await;

        if let Some(email) = &patch.email {
            let parsed = Email::parse(email)
                .map_err(|e| AdminError::Validation(format!("email: {e}")))?;
            if users.iter().any(|u| {
                u.id != id && u.email.as_str().eq_ignore_ascii_case(parsed.as_str())
            }) {
                return Err(AdminError::Validation(format!(
                    "email already in use: {parsed}"
                )));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("user {id}")))?;

        if let Some(name) = patch.name {
            user.name = non_empty(&name, "name")?;
        }
        if let Some(email) = patch.email {
            // Already validated above.
            user.email = Email::parse(&email)
                .map_err(|e| AdminError::Validation(format!("email: {e}")))?;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(status) = patch.status {
            user.status = status;
        }
        Ok(user.clone())
    }

    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        remove_by(&self.users, |u| u.id == id, || format!("user {id}")).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(&self, params: &ListParams) -> Page<Product> {
        select(&self.products.read().await, params)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("product {id}")))
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<Product> {
        let name = non_empty(&input.name, "name")?;
        let category = non_empty(&input.category, "category")?;
        if input.price < Decimal::ZERO {
            return Err(AdminError::Validation("price must not be negative".to_string()));
        }

        let variants = input
            .variants
            .into_iter()
            .map(|v| {
                Ok(ProductVariant {
                    id: VariantId::from(self.allocate_id()),
                    name: non_empty(&v.name, "variant name")?,
                    price: v.price,
                    stock: v.stock,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let product = Product {
            id: ProductId::from(self.allocate_id()),
            name,
            price: input.price,
            stock: input.stock,
            category,
            brand_id: input.brand_id,
            archived: false,
            variants,
            created_at: Utc::now(),
        };
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("product {id}")))?;

        if let Some(name) = patch.name {
            product.name = non_empty(&name, "name")?;
        }
        if let Some(price) = patch.price {
            if price < Decimal::ZERO {
                return Err(AdminError::Validation("price must not be negative".to_string()));
            }
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(category) = patch.category {
            product.category = non_empty(&category, "category")?;
        }
        if let Some(brand_id) = patch.brand_id {
            product.brand_id = brand_id;
        }
        if let Some(archived) = patch.archived {
            product.archived = archived;
        }
        Ok(product.clone())
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        remove_by(&self.products, |p| p.id == id, || format!("product {id}")).await
    }

    // =========================================================================
    // Brands
    // =========================================================================

    pub async fn list_brands(&self, params: &ListParams) -> Page<Brand> {
        select(&self.brands.read().await, params)
    }

    pub async fn get_brand(&self, id: BrandId) -> Result<Brand> {
        self.brands
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("brand {id}")))
    }

    pub async fn create_brand(&self, input: NewBrand) -> Result<Brand> {
        let name = non_empty(&input.name, "name")?;
        let slug = slugify(&name);

        let mut brands = self.brands.write().await;
        if brands.iter().any(|b| b.slug == slug) {
            return Err(AdminError::Validation(format!("brand already exists: {slug}")));
        }

        let brand = Brand {
            id: BrandId::from(self.allocate_id()),
            name,
            slug,
            active: input.active.unwrap_or(true),
            created_at: Utc::now(),
        };
        brands.push(brand.clone());
        Ok(brand)
    }

    pub async fn update_brand(&self, id: BrandId, patch: BrandPatch) -> Result<Brand> {
        let mut brands = self.brands.write().await;
        let brand = brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("brand {id}")))?;

        if let Some(name) = patch.name {
            brand.name = non_empty(&name, "name")?;
            brand.slug = slugify(&brand.name);
        }
        if let Some(active) = patch.active {
            brand.active = active;
        }
        Ok(brand.clone())
    }

    pub async fn delete_brand(&self, id: BrandId) -> Result<()> {
        remove_by(&self.brands, |b| b.id == id, || format!("brand {id}")).await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    pub async fn list_coupons(&self, params: &ListParams) -> Page<Coupon> {
        select(&self.coupons.read().await, params)
    }

    pub async fn get_coupon(&self, id: CouponId) -> Result<Coupon> {
        self.coupons
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("coupon {id}")))
    }

    pub async fn create_coupon(&self, input: NewCoupon) -> Result<Coupon> {
        let code = input.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AdminError::Validation("code is required".to_string()));
        }
        validate_coupon_value(input.coupon_type, input.value)?;

        let mut coupons = self.coupons.write().await;
        if coupons.iter().any(|c| c.code == code) {
            return Err(AdminError::Validation(format!("coupon already exists: {code}")));
        }

        let coupon = Coupon {
            id: CouponId::from(self.allocate_id()),
            code,
            coupon_type: input.coupon_type,
            value: input.value,
            min_order_value: input.min_order_value.unwrap_or(Decimal::ZERO),
            active: input.active.unwrap_or(true),
            expires_at: input.expires_at,
            created_at: Utc::now(),
        };
        coupons.push(coupon.clone());
        Ok(coupon)
    }

    pub async fn update_coupon(&self, id: CouponId, patch: CouponPatch) -> Result<Coupon> {
        let mut coupons = self.coupons.write().await;
        let coupon = coupons
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AdminError::NotFound(format!("coupon {id}")))?;

        if let Some(value) = patch.value {
            validate_coupon_value(coupon.coupon_type, value)?;
            coupon.value = value;
        }
        if let Some(min) = patch.min_order_value {
            coupon.min_order_value = min;
        }
        if let Some(active) = patch.active {
            coupon.active = active;
        }
        if let Some(expires_at) = patch.expires_at {
            coupon.expires_at = expires_at;
        }
        Ok(coupon.clone())
    }

    pub async fn delete_coupon(&self, id: CouponId) -> Result<()> {
        remove_by(&self.coupons, |c| c.id == id, || format!("coupon {id}")).await
    }

    // =========================================================================
    // Shipping
    // =========================================================================

    pub async fn list_shipping_rates(&self, params: &ListParams) -> Page<ShippingRate> {
        select(&self.shipping_rates.read().await, params)
    }

    pub async fn create_shipping_rate(&self, input: NewShippingRate) -> Result<ShippingRate> {
        let region = non_empty(&input.region, "region")?;
        if input.rate < Decimal::ZERO {
            return Err(AdminError::Validation("rate must not be negative".to_string()));
        }
        if input.min_days > input.max_days {
            return Err(AdminError::Validation(
                "min_days must not exceed max_days".to_string(),
            ));
        }

        let rate = ShippingRate {
            id: ShippingRateId::from(self.allocate_id()),
            region,
            rate: input.rate,
            min_days: input.min_days,
            max_days: input.max_days,
            created_at: Utc::now(),
        };
        self.shipping_rates.write().await.push(rate.clone());
        Ok(rate)
    }

    pub async fn delete_shipping_rate(&self, id: ShippingRateId) -> Result<()> {
        remove_by(&self.shipping_rates, |r| r.id == id, || {
            format!("shipping rate {id}")
        })
        .await
    }

    pub async fn list_shipping_methods(&self, params: &ListParams) -> Page<ShippingMethod> {
        select(&self.shipping_methods.read().await, params)
    }

    pub async fn create_shipping_method(&self, input: NewShippingMethod) -> Result<ShippingMethod> {
        let method = ShippingMethod {
            id: ShippingMethodId::from(self.allocate_id()),
            name: non_empty(&input.name, "name")?,
            carrier: non_empty(&input.carrier, "carrier")?,
            active: input.active.unwrap_or(true),
            created_at: Utc::now(),
        };
        self.shipping_methods.write().await.push(method.clone());
        Ok(method)
    }

    pub async fn delete_shipping_method(&self, id: ShippingMethodId) -> Result<()> {
        remove_by(&self.shipping_methods, |m| m.id == id, || {
            format!("shipping method {id}")
        })
        .await
    }
}

// =============================================================================
// Inputs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    pub category: String,
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub variants: Vec<NewVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariant {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    /// `Some(None)` clears the brand.
    #[serde(default, with = "double_option")]
    pub brand_id: Option<Option<BrandId>>,
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrand {
    pub name: String,
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub value: Decimal,
    pub min_order_value: Option<Decimal>,
    pub active: Option<bool>,
    pub expires_at: Option<chrono::DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPatch {
    pub value: Option<Decimal>,
    pub min_order_value: Option<Decimal>,
    pub active: Option<bool>,
    /// `Some(None)` clears the expiry.
    #[serde(default, with = "double_option")]
    pub expires_at: Option<Option<chrono::DateTime<Utc>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShippingRate {
    pub region: String,
    pub rate: Decimal,
    pub min_days: u32,
    pub max_days: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShippingMethod {
    pub name: String,
    pub carrier: String,
    pub active: Option<bool>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Deserialize a field where absent, null, and a value are all distinct.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

fn non_empty(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn validate_coupon_value(coupon_type: CouponType, value: Decimal) -> Result<()> {
    match coupon_type {
        CouponType::Percentage => {
            if value <= Decimal::ZERO || value > Decimal::from(100) {
                return Err(AdminError::Validation(
                    "percentage value must be in (0, 100]".to_string(),
                ));
            }
        }
        CouponType::Fixed => {
            if value <= Decimal::ZERO {
                return Err(AdminError::Validation(
                    "fixed value must be positive".to_string(),
                ));
            }
        }
        // Free-shipping coupons carry no amount.
        CouponType::Shipping => {}
    }
    Ok(())
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

async fn remove_by<T, F, M>(collection: &RwLock<Vec<T>>, pred: F, what: M) -> Result<()>
where
    F: Fn(&T) -> bool,
    M: FnOnce() -> String,
{
    let mut items = collection.write().await;
    let before = items.len();
    items.retain(|item| !pred(item));
    if items.len() == before {
        return Err(AdminError::NotFound(what()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> MockStore {
        MockStore::seeded().unwrap()
    }

    #[tokio::test]
    async fn test_seeded_collections_are_nonempty() {
        let store = store();
        let params = ListParams::new();
        assert!(store.list_users(&params).await.total > 0);
        assert!(store.list_products(&params).await.total > 0);
        assert!(store.list_brands(&params).await.total > 0);
        assert!(store.list_coupons(&params).await.total > 0);
        assert!(store.list_shipping_rates(&params).await.total > 0);
        assert!(store.list_shipping_methods(&params).await.total > 0);
    }

    #[tokio::test]
    async fn test_create_user_allocates_fresh_id() {
        let store = store();
        let user = store
            .create_user(NewUser {
                name: "New Person".to_string(),
                email: "new.person@example.com".to_string(),
                role: None,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.status, UserStatus::Active);
        let fetched = store.get_user(user.id).await.unwrap();
        assert_eq!(fetched.name, "New Person");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = store();
        let first = store.list_users(&ListParams::new()).await;
        let existing = first.items.first().unwrap().email.to_string();

        let err = store
            .create_user(NewUser {
                name: "Dup".to_string(),
                email: existing.to_uppercase(),
                role: None,
                status: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let store = store();
        let err = store
            .update_user(UserId::from(999_999), UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let store = store();
        let user = store
            .create_user(NewUser {
                name: "Doomed".to_string(),
                email: "doomed@example.com".to_string(),
                role: None,
                status: None,
            })
            .await
            .unwrap();

        store.delete_user(user.id).await.unwrap();
        assert!(store.get_user(user.id).await.is_err());
        assert!(store.delete_user(user.id).await.is_err());
    }

    #[tokio::test]
    async fn test_product_archive_changes_derived_status() {
        let store = store();
        let product = store
            .create_product(NewProduct {
                name: "Gadget".to_string(),
                price: Decimal::from(25),
                stock: 50,
                category: "gadgets".to_string(),
                brand_id: None,
                variants: vec![],
            })
            .await
            .unwrap();
        assert_eq!(product.status(), orchard_core::ProductStatus::Active);

        let patched = store
            .update_product(
                product.id,
                ProductPatch {
                    archived: Some(true),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.status(), orchard_core::ProductStatus::Archived);
    }

    #[tokio::test]
    async fn test_coupon_percentage_validation() {
        let store = store();
        let err = store
            .create_coupon(NewCoupon {
                code: "TOOBIG".to_string(),
                coupon_type: CouponType::Percentage,
                value: Decimal::from(150),
                min_order_value: None,
                active: None,
                expires_at: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_coupon_code_uppercased_and_unique() {
        let store = store();
        let coupon = store
            .create_coupon(NewCoupon {
                code: "spring25".to_string(),
                coupon_type: CouponType::Percentage,
                value: Decimal::from(25),
                min_order_value: None,
                active: None,
                expires_at: None,
            })
            .await
            .unwrap();
        assert_eq!(coupon.code, "SPRING25");

        let err = store
            .create_coupon(NewCoupon {
                code: "SPRING25".to_string(),
                coupon_type: CouponType::Fixed,
                value: Decimal::from(5),
                min_order_value: None,
                active: None,
                expires_at: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_shipping_rate_day_range_validated() {
        let store = store();
        let err = store
            .create_shipping_rate(NewShippingRate {
                region: "EU".to_string(),
                rate: Decimal::from(10),
                min_days: 7,
                max_days: 2,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_users_filter_by_role() {
        let store = store();
        let params = ListParams::new().with_filter("role", vec!["customer".to_string()]);
        let page = store.list_users(&params).await;
        assert!(page.total > 0);
        assert!(page.items.iter().all(|u| u.role == UserRole::Customer));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Basecamp Supply Co."), "basecamp-supply-co");
        assert_eq!(slugify("  A  B  "), "a-b");
    }
}
