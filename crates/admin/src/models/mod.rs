//! Admin domain models.
//!
//! Each collection entity implements [`orchard_core::Record`] so the list
//! endpoints can hand it to the shared filter/sort/paginate engine.

mod admin;
mod brand;
mod coupon;
mod product;
mod shipping;
mod user;

pub use admin::{AdminAccount, CurrentAdmin};
pub use brand::Brand;
pub use coupon::Coupon;
pub use product::{Product, ProductVariant};
pub use shipping::{ShippingMethod, ShippingRate};
pub use user::User;
