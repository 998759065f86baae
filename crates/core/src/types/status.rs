//! Status enums for platform entities.
//!
//! All of these are closed enums on the wire. Transitions between payment
//! statuses are reported by the payment backend and passed through; nothing
//! here enforces an ordering locally.

use serde::{Deserialize, Serialize};

/// Stock level at or below which an in-stock product is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Platform user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Customer,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Platform user account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

/// Product availability status.
///
/// Derived from stock levels rather than stored: zero stock is
/// `OutOfStock`, stock at or below [`LOW_STOCK_THRESHOLD`] is `LowStock`,
/// anything above is `Active`. `Archived` is an explicit override that
/// wins over derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    LowStock,
    OutOfStock,
    Archived,
}

impl ProductStatus {
    /// Derive the status from a stock count and the archived flag.
    #[must_use]
    pub const fn derive(stock: u32, archived: bool) -> Self {
        if archived {
            Self::Archived
        } else if stock == 0 {
            Self::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::Active
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::LowStock => write!(f, "low_stock"),
            Self::OutOfStock => write!(f, "out_of_stock"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Payment status as reported by the payment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    PartiallyRefunded,
    Refunded,
    Failed,
}

/// Refund status as reported by the payment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// Discount rule type for coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Percentage off the cart subtotal.
    Percentage,
    /// Fixed amount off the cart subtotal.
    Fixed,
    /// Free shipping.
    Shipping,
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including user management.
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_derivation() {
        assert_eq!(ProductStatus::derive(0, false), ProductStatus::OutOfStock);
        assert_eq!(ProductStatus::derive(1, false), ProductStatus::LowStock);
        assert_eq!(
            ProductStatus::derive(LOW_STOCK_THRESHOLD, false),
            ProductStatus::LowStock
        );
        assert_eq!(
            ProductStatus::derive(LOW_STOCK_THRESHOLD + 1, false),
            ProductStatus::Active
        );
    }

    #[test]
    fn test_archived_wins_over_stock() {
        assert_eq!(ProductStatus::derive(0, true), ProductStatus::Archived);
        assert_eq!(ProductStatus::derive(500, true), ProductStatus::Archived);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in ["admin", "manager", "customer"] {
            let parsed: UserRole = role.parse().unwrap();
            assert_eq!(parsed.to_string(), role);
        }
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::PartiallyRefunded).unwrap();
        assert_eq!(json, "\"partially_refunded\"");
    }
}
