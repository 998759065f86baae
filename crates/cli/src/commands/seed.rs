//! Fixture export command.
//!
//! Dumps the deterministic seed collections to JSON files so frontend
//! work and manual testing can run against the exact data the admin
//! binary serves.

use std::path::Path;

use serde::Serialize;

use orchard_admin::store::MockStore;
use orchard_core::ListParams;

use super::CliError;

/// Write every seeded collection as a JSON file under `out_dir`.
///
/// Files are pretty-printed and sorted the way the seed defines them, so
/// consecutive runs produce byte-identical output.
///
/// # Errors
///
/// Returns an error if seeding fails or a file cannot be written.
pub async fn write_fixtures(out_dir: &Path) -> Result<(), CliError> {
    let store = MockStore::seeded()?;
    // Large enough to capture every seeded collection in one page.
    let params = ListParams::new().with_per_page(100);

    std::fs::create_dir_all(out_dir)?;

    write_collection(out_dir, "users.json", &store.list_users(&params).await.items)?;
    write_collection(
        out_dir,
        "products.json",
        &store.list_products(&params).await.items,
    )?;
    write_collection(out_dir, "brands.json", &store.list_brands(&params).await.items)?;
    write_collection(
        out_dir,
        "coupons.json",
        &store.list_coupons(&params).await.items,
    )?;
    write_collection(
        out_dir,
        "shipping_rates.json",
        &store.list_shipping_rates(&params).await.items,
    )?;
    write_collection(
        out_dir,
        "shipping_methods.json",
        &store.list_shipping_methods(&params).await.items,
    )?;

    tracing::info!("Fixtures written to {}", out_dir.display());
    Ok(())
}

fn write_collection<T: Serialize>(dir: &Path, name: &str, items: &[T]) -> Result<(), CliError> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(&path, json)?;
    tracing::info!("  {} ({} records)", name, items.len());
    Ok(())
}
