//! Print a store's catalog.

use whatsstore_core::CurrencyCode;
use whatsstore_storefront::catalog::ResolvedStore;

/// Resolve `slug` and print its grouped catalog.
///
/// # Errors
///
/// Returns an error if the store does not resolve or the database is
/// unreachable.
pub async fn show(slug: &str) -> Result<(), Box<dyn std::error::Error>> {
    let currency = super::currency()?;
    let resolved = super::resolver().await?.resolve(slug).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", render(&resolved, currency));
    }
    Ok(())
}

fn render(resolved: &ResolvedStore, currency: CurrencyCode) -> String {
    let meta = resolved.metadata();
    let mut out = format!(
        "{}\n{}\nwa.me/{}\n",
        meta.title, meta.description, resolved.vendor.whatsapp_number
    );

    if resolved.catalog.is_empty() {
        out.push_str("\n(no products yet)");
        return out;
    }

    for group in resolved.catalog.groups() {
        out.push_str(&format!("\n{}\n", group.category));
        for product in &group.products {
            out.push_str(&format!(
                "  {}  {}  {}\n",
                product.id,
                product.name,
                currency.display(product.price.amount())
            ));
        }
    }
    out.truncate(out.trim_end().len());
    out
}
