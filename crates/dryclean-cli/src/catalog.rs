//! Category and order listing.

use anyhow::Context;
use dryclean_client::{ApiClient, SessionStore};

pub(crate) async fn run_categories(client: &ApiClient) -> anyhow::Result<()> {
    let categories = client.list_categories().await?;
    if categories.is_empty() {
        println!("no categories");
    }
    for category in &categories {
        match category.price {
            Some(price) => println!("{:<24} ${price:.2}", category.name),
            None => println!("{}", category.name),
        }
    }
    Ok(())
}

pub(crate) async fn run_orders(client: &ApiClient, session: &SessionStore) -> anyhow::Result<()> {
    let creds = session
        .credentials()
        .context("not logged in; run `dryclean-cli login` first")?;
    let orders = client.list_orders(&creds.user_id).await?;
    if orders.is_empty() {
        println!("no orders yet");
    }
    for order in &orders {
        let total = order
            .total
            .map_or_else(|| "-".to_string(), |t| format!("${t:.2}"));
        println!(
            "{}  {:<12} {total}  {}",
            order.id,
            order.status,
            order.pickup_date.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
