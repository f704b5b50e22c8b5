//! Terminal dashboard over the admin API
//!
//! ```text
//! ADMIN_API_BASE_URL=https://shop.example.com/api \
//! ADMIN_TOKEN_PATH=~/.config/shop-admin/session.json \
//! cargo run -p admin-client --example dashboard -- <username> <password>
//! ```
//!
//! Credentials are only needed when no session token is stored yet.

use admin_client::logger::init_logger;
use admin_client::{AppState, ClientConfig, Filters};
use shared::models::Channel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let json_logs = std::env::var("ADMIN_LOG_JSON").is_ok_and(|v| v == "1");
    init_logger("info", json_logs)?;

    let config = ClientConfig::from_env()?;
    let state = AppState::new(config)?;

    let user = match state.bootstrap().await {
        Some(user) => Some(user),
        // stored token, verification failed: keep going with it
        None if state.session.is_authenticated() => None,
        None => {
            let mut args = std::env::args().skip(1);
            let (Some(username), Some(password)) = (args.next(), args.next()) else {
                anyhow::bail!("no stored session; usage: dashboard <username> <password>");
            };
            Some(state.login(&username, &password).await?)
        }
    };
    match user {
        Some(user) => println!("Signed in as {} ({})", user.name, user.role),
        None => println!("Using stored session (user not verified)"),
    }

    let filters = Filters::new();
    let (products, categories, gst, online, offline) = tokio::join!(
        state.products.fetch(&filters),
        state.categories.fetch(&filters),
        state.gst.fetch(&filters),
        state.sales.fetch_online(&filters),
        state.sales.fetch_offline(&filters),
    );
    for (what, result) in [
        ("products", products.map(|v| v.len())),
        ("categories", categories.map(|v| v.len())),
        ("gst rates", gst.map(|v| v.len())),
        ("online orders", online.map(|v| v.len())),
        ("pos sales", offline.map(|v| v.len())),
    ] {
        if let Err(e) = result {
            eprintln!("{what}: {}", e.user_message());
        }
    }

    let settings = state.settings.current();
    if !settings.site_name.is_empty() {
        println!("{}", settings.site_name);
    }
    match state.products.pagination() {
        Some(page) => println!("Products:    {} (page {}/{})", page.total, page.current_page, page.last_page),
        None => println!("Products:    {}", state.products.len()),
    }
    println!("Categories:  {}", state.categories.len());
    let rates: Vec<String> = state
        .gst
        .sorted_by_rate()
        .iter()
        .map(|r| format!("{}%", r.percentage))
        .collect();
    println!("GST rates:   {}", rates.join(", "));

    for (channel, totals) in state.sales.totals_by_channel() {
        let label = match channel {
            Channel::Online => "Online",
            Channel::Offline => "POS",
        };
        println!("{label:<12} {} orders, ₹{:.2}", totals.orders, totals.amount);
    }
    Ok(())
}
