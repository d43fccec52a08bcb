// Scripted walk through one booking cycle against the demo data set.
// Usage: travel_demo [config.json]

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use travel_booking_core::{seed, Money, PaymentMethod, TravelConfig, TravelSession};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TravelConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => TravelConfig::default(),
    };

    let mut session = TravelSession::new(
        config,
        Arc::new(seed::demo_catalog()),
        Arc::new(seed::demo_users()),
    );

    let user = session.login(101, "123al")?;
    info!(%user, "Logged in");

    for hotel in session.hotels_in("Hubli")? {
        info!(%hotel, "Available");
    }
    session.book_hotel(1, 2)?;
    let receipt = session.pay(PaymentMethod::Wallet)?;
    info!(reference = %receipt.reference, balance = %receipt.wallet_balance, "Hotel paid");

    for vehicle in session.vehicles_between("Hubli", "Goa")? {
        info!(%vehicle, "Available");
    }
    session.book_vehicle("Hubli", "Goa", 1001, 1)?;
    session.pay(PaymentMethod::External)?;

    println!("{}", session.receipt()?);

    let summary = session.cancel_and_refund()?;
    info!(
        cancelled = %summary.cancelled_total,
        refunded = %summary.refunded,
        balance = %summary.wallet_balance,
        "Booking cancelled"
    );

    session.login(1001, "qqq")?;
    let hotel = session.update_hotel_price(1, Money::from_major(5500))?;
    info!(%hotel, "Repriced");

    println!("{}", serde_json::to_string_pretty(session.ledger().entries())?);
    Ok(())
}
