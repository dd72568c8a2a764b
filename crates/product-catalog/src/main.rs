//! # Product Catalog Demo
//!
//! Walks one user through the whole flow:
//!
//! 1. Load [`CatalogConfig`] from the path given as the first argument, or the default
//!    search paths.
//! 2. Sign up and sign in through the [`SessionGate`](product_catalog::session::SessionGate),
//!    unless a saved session already names the demo user.
//! 3. Create a pen, reprice it, remove it (twice).
//! 4. Sign out and shut the [`CatalogSystem`] down.

use product_catalog::catalog::Drafts;
use product_catalog::config::CatalogConfig;
use product_catalog::lifecycle::CatalogSystem;
use product_catalog::session::AuthError;
use resource_actor::tracing::setup_tracing_with_default;
use tracing::{error, info, Instrument};

const DEMO_EMAIL: &str = "alice@example.com";
const DEMO_PASSWORD: &str = "correct horse";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = CatalogConfig::load_from_file(path)?;
            config.validate()?;
            config
        }
        None => CatalogConfig::load()?,
    };
    setup_tracing_with_default(&config.logging.level);

    info!(backend = ?config.store.backend, "Starting product catalog");
    let mut system = CatalogSystem::new(&config).await?;

    let span = tracing::info_span!("session");
    async {
        if let Some(email) = system.session.current_user().await {
            info!(%email, "Session restored");
            if email == DEMO_EMAIL {
                return Ok(());
            }
        }
        match system
            .session
            .sign_up(DEMO_EMAIL, DEMO_PASSWORD, DEMO_PASSWORD)
            .await
        {
            Ok(id) => info!(%id, "Account created"),
            Err(AuthError::AlreadyExists(_)) => info!("Account already exists"),
            Err(e) => return Err(e),
        }
        system.session.sign_in(DEMO_EMAIL, DEMO_PASSWORD).await
    }
    .instrument(span)
    .await?;

    let user = system.session.current_user().await;
    system.catalog.set_attribution(user);

    let span = tracing::info_span!("catalog");
    let result = run_catalog(&mut system).instrument(span).await;
    if let Err(e) = &result {
        error!(error = %e, "Catalog demo failed");
    }

    let signed_out = system.session.sign_out().await;
    system.shutdown().await?;
    result?;
    signed_out?;

    info!("Application completed successfully");
    Ok(())
}

async fn run_catalog(system: &mut CatalogSystem) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = &mut system.catalog;
    let user = catalog.attribution().unwrap_or("guest").to_string();

    let existing = catalog.load_catalog().await?.len();
    info!(%user, size = existing, "Catalog loaded");

    catalog.begin_create();
    catalog
        .submit(&Drafts::new("Pen", "1.50", "Blue ink", "Stationery"))
        .await?;
    let Some(pen) = catalog.products().last().cloned() else {
        return Err("created product missing from catalog".into());
    };
    info!(id = %pen.id, price = %pen.display_price(), "Pen added");

    catalog.begin_edit(pen.id)?;
    catalog.drafts_mut().price = "2.00".to_string();
    let drafts = catalog.drafts().clone();
    catalog.submit(&drafts).await?;
    for product in catalog.products() {
        info!(id = %product.id, "{product}");
    }

    catalog.remove(pen.id).await?;
    catalog.remove(pen.id).await?;
    info!(size = catalog.products().len(), "Pen removed");
    Ok(())
}
