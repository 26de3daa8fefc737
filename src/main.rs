use anyhow::Result;
use catalog_dashboard::{telemetry, DashboardConfig, DashboardSession};
use compute::views;
use model::DatasetKind;
use tracing::{info, warn};

/// Loads the dashboard once against the configured backend and logs what
/// came back.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init_tracing()?;

    info!("Catalog dashboard starting up");

    let config = DashboardConfig::load()?;
    let session = DashboardSession::connect(&config)?;

    let failed = session.start().await.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!("{} startup fetches failed", failed);
    }

    let outcome = session.apply_filters().await;
    for error in outcome.errors() {
        warn!("Filter fetch failed: {}", error);
    }

    let state = session.snapshot();
    for dataset in DatasetKind::ALL {
        info!(status = ?state.status(dataset), "{}", dataset);
    }

    let page = views::table_page(&state);
    info!(
        years = state.year_options().len(),
        rows = state.content().len(),
        "Catalog loaded, showing {}",
        page.range_label()
    );
    for (index, row) in page.numbered() {
        info!("{:>3}. {} ({})", index, row.title, row.release_year);
    }

    Ok(())
}
