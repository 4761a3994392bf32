//! settler - marketplace invoice compensation reconciliation
//!
//! Walks every configured store: lists the invoices for the requested
//! period, downloads and archives each specification sheet, and applies the
//! extracted compensation/correction rows to the local orders table.

use std::sync::Arc;

use chrono::{Datelike, Local};
use clap::Parser;
use settler_core::reconcile::ReconcileService;
use settler_core::InvoicePeriod;
use settler_infra::{
    config, DbManager, FileSheetArchive, RetailerClient, RetailerGateway, SpecSheetExtractor,
    SqliteOrdersRepository,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "settler")]
#[command(about = "Reconcile marketplace invoice compensations against the orders table")]
#[command(version)]
struct Cli {
    /// Invoice month (1-12). Without it the previous semi-monthly window is
    /// used.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Invoice year. Only meaningful together with --month.
    #[arg(short, long, requires = "month")]
    year: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        info!(path = %path.display(), "environment loaded");
    }

    let config = config::load()?;
    let period = resolve_period(cli.month, cli.year)?;
    info!(
        start = %period.start_param(),
        end = %period.end_param(),
        stores = config.stores.len(),
        "reconciliation run starting"
    );

    let db = Arc::new(DbManager::new(&config.database.path)?);
    db.health_check()?;

    let parser = Arc::new(SpecSheetExtractor::new());
    let archive = Arc::new(FileSheetArchive::new(&config.archive.dir));

    for store in &config.stores {
        // A store with rejected credentials is skipped, not a run failure.
        let client = match RetailerClient::connect(
            &config.api.authorize_url,
            &store.client_id,
            &store.client_secret,
        )
        .await
        {
            Ok(client) => client,
            Err(err) => {
                warn!(store = %store.name, error = %err, "store skipped: cannot authenticate");
                continue;
            }
        };

        let gateway = Arc::new(RetailerGateway::new(client, &config.api.base_url));
        let orders = Arc::new(SqliteOrdersRepository::new(Arc::clone(&db)));
        let service =
            ReconcileService::new(gateway, parser.clone(), orders, archive.clone());

        let summary = service.run_store(store, &period).await;
        info!(
            store = %summary.store,
            invoices = summary.invoices_seen,
            sheets = summary.sheets_processed,
            rows_applied = summary.rows_applied,
            rows_matched = summary.rows_matched,
            failures = summary.failures(),
            "store summary"
        );
        if let Some(reason) = &summary.list_failure {
            warn!(store = %summary.store, reason, "invoice list could not be fetched");
        }
    }

    Ok(())
}

fn resolve_period(month: Option<u32>, year: Option<i32>) -> anyhow::Result<InvoicePeriod> {
    let today = Local::now().date_naive();
    let period = match (month, year) {
        (Some(month), Some(year)) => InvoicePeriod::calendar_month(year, month)?,
        (Some(month), None) => InvoicePeriod::calendar_month(today.year(), month)?,
        (None, _) => InvoicePeriod::previous_semi_monthly(today),
    };
    Ok(period)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn year_without_month_is_a_usage_error() {
        let err = Cli::try_parse_from(["settler", "-y", "2023"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["settler", "-m", "13"]).is_err());
        assert!(Cli::try_parse_from(["settler", "-m", "0"]).is_err());
    }

    #[test]
    fn explicit_month_and_year_pin_the_period() {
        let period = resolve_period(Some(12), Some(2023)).unwrap();
        assert_eq!(period.start_param(), "2023-12-01");
        assert_eq!(period.end_param(), "2023-12-31");
    }

    #[test]
    fn month_without_year_uses_the_current_year() {
        let period = resolve_period(Some(1), None).unwrap();
        assert_eq!(period.start.month(), 1);
        assert_eq!(period.start.year(), Local::now().year());
    }
}
