use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wariflex_core::expenses::{ExpenseService, ExpenseServiceTrait};
use wariflex_storage_json::JsonExpenseRepository;

use crate::config::Config;

/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_service(config: &Config) -> anyhow::Result<Arc<dyn ExpenseServiceTrait>> {
    let repository = Arc::new(JsonExpenseRepository::open(&config.data_file)?);
    tracing::debug!("Expense store in use: {}", repository.path().display());
    let service = ExpenseService::new(repository, config.settings.clone());
    Ok(Arc::new(service))
}
