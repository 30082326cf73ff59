use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use revere_config::Config;
use revere_pipeline::{Pipeline, Subscriber};
use revere_reconciler::{reconcile_components, reconcile_groups};
use revere_state::State;
use revere_statuspage::{HttpStatusPage, StatusPage};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::pubsub::GcpPubSubSubscriber;

const PUBSUB_TOKEN_ENV: &str = "REVERE_PUBSUB_TOKEN";
const HTTP_SHUTDOWN_DEADLINE: Duration = Duration::from_secs(5);

pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn version() {
    println!("{}", build_version());
}

fn load_config(config_path: &Path, verbose: bool) -> Result<Config> {
    revere_config::load_config(config_path, verbose)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))
}

fn build_status_page(config: &Config) -> Result<HttpStatusPage> {
    Ok(HttpStatusPage::new(
        config.statuspage.api_root.clone(),
        config.statuspage.api_key.clone(),
        config.client.redirects as usize,
        config.client.retries,
    )?)
}

/// Runs reconciliation once, prints a summary of what changed, and returns.
pub async fn prepare(config_path: &Path, verbose: bool) -> Result<()> {
    let config = load_config(config_path, verbose)?;
    let status_page = build_status_page(&config)?;

    let components_report = reconcile_components(
        &config.statuspage.page_id,
        &config.statuspage.components,
        &status_page,
    )
    .await?;
    println!("components: {components_report}");

    let groups_report = reconcile_groups(
        &config.statuspage.page_id,
        &config.statuspage.groups,
        &status_page,
    )
    .await?;
    println!("groups: {groups_report}");

    Ok(())
}

/// Name-indexed view of a remote listing; duplicate names keep the
/// lexicographically greatest ID, matching the reconciler's own tie-break.
fn index_by_name(components: Vec<revere_statuspage::RemoteComponent>) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for c in components {
        match map.get(&c.name) {
            Some(existing) if existing.as_str() >= c.id.as_str() => {}
            _ => {
                map.insert(c.name, c.id);
            }
        }
    }
    map
}

async fn wait_for_termination() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Runs the alert pipeline and the auxiliary HTTP endpoint as two
/// cooperating tasks sharing one cancellation signal, until a termination
/// signal arrives.
pub async fn serve(config_path: &Path, verbose: bool) -> Result<()> {
    let config = load_config(config_path, verbose)?;
    let status_page: Arc<dyn StatusPage> = Arc::new(build_status_page(&config)?);

    let remote = status_page
        .list_components(&config.statuspage.page_id)
        .await
        .context("failed to fetch initial component listing")?;
    let name_to_id = index_by_name(remote);

    let state = Arc::new(State::new());
    state.seed(&name_to_id).await;

    let pipeline = Pipeline::new(
        state,
        status_page,
        config.statuspage.page_id.clone(),
        config.service_to_component_mapping.clone(),
    );

    let token = std::env::var(PUBSUB_TOKEN_ENV).with_context(|| {
        format!("{PUBSUB_TOKEN_ENV} must hold a valid OAuth2 bearer token for pub/sub pull access")
    })?;
    let subscriber: Box<dyn Subscriber> = Box::new(GcpPubSubSubscriber::new(
        config.pubsub.project_id.clone(),
        config.pubsub.subscription_id.clone(),
        token,
    ));

    let (cancel_tx, cancel_rx) = watch::channel(false);

    let app = revere_api::build_app(build_version(), config.api.silent);
    let addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "auxiliary HTTP endpoint listening");

    let mut shutdown_rx = cancel_rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
    });

    let pipeline_cancel = cancel_rx.clone();
    let pipeline_task = tokio::spawn(async move {
        pipeline.run(subscriber, pipeline_cancel).await;
    });

    wait_for_termination().await;
    info!("termination signal received, shutting down");
    let _ = cancel_tx.send(true);

    if tokio::time::timeout(HTTP_SHUTDOWN_DEADLINE, server)
        .await
        .is_err()
    {
        warn!("auxiliary HTTP endpoint did not shut down within its deadline");
    }
    let _ = pipeline_task.await;

    Ok(())
}
