//! Smoke check of the planning API: fetches the first page of every resource
//! the dashboard lists and reports what came back.

use std::process::ExitCode;

use dotenvy::dotenv;

use pushkind_planning::api::client::ApiClient;
use pushkind_planning::api::errors::ApiResult;
use pushkind_planning::api::session::SessionContext;
use pushkind_planning::gateway::http::HttpGateway;
use pushkind_planning::gateway::{
    Evaluations, Intervenants, ListGateway, Logs, Modules, Notifications, Periodes, Programmes,
    Resource, Salles, Users,
};
use pushkind_planning::list::filter::FilterState;
use pushkind_planning::list::query;
use pushkind_planning::models::config::DashboardConfig;

async fn check<R: Resource>(gateway: &HttpGateway, limit: usize) -> ApiResult<()>
where
    HttpGateway: ListGateway<R>,
{
    let query = query::compose(&FilterState::new(), 1, limit);
    let page = ListGateway::<R>::list(gateway, &query).await?;
    log::info!(
        "{}: {} item(s) on page 1, {} in total over {} page(s)",
        R::PATH,
        page.items.len(),
        page.pagination.total,
        page.pagination.pages
    );
    if !page.is_consistent() {
        log::warn!(
            "{}: envelope announces {} item(s) on page 1",
            R::PATH,
            page.pagination.expected_len()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let session = SessionContext::new();
    match config.api_token.as_deref() {
        Some(token) => session.set_token(token),
        None => log::warn!("APP_API_TOKEN is not set, calling the API anonymously"),
    }

    let client = match ApiClient::from_config(&config, session) {
        Ok(client) => client,
        Err(err) => {
            log::error!("Failed to build API client: {err}");
            return ExitCode::FAILURE;
        }
    };
    let gateway = HttpGateway::new(client);
    let limit = config.page_size;

    log::info!("Checking planning API at {}", config.api_base_url);

    let results = [
        (Programmes::PATH, check::<Programmes>(&gateway, limit).await),
        (Modules::PATH, check::<Modules>(&gateway, limit).await),
        (Intervenants::PATH, check::<Intervenants>(&gateway, limit).await),
        (Salles::PATH, check::<Salles>(&gateway, limit).await),
        (Periodes::PATH, check::<Periodes>(&gateway, limit).await),
        (Users::PATH, check::<Users>(&gateway, limit).await),
        (Notifications::PATH, check::<Notifications>(&gateway, limit).await),
        (Logs::PATH, check::<Logs>(&gateway, limit).await),
        (Evaluations::PATH, check::<Evaluations>(&gateway, limit).await),
    ];

    let mut failed = 0;
    for (path, result) in results {
        if let Err(err) = result {
            log::error!("{path}: {err}");
            failed += 1;
        }
    }

    if failed > 0 {
        log::error!("{failed} resource(s) failed");
        return ExitCode::FAILURE;
    }
    log::info!("All resources reachable");
    ExitCode::SUCCESS
}
