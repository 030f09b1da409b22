//! Taskfeed API server entry point.
//!
//! Loads configuration, fails fast when it is unusable, wires the service
//! graph over `PostgreSQL`-backed adapters, and serves the HTTP API.

use std::process::ExitCode;
use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use taskfeed::api::{self, AppState};
use taskfeed::candidate::adapters::postgres::{
    PostgresCandidateRepository, PostgresSourceMessageRepository,
};
use taskfeed::candidate::services::CandidateLifecycleService;
use taskfeed::config::Config;
use taskfeed::feed::services::FeedService;
use taskfeed::identity::adapters::http::HttpIdentityVerifier;
use taskfeed::task::adapters::postgres::PostgresTaskRepository;
use taskfeed::task::services::TaskService;
use taskfeed::user::adapters::postgres::PostgresProfileRepository;
use taskfeed::user::services::ProfileService;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_owned()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(error = %err, "refusing to start with invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_level.as_str());

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server terminated");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder().build(manager)?;

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let candidate_repository = Arc::new(PostgresCandidateRepository::new(pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let source_repository = Arc::new(PostgresSourceMessageRepository::new(pool.clone()));
    let profile_repository = Arc::new(PostgresProfileRepository::new(pool));

    let state = AppState {
        candidates: CandidateLifecycleService::new(
            candidate_repository.clone(),
            task_repository.clone(),
            source_repository,
            clock.clone(),
        ),
        tasks: TaskService::new(task_repository.clone(), clock.clone()),
        feed: FeedService::new(candidate_repository, task_repository),
        profiles: ProfileService::new(profile_repository, clock.clone()),
        identity: Arc::new(HttpIdentityVerifier::new(
            config.identity_url.clone(),
            config.identity_anon_key.clone(),
        )),
        clock,
    };

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "taskfeed api listening");
    axum::serve(listener, api::router(state)).await?;
    Ok(())
}
