use anyhow::{Context, Result};
use persona_auth::{
    application::{
        ports::{
            security::{PasswordHasher, TokenProvider},
            session_store::SessionStore,
            time::Clock,
        },
        services::ApplicationServices,
    },
    config::AppConfig,
    domain::user::UserRepository,
    infrastructure::{
        database,
        repositories::PostgresUserRepository,
        security::{
            password::Argon2PasswordHasher, redis_session_store::RedisSessionStore,
            session_store::InMemorySessionStore, token::JwtTokenProvider,
        },
        time::SystemClock,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;

    let pool = database::init_pool(config.database_url())
        .await
        .context("connecting to postgres")?;
    database::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_provider: Arc<dyn TokenProvider> = Arc::new(JwtTokenProvider::new(
        config.jwt_secret(),
        config.access_token_ttl(),
        config.refresh_token_ttl(),
    ));
    let session_store: Arc<dyn SessionStore> = match config.redis_url() {
        Some(url) => {
            tracing::info!("using redis session store");
            Arc::new(RedisSessionStore::from_url(url).context("creating redis pool")?)
        }
        None => {
            tracing::warn!("REDIS_URL not set; sessions are kept in process memory");
            Arc::new(InMemorySessionStore::new())
        }
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        password_hasher,
        token_provider,
        session_store,
        clock,
    ));

    let state = HttpState { services };
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("binding {}", config.listen_addr()))?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
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
    tracing::info!("shutdown signal received");
}
