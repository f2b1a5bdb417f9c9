use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use lists_service::config::Config;
use lists_service::config::StoreBackend;
use lists_service::domain::auth::service::AuthService;
use lists_service::domain::list::service::ListsService;
use lists_service::domain::repository::DocumentStore;
use lists_service::domain::user::service::UsersService;
use lists_service::inbound::http::router::create_router;
use lists_service::store::MemoryDocumentStore;
use lists_service::store::PostgresDocumentStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lists_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "lists-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        store_backend = ?config.store.backend,
        access_token_minutes = config.jwt.access_token_minutes,
        refresh_token_hours = config.jwt.refresh_token_hours,
        password_cost = config.password.cost,
        "Configuration loaded"
    );

    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Postgres => {
            let store =
                PostgresDocumentStore::connect(&config.store.url, config.store.max_connections)
                    .await?;
            tracing::info!(
                max_connections = config.store.max_connections,
                database = "postgresql",
                "Document store connected"
            );
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store, data is lost on exit");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let authenticator = Authenticator::new(config.jwt.secret.as_bytes())
        .with_lifetimes(config.token_lifetimes());

    let users = UsersService::new(Arc::clone(&store), PasswordHasher::new(config.password.cost));
    let lists = ListsService::new(Arc::clone(&store));
    let auth = AuthService::new(Arc::new(authenticator), users.clone());

    if let Some(admin) = &config.admin {
        match users.ensure_admin(&admin.user_name, &admin.password).await? {
            Some(id) => {
                tracing::info!(user_id = %id, user_name = %admin.user_name, "Admin user created")
            }
            None => tracing::debug!(user_name = %admin.user_name, "Admin user already present"),
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(users, lists, auth);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
