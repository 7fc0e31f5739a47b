mod dispatch;
mod http;
mod notify;
mod store;

use std::sync::Arc;

use dispatch::Deps;
use notify::fcm::FcmClient;
use notify::PushGateway;
use store::{DynamoTokenStore, TokenStore};

async fn build_deps() -> Arc<Deps> {
    let table_name = std::env::var("TABLE_NAME").unwrap_or_else(|_| "push-tokens".into());
    let store = DynamoTokenStore::new(&table_name).await;

    let endpoint = std::env::var("FCM_ENDPOINT")
        .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".into());
    let server_key = std::env::var("FCM_SERVER_KEY").unwrap_or_default();
    let gateway = FcmClient::new(&endpoint, &server_key);

    Arc::new(Deps {
        store: Arc::new(store) as Arc<dyn TokenStore>,
        gateway: Arc::new(gateway) as Arc<dyn PushGateway>,
    })
}

#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .init();

    let deps = build_deps().await;

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".into());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!(addr = %addr, "starting push-dispatch server");

    let router = http::router(deps);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, router).await.unwrap();
}

#[cfg(feature = "lambda")]
mod lambda;

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .with_target(false)
        .init();

    let deps = build_deps().await;

    tracing::info!("starting Lambda handler");
    lambda::run(deps).await;
}
