mod error;
mod handlers;

use std::{error::Error, fs::File, net::SocketAddr, sync::Mutex, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use crm::{infrastructure::InMemoryCustomerRepository, CrmConfig, Logger};
use tracing::{error, info, warn, Level};

use crate::handlers::AppState;

#[tokio::main]
async fn main() {
    match CrmConfig::load() {
        Ok(config) => {
            if let Err(error) = init_tracing(&config.logger) {
                tracing_subscriber::fmt::init();
                warn!("ログファイルを開けません: {}", error);
            }
            if let Err(error) = serve(config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

fn init_tracing(logger: &Logger) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(Level::from(logger.level));
    match &logger.file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None => builder.init(),
    }
    Ok(())
}

async fn serve(config: CrmConfig) -> Result<(), Box<dyn Error>> {
    let addr = config.server.address.parse::<SocketAddr>()?;
    let repository = match config.store.seed {
        true => InMemoryCustomerRepository::seeded(config.store.id_policy),
        false => InMemoryCustomerRepository::new(config.store.id_policy),
    };
    let app = handlers::router(AppState::new(repository, config.assets.clone()));

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(
        handle.clone(),
        Duration::from_secs(config.server.shutdown_grace_secs),
    ));

    match &config.server.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("HTTPSで待ち受けを開始: {}", addr);
            axum_server::bind_rustls(addr, rustls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("HTTPで待ち受けを開始: {}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }
    info!("サーバーを停止しました");
    Ok(())
}

async fn shutdown_signal(handle: Handle, grace: Duration) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("シグナルを受信できません: {}", error);
        return;
    }
    info!("停止シグナルを受信");
    handle.graceful_shutdown(Some(grace));
}
