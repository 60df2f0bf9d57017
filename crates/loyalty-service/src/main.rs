//! 会员卡后台服务入口
//!
//! 加载配置、初始化可观测性、载入种子数据后启动 REST API。

use std::path::PathBuf;

use axum::http::HeaderValue;
use clap::Parser;
use loyalty_memdb::{Database, Fixtures, MutationMode};
use loyalty_service::{AppState, routes};
use loyalty_shared::{config::AppConfig, observability};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// 会员卡后台服务
#[derive(Parser, Debug)]
#[command(name = "loyalty-server")]
#[command(version, about = "会员卡后台服务（内存查询引擎）")]
struct Cli {
    /// 服务端口，覆盖配置文件
    #[arg(short, long)]
    port: Option<u16>,

    /// 变更模式 (persistent, simulated)，覆盖配置文件
    #[arg(short, long)]
    mutation_mode: Option<String>,

    /// 种子数据 JSON 文件，默认使用内置演示数据
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// 启动时不载入种子数据
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load("loyalty-service").unwrap_or_default();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(mode) = cli.mutation_mode {
        config.storage.mutation_mode = mode;
    }
    if let Some(path) = cli.fixtures {
        config.storage.fixtures_path = Some(path.display().to_string());
    }
    if cli.no_seed {
        config.storage.seed_on_start = false;
    }

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!("Starting loyalty-service on {}", config.server_addr());

    let mode: MutationMode = config.storage.mutation_mode.parse()?;
    let db = Database::new(mode);
    info!(mutation_mode = mode.as_str(), "In-memory database initialized");

    if config.storage.database_url.is_some() {
        warn!("storage.database_url 已配置，但当前只提供内存查询引擎，该配置被忽略");
    }

    // 连通性探测只记录结果，不阻止启动
    match db.raw("SELECT 1") {
        Ok(rows) => info!(rows = rows.len(), "Storage probe succeeded"),
        Err(e) => warn!(error = %e, "Storage probe failed"),
    }

    if config.storage.seed_on_start {
        let fixtures = match &config.storage.fixtures_path {
            Some(path) => Fixtures::from_path(path)?,
            None => Fixtures::builtin()?,
        };
        let loaded = db.seed_fixtures(fixtures);
        info!(rows = loaded, "Fixtures loaded");
    }

    // CORS 配置：通过 LOYALTY_CORS_ORIGINS 环境变量控制允许的来源
    let allowed_origins = std::env::var("LOYALTY_CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    let cors = if allowed_origins == "*" {
        if config.is_production() {
            warn!("LOYALTY_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = routes::build_router(AppState::new(db)).layer(cors);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// 收到 SIGTERM 或 Ctrl+C 后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
