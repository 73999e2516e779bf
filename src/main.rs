//! # Twitch Auth Gateway 主程序
//!
//! OAuth 授权码流程网关服务

use std::sync::Arc;
use twitch_auth::management::server::ManagementServer;
use twitch_auth::{GatewayError, Result, config, database, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init_logging(None);

    // 加载并验证配置
    let config = Arc::new(config::load_config()?);

    // 初始化数据库连接并执行迁移
    let db = database::init_database(&config.database)
        .await
        .map_err(|e| GatewayError::database_with_source("数据库连接失败", e))?;
    database::run_migrations(&db)
        .await
        .map_err(|e| GatewayError::database_with_source("数据库迁移失败", e))?;

    // 启动服务
    tracing::info!("🚀 服务启动");
    let server = ManagementServer::new(config, Arc::new(db))?;
    if let Err(e) = server.run().await {
        tracing::error!("服务启动失败: {e:?}");
        std::process::exit(1);
    }

    tracing::info!("服务正常关闭");
    Ok(())
}
