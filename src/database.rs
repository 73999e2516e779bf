//! # 数据库模块
//!
//! 数据库连接和迁移管理

use crate::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!(
        "正在连接数据库: {}",
        if config.url.starts_with("postgres") {
            config.url.split('@').next_back().unwrap_or(&config.url)
        } else {
            &config.url
        }
    );

    // 对于SQLite数据库，确保数据库文件的目录和文件存在
    if config.url.starts_with("sqlite:") && !config.url.contains(":memory:") {
        ensure_sqlite_path(&config.url)?;
    }

    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    info!("数据库连接成功");
    Ok(db)
}

/// 确保SQLite数据库文件及其父目录存在
fn ensure_sqlite_path(url: &str) -> Result<(), DbErr> {
    let db_path = url
        .strip_prefix("sqlite://")
        .unwrap_or(url.strip_prefix("sqlite:").unwrap_or(url));
    let db_file_path = Path::new(db_path);

    if let Some(parent_dir) = db_file_path.parent() {
        if !parent_dir.exists() {
            debug!("创建数据库目录: {}", parent_dir.display());
            std::fs::create_dir_all(parent_dir).map_err(|e| {
                DbErr::Custom(format!(
                    "无法创建数据库目录 {}: {}",
                    parent_dir.display(),
                    e
                ))
            })?;
        }
    }

    if !db_file_path.exists() {
        debug!("创建数据库文件: {}", db_file_path.display());
        std::fs::File::create(db_file_path).map_err(|e| {
            DbErr::Custom(format!(
                "无法创建数据库文件 {}: {}",
                db_file_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("开始运行数据库迁移...");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("数据库迁移完成");
            Ok(())
        }
        Err(e) => {
            error!("数据库迁移失败: {}", e);
            Err(e)
        }
    }
}

/// 检查数据库状态
pub async fn check_database_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    let status = ::migration::Migrator::get_pending_migrations(db).await?;

    if status.is_empty() {
        info!("所有迁移都已应用");
    } else {
        warn!("有 {} 个待应用的迁移", status.len());
    }

    Ok(())
}
