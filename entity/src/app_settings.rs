//! # 应用全局设置实体定义
//!
//! 进程级单行配置表。主键是布尔哨兵值，恒为 `true`，从而强制整张表
//! 最多只有一行

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 应用全局设置实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: bool,
    pub default_bot_identity_id: i32,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::twitch_identities::Entity",
        from = "Column::DefaultBotIdentityId",
        to = "super::twitch_identities::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    DefaultBotIdentity,
}

impl Related<super::twitch_identities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefaultBotIdentity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
