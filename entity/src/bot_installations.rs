//! # 机器人安装实体定义
//!
//! 主播身份与主/备用机器人绑定关系的 Sea-ORM 实体模型。
//! `broadcaster_identity_id` 上的唯一约束保证每个主播只有一条安装记录

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 机器人安装实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bot_installations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub broadcaster_identity_id: i32,
    pub main_bot_identity_id: i32,
    pub fallback_bot_identity_id: i32,
    pub is_enabled: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::twitch_identities::Entity",
        from = "Column::BroadcasterIdentityId",
        to = "super::twitch_identities::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    BroadcasterIdentity,
    #[sea_orm(
        belongs_to = "super::twitch_identities::Entity",
        from = "Column::MainBotIdentityId",
        to = "super::twitch_identities::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    MainBotIdentity,
    #[sea_orm(
        belongs_to = "super::twitch_identities::Entity",
        from = "Column::FallbackBotIdentityId",
        to = "super::twitch_identities::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    FallbackBotIdentity,
}

impl Related<super::twitch_identities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BroadcasterIdentity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
