//! # Twitch 身份实体定义
//!
//! Twitch 账号身份表的 Sea-ORM 实体模型。`twitch_user_id` 是稳定的自然键，
//! `login` 可能随时间变化，重新授权时会被覆盖

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Twitch 身份实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "twitch_identities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub twitch_user_id: String,
    pub login: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::twitch_tokens::Entity")]
    TwitchTokens,
}

impl Related<super::twitch_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TwitchTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
