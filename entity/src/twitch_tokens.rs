//! # Twitch 令牌实体定义
//!
//! 每个身份当前有效凭证的 Sea-ORM 实体模型。`identity_id` 上的唯一约束
//! 保证每个身份只有一行令牌，重新授权时整行字段被替换

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Twitch 令牌实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "twitch_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub identity_id: i32,
    pub access_token: String,
    pub refresh_token: String,
    /// 授权作用域列表，以 JSON 数组文本存储
    pub scopes: String,
    pub expires_at: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::twitch_identities::Entity",
        from = "Column::IdentityId",
        to = "super::twitch_identities::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TwitchIdentity,
}

impl Related<super::twitch_identities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TwitchIdentity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 令牌辅助方法
impl Model {
    /// 检查令牌是否已过期
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().naive_utc() > self.expires_at
    }

    /// 解析存储的作用域列表
    pub fn parse_scopes(&self) -> Vec<String> {
        serde_json::from_str(&self.scopes).unwrap_or_default()
    }
}
