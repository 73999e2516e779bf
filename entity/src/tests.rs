//! # 实体辅助方法测试

use crate::twitch_tokens;

fn sample_token(scopes: &str, expires_at: chrono::NaiveDateTime) -> twitch_tokens::Model {
    twitch_tokens::Model {
        id: 1,
        identity_id: 1,
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scopes: scopes.to_string(),
        expires_at,
        created_at: chrono::Utc::now().naive_utc(),
        updated_at: chrono::Utc::now().naive_utc(),
    }
}

#[test]
fn test_parse_scopes_roundtrip() {
    let future = chrono::Utc::now().naive_utc() + chrono::Duration::hours(1);
    let token = sample_token(r#"["chat:read","chat:edit"]"#, future);

    assert_eq!(
        token.parse_scopes(),
        vec!["chat:read".to_string(), "chat:edit".to_string()]
    );
}

#[test]
fn test_parse_scopes_tolerates_garbage() {
    let future = chrono::Utc::now().naive_utc() + chrono::Duration::hours(1);
    let token = sample_token("not json", future);

    assert!(token.parse_scopes().is_empty());
}

#[test]
fn test_token_expiry() {
    let past = chrono::Utc::now().naive_utc() - chrono::Duration::hours(1);
    let future = chrono::Utc::now().naive_utc() + chrono::Duration::hours(1);

    assert!(sample_token("[]", past).is_expired());
    assert!(!sample_token("[]", future).is_expired());
}
