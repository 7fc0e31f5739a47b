use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;

/// One stored registration record for a user. The token field is optional:
/// a record can exist without a usable token (e.g. a registration row that
/// was written before the device handed out its FCM token).
#[derive(Debug, Clone, Default)]
pub struct TokenRecord {
    pub fcm_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token store get for {0}: {1}")]
    Get(String, String),
}

/// Trait abstracting the token store for testing. The store is owned and
/// written by an external registration process; this service only reads it.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get_token_record(&self, user_id: &str) -> Result<Option<TokenRecord>, StoreError>;
}

/// Real DynamoDB-backed token store. Single-table layout with
/// `PK = "token:{userId}"`, `SK = "fcm"`, token under the `fcmToken` attribute.
pub struct DynamoTokenStore {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoTokenStore {
    pub async fn new(table_name: &str) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: DynamoDbClient::new(&config),
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl TokenStore for DynamoTokenStore {
    async fn get_token_record(&self, user_id: &str) -> Result<Option<TokenRecord>, StoreError> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(format!("token:{}", user_id)))
            .key("SK", AttributeValue::S("fcm".into()))
            .send()
            .await
            .map_err(|e| StoreError::Get(user_id.into(), e.to_string()))?;

        Ok(out.item.map(|item| TokenRecord {
            fcm_token: item.get("fcmToken").and_then(|av| match av {
                AttributeValue::S(s) => Some(s.clone()),
                _ => None,
            }),
        }))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct MockTokenStore {
        pub records: Mutex<HashMap<String, TokenRecord>>,
        pub unreachable: Mutex<bool>,
    }

    impl MockTokenStore {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                unreachable: Mutex::new(false),
            }
        }

        pub fn insert_token(&self, user_id: &str, token: &str) {
            self.records.lock().unwrap().insert(
                user_id.into(),
                TokenRecord {
                    fcm_token: Some(token.into()),
                },
            );
        }

        pub fn insert_record_without_token(&self, user_id: &str) {
            self.records
                .lock()
                .unwrap()
                .insert(user_id.into(), TokenRecord::default());
        }

        pub fn set_unreachable(&self) {
            *self.unreachable.lock().unwrap() = true;
        }
    }

    #[async_trait]
    impl TokenStore for MockTokenStore {
        async fn get_token_record(
            &self,
            user_id: &str,
        ) -> Result<Option<TokenRecord>, StoreError> {
            if *self.unreachable.lock().unwrap() {
                return Err(StoreError::Get(user_id.into(), "connection refused".into()));
            }
            Ok(self.records.lock().unwrap().get(user_id).cloned())
        }
    }
}
