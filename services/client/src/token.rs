//! Persisted bearer token

use common::{KeyValueStore, StorageResult, storage::AUTH_TOKEN_KEY};

/// Bearer token kept in the persisted key-value store
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The current token, if any. An empty stored value counts as none.
    pub async fn get(&self) -> StorageResult<Option<String>> {
        Ok(self
            .store
            .get(AUTH_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    pub async fn set(&self, token: &str) -> StorageResult<()> {
        self.store.set(AUTH_TOKEN_KEY, token).await
    }

    pub async fn clear(&self) -> StorageResult<()> {
        self.store.delete(AUTH_TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MemoryStore;

    #[tokio::test]
    async fn test_set_get_clear() -> StorageResult<()> {
        let tokens = TokenStore::new(MemoryStore::new());
        assert_eq!(tokens.get().await?, None);

        tokens.set("t1").await?;
        assert_eq!(tokens.get().await?, Some("t1".to_string()));

        tokens.clear().await?;
        assert_eq!(tokens.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_token_counts_as_none() -> StorageResult<()> {
        let store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "").await?;

        let tokens = TokenStore::new(store);
        assert_eq!(tokens.get().await?, None);
        Ok(())
    }
}
