/*
 * Responsibility
 * - ディレクトリ trait の in-memory 実装
 * - デフォルト配線とテストの土台 (本番バックエンドはこの trait の別実装)
 */
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::repos::admin_repo::{AdminDirectory, AdminRecord};
use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserDirectory, UserRecord};

#[derive(Default)]
pub struct InMemoryAdminDirectory {
    records: RwLock<HashMap<String, AdminRecord>>,
}

impl InMemoryAdminDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: AdminRecord) {
        let mut guard = match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(record.username.clone(), record);
    }
}

#[async_trait]
impl AdminDirectory for InMemoryAdminDirectory {
    async fn find(&self, username: &str) -> Result<Option<AdminRecord>, RepoError> {
        let guard = match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(guard.get(username).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserDirectory {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, id: &str) -> Result<Option<UserRecord>, RepoError> {
        let guard = match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(guard.get(id).cloned())
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, RepoError> {
        let mut guard = match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}
