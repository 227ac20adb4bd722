use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use timetable_core::{GroupId, GroupStore, GroupStoreError};

#[derive(Default, Clone)]
pub struct HashSetGroupStore {
    groups: Arc<RwLock<HashSet<GroupId>>>,
}

impl HashSetGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_group(&self, id: GroupId) {
        self.groups.write().await.insert(id);
    }
}

#[async_trait::async_trait]
impl GroupStore for HashSetGroupStore {
    async fn group_exists(&self, id: GroupId) -> Result<bool, GroupStoreError> {
        Ok(self.groups.read().await.contains(&id))
    }
}
