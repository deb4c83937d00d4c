// Client action registry and the shell that mounts registered actions
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait ClientAction: Send + Sync {
    async fn mount(&self) -> Box<dyn MountedAction>;
}

#[async_trait]
pub trait MountedAction: Send + Sync {
    /// Current render state as JSON
    async fn state(&self) -> Value;

    async fn unmount(self: Box<Self>);
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn ClientAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: &str, action: Arc<dyn ClientAction>) -> Result<(), DashboardError> {
        if self.actions.contains_key(key) {
            return Err(DashboardError::DuplicateAction {
                key: key.to_string(),
            });
        }
        self.actions.insert(key.to_string(), action);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ClientAction>> {
        self.actions.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.actions.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionStatus {
    pub key: String,
    pub mounted: bool,
}

/// Routes action keys to registered actions and owns whatever is mounted
pub struct Shell {
    registry: ActionRegistry,
    mounted: Mutex<HashMap<String, Box<dyn MountedAction>>>,
}

impl Shell {
    pub fn new(registry: ActionRegistry) -> Self {
        Self {
            registry,
            mounted: Mutex::new(HashMap::new()),
        }
    }

    fn action(&self, key: &str) -> Result<Arc<dyn ClientAction>, DashboardError> {
        self.registry
            .get(key)
            .ok_or_else(|| DashboardError::UnknownAction {
                key: key.to_string(),
            })
    }

    /// Mount the action unless it is already mounted, and return its state
    pub async fn open(&self, key: &str) -> Result<Value, DashboardError> {
        let action = self.action(key)?;
        {
            let mounted = self.mounted.lock().await;
            if let Some(existing) = mounted.get(key) {
                return Ok(existing.state().await);
            }
        }

        // Mounted without the lock held; a concurrent open may insert first
        let instance = action.mount().await;

        let mut mounted = self.mounted.lock().await;
        if let Some(existing) = mounted.get(key) {
            let state = existing.state().await;
            drop(mounted);
            tracing::debug!("{} already mounted, discarding the extra instance", key);
            instance.unmount().await;
            return Ok(state);
        }

        let state = instance.state().await;
        mounted.insert(key.to_string(), instance);
        Ok(state)
    }

    /// State of a mounted action; `None` when registered but not mounted
    pub async fn view(&self, key: &str) -> Result<Option<Value>, DashboardError> {
        self.action(key)?;
        let mounted = self.mounted.lock().await;
        match mounted.get(key) {
            Some(instance) => Ok(Some(instance.state().await)),
            None => Ok(None),
        }
    }

    /// Unmount an action; returns whether it was mounted
    pub async fn close(&self, key: &str) -> Result<bool, DashboardError> {
        self.action(key)?;
        let instance = self.mounted.lock().await.remove(key);
        match instance {
            Some(instance) => {
                instance.unmount().await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn close_all(&self) {
        let instances: Vec<(String, Box<dyn MountedAction>)> =
            self.mounted.lock().await.drain().collect();
        for (key, instance) in instances {
            tracing::info!("Closing {}", key);
            instance.unmount().await;
        }
    }

    pub async fn actions(&self) -> Vec<ActionStatus> {
        let mounted = self.mounted.lock().await;
        self.registry
            .keys()
            .into_iter()
            .map(|key| ActionStatus {
                mounted: mounted.contains_key(&key),
                key,
            })
            .collect()
    }
}
