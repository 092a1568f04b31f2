use crate::mealplan::PlannerState;

/// Durable slot on this device holding the latest snapshot.
#[async_trait::async_trait]
pub trait LocalStore: Send + Sync {
    async fn load(&self) -> crate::Result<Option<PlannerState>>;
    async fn save(&self, state: &PlannerState) -> crate::Result<()>;
}

/// Shared household copy of the snapshot.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// `Ok(None)` when the backend has no snapshot yet.
    async fn fetch(&self) -> crate::Result<Option<PlannerState>>;
    async fn push(&self, state: &PlannerState) -> crate::Result<()>;
}

/// Remote used when syncing is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRemote;

#[async_trait::async_trait]
impl RemoteStore for OfflineRemote {
    async fn fetch(&self) -> crate::Result<Option<PlannerState>> {
        Ok(None)
    }

    async fn push(&self, _state: &PlannerState) -> crate::Result<()> {
        tracing::debug!("remote sync disabled, snapshot kept local");

        Ok(())
    }
}
