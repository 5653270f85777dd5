// Source trait for the one-time startup load
use crate::domain::reading::Reading;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Short human-readable origin, for logs
    fn describe(&self) -> String;

    /// Fetch every reading. Order and uniqueness are checked by the store, not here.
    async fn load_readings(&self) -> anyhow::Result<Vec<Reading>>;
}
