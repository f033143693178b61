use agent_agency_council::types::*;
use anyhow::Result;

/// Placeholder trait for verdict persistence
#[async_trait::async_trait]
pub trait VerdictWriter: Send + Sync {
    async fn persist_verdict(&self, task_id: &str, verdict: &FinalVerdict) -> Result<()>;
    async fn persist_waivers(&self, task_id: &str, waivers: &[CawsWaiver]) -> Result<()>;
}

/// In-memory stub implementation; replace with DB client (Postgres) later.
pub struct InMemoryWriter;

#[async_trait::async_trait]
impl VerdictWriter for InMemoryWriter {
    async fn persist_verdict(&self, _task_id: &str, _verdict: &FinalVerdict) -> Result<()> {
        Ok(())
    }
    async fn persist_waivers(&self, _task_id: &str, _waivers: &[CawsWaiver]) -> Result<()> {
        Ok(())
    }
}
