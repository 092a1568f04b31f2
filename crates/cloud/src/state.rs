use jardine_shared::mealplan::PlannerState;
use jardine_shared::{Error, RemoteStore};
use reqwest::StatusCode;

use crate::client::{Client, send};

const STATE: &str = "state";

#[async_trait::async_trait]
impl RemoteStore for Client {
    async fn fetch(&self) -> jardine_shared::Result<Option<PlannerState>> {
        let response = send(self.get(STATE), Error::Persistence, true).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("remote has no snapshot yet");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::Persistence(format!("reading snapshot: {err}")))?;

        let state = PlannerState::from_json(&body)
            .map_err(|err| Error::Persistence(format!("malformed remote snapshot: {err}")))?;

        Ok(Some(state))
    }

    async fn push(&self, state: &PlannerState) -> jardine_shared::Result<()> {
        send(self.post(STATE).json(state), Error::Persistence, false).await?;

        tracing::debug!(weeks = state.weeks.len(), "snapshot pushed");

        Ok(())
    }
}
