use jardine_shared::mealplan::{DEFAULT_WEEKS, PlannerState};
use jardine_shared::{LocalStore, RemoteStore};
use std::sync::Arc;
use std::time::Duration;

use crate::{Debouncer, Planner};

#[derive(Debug, Clone)]
pub struct Options {
    pub debounce: Duration,
    /// Keep at least this many weeks planned ahead.
    pub horizon_weeks: Option<usize>,
    /// Fresh planners start on the current Monday with dated labels.
    pub dated: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(400),
            horizon_weeks: Some(DEFAULT_WEEKS),
            dated: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The remote snapshot replaced the local state.
    Replaced,
    /// The backend has no snapshot yet, local state kept.
    NotFound,
    /// Fetch failed or the snapshot was malformed, local state kept.
    Failed,
}

/// Owns the planner and keeps both stores up to date: every successful
/// mutation is written locally right away and pushed remotely once the
/// debounce delay elapses.
pub struct Coordinator {
    planner: Planner,
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    debouncer: Debouncer<PlannerState>,
    options: Options,
}

impl Coordinator {
    /// Loads the local snapshot, falling back to a fresh planner. Never
    /// touches the network.
    pub async fn start(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        options: Options,
    ) -> Self {
        let state = match local.load().await {
            Ok(Some(state)) => {
                tracing::debug!(weeks = state.weeks.len(), "local snapshot loaded");
                state
            }
            Ok(None) => {
                tracing::info!("no local snapshot, starting with an empty planner");
                initial_state(&options)
            }
            Err(err) => {
                tracing::warn!(error = %err, "local snapshot unreadable, starting with an empty planner");
                initial_state(&options)
            }
        };

        let debouncer = Debouncer::new(options.debounce, {
            let remote = remote.clone();
            move |state: PlannerState| {
                let remote = remote.clone();
                Box::pin(async move {
                    match remote.push(&state).await {
                        Ok(_) => tracing::debug!("snapshot pushed to remote"),
                        Err(err) => tracing::warn!(error = %err, "remote save failed"),
                    }
                }) as futures::future::BoxFuture<'static, ()>
            }
        });

        let mut coordinator = Self {
            planner: Planner::new(state),
            local,
            remote,
            debouncer,
            options,
        };

        if coordinator.grow_horizon() > 0 {
            coordinator.write_local().await;
        }

        coordinator
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetches the remote snapshot and, when valid, replaces the local
    /// state with it. Any pending push of the previous state is dropped.
    pub async fn reconcile(&mut self) -> Reconciled {
        let state = match self.remote.fetch().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!("no remote snapshot yet, keeping local state");
                return Reconciled::NotFound;
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote load failed, keeping local state");
                return Reconciled::Failed;
            }
        };

        if let Err(err) = state.validate() {
            tracing::warn!(error = %err, "remote snapshot malformed, keeping local state");
            return Reconciled::Failed;
        }

        self.debouncer.cancel();
        self.planner.replace(state);

        let grown = self.grow_horizon();
        self.write_local().await;

        if grown > 0 {
            self.debouncer.trigger(self.planner.snapshot());
        }

        tracing::info!(
            weeks = self.planner.weeks.len(),
            recipes = self.planner.recipes.len(),
            "remote snapshot applied"
        );

        Reconciled::Replaced
    }

    /// Runs a planner operation. On success the new state is written to the
    /// local store and scheduled for a remote push; on error nothing changed
    /// and nothing is persisted.
    pub async fn apply<T>(
        &mut self,
        operation: impl FnOnce(&mut Planner) -> jardine_shared::Result<T>,
    ) -> jardine_shared::Result<T> {
        let value = operation(&mut self.planner)?;

        self.write_local().await;
        self.debouncer.trigger(self.planner.snapshot());

        Ok(value)
    }

    /// Pushes any pending snapshot now and waits for the push to finish.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    pub fn is_sync_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn grow_horizon(&mut self) -> usize {
        let Some(weeks) = self.options.horizon_weeks else {
            return 0;
        };

        self.planner.ensure_horizon(weeks)
    }

    async fn write_local(&self) {
        if let Err(err) = self.local.save(&self.planner).await {
            tracing::warn!(error = %err, "local save failed");
        }
    }
}

fn initial_state(options: &Options) -> PlannerState {
    if options.dated {
        crate::dated_state(crate::now(), DEFAULT_WEEKS)
    } else {
        PlannerState::undated(DEFAULT_WEEKS)
    }
}
