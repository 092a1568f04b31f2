#![allow(dead_code)]

use jardine_mealplan::Planner;
use jardine_shared::mealplan::PlannerState;
use jardine_shared::recipe::Recipe;
use jardine_shared::{LocalStore, RemoteStore};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryLocal {
    pub slot: Mutex<Option<PlannerState>>,
    pub saves: AtomicUsize,
    pub broken: bool,
}

impl MemoryLocal {
    pub fn with(state: PlannerState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn saved(&self) -> Option<PlannerState> {
        self.slot.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LocalStore for MemoryLocal {
    async fn load(&self) -> jardine_shared::Result<Option<PlannerState>> {
        if self.broken {
            return Err(jardine_shared::Error::Persistence("disk on fire".to_owned()));
        }

        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, state: &PlannerState) -> jardine_shared::Result<()> {
        if self.broken {
            return Err(jardine_shared::Error::Persistence("disk on fire".to_owned()));
        }

        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(state.clone());

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRemote {
    pub snapshot: Mutex<Option<PlannerState>>,
    pub pushes: Mutex<Vec<PlannerState>>,
    pub fail_fetch: bool,
    pub fail_push: bool,
}

impl MemoryRemote {
    pub fn with(state: PlannerState) -> Self {
        Self {
            snapshot: Mutex::new(Some(state)),
            ..Default::default()
        }
    }

    pub fn pushes(&self) -> Vec<PlannerState> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RemoteStore for MemoryRemote {
    async fn fetch(&self) -> jardine_shared::Result<Option<PlannerState>> {
        if self.fail_fetch {
            return Err(jardine_shared::Error::Persistence("network down".to_owned()));
        }

        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn push(&self, state: &PlannerState) -> jardine_shared::Result<()> {
        if self.fail_push {
            return Err(jardine_shared::Error::Persistence("network down".to_owned()));
        }

        self.pushes.lock().unwrap().push(state.clone());

        Ok(())
    }
}

pub fn recipe(id: &str, title: &str) -> Recipe {
    Recipe::new(id, title)
}

pub fn planner_with_recipes(ids: &[&str]) -> anyhow::Result<Planner> {
    let mut planner = Planner::default();
    for id in ids {
        planner.upsert_recipe(recipe(id, &format!("Recipe {id}")))?;
    }

    Ok(planner)
}
