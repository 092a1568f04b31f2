use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};

enum Message<T> {
    Trigger(T, u64),
    Flush(oneshot::Sender<()>),
}

/// What the caller and the worker agree is still waiting to fire.
///
/// `queued` counts triggers of the current generation the worker has not
/// received yet, `armed` is set while the worker holds one in its slot.
/// `cancel` starts a new generation, older values are dropped on arrival.
#[derive(Default)]
struct Pending {
    generation: u64,
    queued: usize,
    armed: bool,
}

#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Pending>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs `action` once the latest triggered value has been left alone for
/// `delay`. Each trigger replaces the pending value and restarts the delay.
///
/// The action runs on a background task, one invocation at a time. A
/// running action is never aborted; values triggered meanwhile wait for the
/// next delay. Dropping the debouncer fires whatever is still pending.
pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<Message<T>>,
    shared: Shared,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared = Shared::default();

        tokio::spawn(run(delay, receiver, shared.clone(), action));

        Self {
            sender,
            shared,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn trigger(&self, value: T) {
        let mut pending = self.shared.lock();

        if self
            .sender
            .send(Message::Trigger(value, pending.generation))
            .is_err()
        {
            tracing::warn!("debounce worker stopped, value dropped");
            return;
        }

        pending.queued += 1;
    }

    /// Drops the pending value, and any trigger the worker has not seen yet.
    pub fn cancel(&self) {
        let mut pending = self.shared.lock();

        pending.generation += 1;
        pending.queued = 0;
        pending.armed = false;
    }

    /// Runs the action for the pending value right away and waits for it.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();

        if self.sender.send(Message::Flush(done)).is_err() {
            return;
        }

        let _ = wait.await;
    }

    pub fn is_pending(&self) -> bool {
        let pending = self.shared.lock();

        pending.queued > 0 || pending.armed
    }
}

struct Slot<T> {
    value: T,
    generation: u64,
    deadline: Instant,
}

/// Takes the slotted value if it was not cancelled, clearing `armed`.
fn take_live<T>(slot: &mut Option<Slot<T>>, shared: &Shared) -> Option<T> {
    let slot = slot.take()?;
    let mut pending = shared.lock();

    if slot.generation != pending.generation {
        return None;
    }

    pending.armed = false;

    Some(slot.value)
}

async fn run<T, F>(
    delay: Duration,
    mut receiver: mpsc::UnboundedReceiver<Message<T>>,
    shared: Shared,
    action: F,
) where
    F: Fn(T) -> BoxFuture<'static, ()>,
{
    let mut slot: Option<Slot<T>> = None;

    loop {
        let deadline = slot.as_ref().map(|slot| slot.deadline);

        let message = match deadline {
            Some(deadline) => {
                tokio::select! {
                    message = receiver.recv() => message,
                    _ = sleep_until(deadline) => {
                        if let Some(value) = take_live(&mut slot, &shared) {
                            action(value).await;
                        }

                        continue;
                    }
                }
            }
            None => receiver.recv().await,
        };

        match message {
            Some(Message::Trigger(value, generation)) => {
                let mut pending = shared.lock();
                if generation != pending.generation {
                    continue;
                }

                pending.queued = pending.queued.saturating_sub(1);
                pending.armed = true;

                slot = Some(Slot {
                    value,
                    generation,
                    deadline: Instant::now() + delay,
                });
            }
            Some(Message::Flush(done)) => {
                if let Some(value) = take_live(&mut slot, &shared) {
                    action(value).await;
                }

                let _ = done.send(());
            }
            None => {
                if let Some(value) = take_live(&mut slot, &shared) {
                    action(value).await;
                }

                break;
            }
        }
    }
}
