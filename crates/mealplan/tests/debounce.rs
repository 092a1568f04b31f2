use jardine_mealplan::Debouncer;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

fn recording(delay: Duration) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
    let fired = Arc::new(Mutex::new(vec![]));
    let debouncer = Debouncer::new(delay, {
        let fired = fired.clone();
        move |value: u32| {
            let fired = fired.clone();
            Box::pin(async move {
                fired.lock().unwrap().push(value);
            }) as futures::future::BoxFuture<'static, ()>
        }
    });

    (debouncer, fired)
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_value_fires() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(1);
    sleep(Duration::from_millis(100)).await;
    debouncer.trigger(2);
    sleep(Duration::from_millis(100)).await;
    debouncer.trigger(3);

    sleep(Duration::from_millis(399)).await;
    assert!(fired.lock().unwrap().is_empty());
    assert!(debouncer.is_pending());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(*fired.lock().unwrap(), vec![3]);
    assert!(!debouncer.is_pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_fire_separately() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(1);
    sleep(Duration::from_millis(500)).await;
    debouncer.trigger(2);
    sleep(Duration::from_millis(500)).await;

    assert_eq!(*fired.lock().unwrap(), vec![1, 2]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(1);
    sleep(Duration::from_millis(100)).await;
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    sleep(Duration::from_secs(1)).await;
    assert!(fired.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_flush_fires_immediately() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(800));

    debouncer.trigger(7);
    debouncer.flush().await;
    assert_eq!(*fired.lock().unwrap(), vec![7]);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(*fired.lock().unwrap(), vec![7]);

    debouncer.flush().await;
    assert_eq!(*fired.lock().unwrap(), vec![7]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_drop_fires_pending_value() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(5);
    drop(debouncer);

    sleep(Duration::from_millis(10)).await;
    assert_eq!(*fired.lock().unwrap(), vec![5]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_trigger_at_deadline_stays_pending() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(1);
    sleep(Duration::from_millis(400)).await;
    debouncer.trigger(2);
    assert!(debouncer.is_pending());

    for _ in 0..10 {
        tokio::task::yield_now().await;
        assert!(debouncer.is_pending());
    }

    sleep(Duration::from_millis(401)).await;
    assert_eq!(fired.lock().unwrap().last(), Some(&2));
    assert!(!debouncer.is_pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_trigger_after_cancel_fires() -> anyhow::Result<()> {
    let (debouncer, fired) = recording(Duration::from_millis(400));

    debouncer.trigger(1);
    debouncer.cancel();
    debouncer.trigger(2);
    assert!(debouncer.is_pending());

    sleep(Duration::from_millis(401)).await;
    assert_eq!(*fired.lock().unwrap(), vec![2]);
    assert!(!debouncer.is_pending());

    Ok(())
}
