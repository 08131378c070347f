//! Delay-buffer for a rapidly-changing value.
//!
//! Feeds a quiet-period filter: the lagged output only takes the most
//! recent input value once it has remained unchanged for the full delay.
//! Intermediate values are never surfaced, and dropping the debouncer
//! cancels any pending update.

use tokio::sync::watch;
use tokio::time::{sleep, Duration};

pub struct Debouncer<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input_tx, mut input_rx) = watch::channel(initial.clone());
        let (output_tx, output_rx) = watch::channel(initial);

        tokio::spawn(async move {
            loop {
                if input_rx.changed().await.is_err() {
                    // Debouncer dropped; pending update is cancelled.
                    break;
                }
                loop {
                    let timer = sleep(delay);
                    tokio::pin!(timer);
                    tokio::select! {
                        _ = &mut timer => break,
                        changed = input_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            // New value within the quiet period: restart.
                        }
                    }
                }
                let latest = input_rx.borrow_and_update().clone();
                if output_tx.send(latest).is_err() {
                    break;
                }
            }
        });

        Self {
            input: input_tx,
            output: output_rx,
        }
    }

    /// Feed a new input value. Equal values do not restart the timer.
    pub fn push(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Subscribe to the lagged output.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    /// Most recent settled value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let debouncer = Debouncer::new(String::new(), Duration::from_millis(200));
        let mut output = debouncer.subscribe();

        let started = Instant::now();
        debouncer.push("or".to_string());
        sleep(Duration::from_millis(50)).await;
        debouncer.push("orw".to_string());
        sleep(Duration::from_millis(50)).await;
        debouncer.push("orwell".to_string());

        output.changed().await.unwrap();
        assert_eq!(*output.borrow(), "orwell");
        // 100ms of burst, then the full 200ms quiet period.
        assert_eq!(started.elapsed(), Duration::from_millis(300));

        // Exactly one update for the whole burst.
        assert!(!output.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn equal_pushes_do_not_restart_the_timer() {
        let debouncer = Debouncer::new(String::new(), Duration::from_millis(200));
        let mut output = debouncer.subscribe();

        let started = Instant::now();
        debouncer.push("dune".to_string());
        sleep(Duration::from_millis(150)).await;
        debouncer.push("dune".to_string());

        output.changed().await.unwrap();
        assert_eq!(*output.borrow(), "dune");
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_update() {
        let debouncer = Debouncer::new(0u32, Duration::from_millis(200));
        let mut output = debouncer.subscribe();

        debouncer.push(7);
        sleep(Duration::from_millis(100)).await;
        drop(debouncer);
        sleep(Duration::from_millis(500)).await;

        assert_eq!(*output.borrow(), 0);
        assert!(output.changed().await.is_err());
    }
}
