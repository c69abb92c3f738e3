//! Shared, lazily-started snapshot derived from several live sources.
//!
//! A [`SharedProjection`] owns one output channel. While at least one
//! [`Subscription`] is alive a single worker task recomputes the snapshot
//! whenever any source changes and broadcasts it to every subscriber. When the
//! last subscription drops the worker keeps running for an idle grace period,
//! so a screen that detaches and reattaches quickly does not restart it; after
//! that the worker is cancelled and the next subscription starts a fresh one.
//! The last published value is kept across restarts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type SpawnWorker<T> =
    Box<dyn Fn(Arc<watch::Sender<T>>, CancellationToken) -> JoinHandle<()> + Send + Sync>;

/// Broadcast snapshot with idle teardown.
pub struct SharedProjection<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for SharedProjection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T> {
    output: Arc<watch::Sender<T>>,
    spawn_worker: SpawnWorker<T>,
    idle_grace: Duration,
    lifecycle: Mutex<Lifecycle>,
}

#[derive(Default)]
struct Lifecycle {
    observers: usize,
    /// Bumped on every attach/detach so a stale teardown timer can tell it lost
    epoch: u64,
    worker: Option<CancellationToken>,
}

impl<T> Inner<T> {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn teardown_if_idle(&self, epoch: u64) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.epoch != epoch || lifecycle.observers > 0 {
            return;
        }
        if let Some(token) = lifecycle.worker.take() {
            token.cancel();
            tracing::debug!("Projection idle, worker stopped");
        }
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        let lifecycle = self.lifecycle.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = lifecycle.worker.take() {
            token.cancel();
        }
    }
}

impl<T> SharedProjection<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Build a projection from a worker factory.
    ///
    /// `spawn_worker` is called each time the projection goes from idle to
    /// observed. The task it returns must publish into the given sender and
    /// exit once the token is cancelled.
    pub fn from_worker<F>(initial: T, idle_grace: Duration, spawn_worker: F) -> Self
    where
        F: Fn(Arc<watch::Sender<T>>, CancellationToken) -> JoinHandle<()> + Send + Sync + 'static,
    {
        let (output, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                output: Arc::new(output),
                spawn_worker: Box::new(spawn_worker),
                idle_grace,
                lifecycle: Mutex::new(Lifecycle::default()),
            }),
        }
    }

    /// Project a single source.
    pub fn map<A, F>(
        source: watch::Receiver<A>,
        initial: T,
        idle_grace: Duration,
        project: F,
    ) -> Self
    where
        A: Send + Sync + 'static,
        F: Fn(&A) -> T + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        Self::from_worker(initial, idle_grace, move |output, token| {
            let mut source = source.clone();
            let project = Arc::clone(&project);
            tokio::spawn(async move {
                loop {
                    let snapshot = project(&source.borrow_and_update());
                    publish(&*output, snapshot);

                    tokio::select! {
                        () = token.cancelled() => break,
                        changed = source.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                    }
                }
            })
        })
    }

    /// Combine three sources into one snapshot.
    ///
    /// The first snapshot is computed eagerly from the sources' current
    /// values, so a subscriber never observes a placeholder.
    pub fn combine3<A, B, C, F>(
        a: watch::Receiver<A>,
        b: watch::Receiver<B>,
        c: watch::Receiver<C>,
        idle_grace: Duration,
        project: F,
    ) -> Self
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(&A, &B, &C) -> T + Send + Sync + 'static,
    {
        let initial = project(&a.borrow(), &b.borrow(), &c.borrow());
        let project = Arc::new(project);
        Self::from_worker(initial, idle_grace, move |output, token| {
            let (mut a, mut b, mut c) = (a.clone(), b.clone(), c.clone());
            let project = Arc::clone(&project);
            tokio::spawn(async move {
                loop {
                    let snapshot = project(
                        &a.borrow_and_update(),
                        &b.borrow_and_update(),
                        &c.borrow_and_update(),
                    );
                    publish(&*output, snapshot);

                    let changed = tokio::select! {
                        () = token.cancelled() => break,
                        changed = a.changed() => changed,
                        changed = b.changed() => changed,
                        changed = c.changed() => changed,
                    };
                    if changed.is_err() {
                        tracing::debug!("Projection source closed, worker stopped");
                        break;
                    }
                }
            })
        })
    }

    /// Attach an observer, starting the worker if the projection was idle.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut lifecycle = self.inner.lifecycle();
        lifecycle.observers += 1;
        lifecycle.epoch += 1;
        if lifecycle.worker.is_none() {
            let token = CancellationToken::new();
            // Detached: the token is the only handle the projection needs
            drop((self.inner.spawn_worker)(
                Arc::clone(&self.inner.output),
                token.clone(),
            ));
            lifecycle.worker = Some(token);
            tracing::debug!("Projection observed, worker started");
        }
        drop(lifecycle);

        Subscription {
            receiver: self.inner.output.subscribe(),
            owner: Arc::downgrade(&self.inner),
            idle_grace: self.inner.idle_grace,
            detach: detach::<T>,
        }
    }

    /// Last published snapshot, without subscribing
    pub fn current(&self) -> T {
        self.inner.output.borrow().clone()
    }

    /// Whether a worker is currently running
    pub fn is_active(&self) -> bool {
        self.inner.lifecycle().worker.is_some()
    }

    /// Number of attached observers
    pub fn observer_count(&self) -> usize {
        self.inner.lifecycle().observers
    }
}

fn publish<T: PartialEq>(output: &watch::Sender<T>, snapshot: T) {
    output.send_if_modified(|current| {
        if *current == snapshot {
            false
        } else {
            *current = snapshot;
            true
        }
    });
}

/// Detach one observer; schedules teardown when it was the last.
fn detach<T: Send + Sync + 'static>(owner: &Weak<Inner<T>>, idle_grace: Duration) {
    let Some(inner) = owner.upgrade() else {
        return;
    };

    let epoch = {
        let mut lifecycle = inner.lifecycle();
        lifecycle.observers = lifecycle.observers.saturating_sub(1);
        if lifecycle.observers > 0 {
            return;
        }
        lifecycle.epoch += 1;
        lifecycle.epoch
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let owner = owner.clone();
            drop(inner);
            handle.spawn(async move {
                tokio::time::sleep(idle_grace).await;
                if let Some(inner) = owner.upgrade() {
                    inner.teardown_if_idle(epoch);
                }
            });
        }
        // No runtime to wait on: stop right away
        Err(_) => inner.teardown_if_idle(epoch),
    }
}

/// An attached observer of a [`SharedProjection`].
///
/// Dropping it detaches the observer.
pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
    owner: Weak<Inner<T>>,
    idle_grace: Duration,
    detach: fn(&Weak<Inner<T>>, Duration),
}

impl<T: Clone> Subscription<T> {
    /// Latest snapshot, marking it seen
    pub fn current(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the projection is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Wait until a snapshot satisfies `predicate` and return it.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.receiver.wait_for(predicate).await.ok().map(|snapshot| snapshot.clone())
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        (self.detach)(&self.owner, self.idle_grace);
    }
}
