//! Planificador con debounce.
//!
//! Mantiene como máximo una acción diferida. `schedule` cancela la anterior y
//! arma una nueva desde cero (debounce, no throttle); `cancel` la descarta y
//! `flush_now` la retira para que el llamador la ejecute de inmediato.
//!
//! Garantía: tras volver de `schedule`, `cancel` o `flush_now`, ninguna acción
//! armada antes puede dispararse. El temporizador sólo ejecuta su acción si,
//! al despertar y bajo el mismo lock, su época sigue siendo la vigente.
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
pub type Action<T> = Box<dyn FnOnce() -> BoxFuture<T> + Send + 'static>;

struct Pending<T> {
    epoch: u64,
    action: Action<T>,
    timer: Option<JoinHandle<()>>,
}

struct SchedulerInner<T> {
    epoch: u64,
    pending: Option<Pending<T>>,
}

pub struct DebounceScheduler<T> {
    runtime: Handle,
    inner: Arc<Mutex<SchedulerInner<T>>>,
}

fn lock<T>(m: &Mutex<SchedulerInner<T>>) -> MutexGuard<'_, SchedulerInner<T>> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Send + 'static> DebounceScheduler<T> {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime, inner: Arc::new(Mutex::new(SchedulerInner { epoch: 0, pending: None })) }
    }

    /// Arma `action` para dentro de `delay`, cancelando la acción pendiente.
    pub fn schedule<F, Fut>(&self, delay: Duration, action: F)
        where F: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = T> + Send + 'static
    {
        let mut inner = lock(&self.inner);
        inner.epoch += 1;
        let epoch = inner.epoch;
        if let Some(prev) = inner.pending.take() {
            if let Some(timer) = prev.timer {
                timer.abort();
            }
        }
        let action: Action<T> = Box::new(move || -> BoxFuture<T> { Box::pin(action()) });
        inner.pending = Some(Pending { epoch, action, timer: None });

        let weak: Weak<Mutex<SchedulerInner<T>>> = Arc::downgrade(&self.inner);
        let timer = self.runtime.spawn(async move {
                                    tokio::time::sleep(delay).await;
                                    let fired = {
                                        let Some(inner) = weak.upgrade() else { return };
                                        let mut guard = lock(&inner);
                                        if guard.pending.as_ref().is_some_and(|p| p.epoch == epoch) {
                                            guard.pending.take().map(|p| p.action)
                                        } else {
                                            None
                                        }
                                    };
                                    if let Some(action) = fired {
                                        log::debug!("debounce timer fired (epoch={epoch})");
                                        action().await;
                                    }
                                });
        if let Some(p) = inner.pending.as_mut() {
            p.timer = Some(timer);
        }
    }

    /// Descarta la acción pendiente. Devuelve `true` si había una.
    pub fn cancel(&self) -> bool {
        self.take_pending().is_some()
    }

    /// Retira la acción pendiente (si la hay) para ejecutarla ya.
    pub fn flush_now(&self) -> Option<Action<T>> {
        self.take_pending()
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.inner).pending.is_some()
    }

    fn take_pending(&self) -> Option<Action<T>> {
        let mut inner = lock(&self.inner);
        inner.epoch += 1;
        let pending = inner.pending.take()?;
        if let Some(timer) = pending.timer {
            timer.abort();
        }
        Some(pending.action)
    }
}

impl<T> Drop for DebounceScheduler<T> {
    fn drop(&mut self) {
        let mut inner = lock(&self.inner);
        inner.epoch += 1;
        if let Some(timer) = inner.pending.take().and_then(|p| p.timer) {
            timer.abort();
        }
    }
}
