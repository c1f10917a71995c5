//! Single-value broadcast cell.
//!
//! Holds exactly one current value. Subscribers receive the current value on
//! subscribe and every published value afterwards, synchronously, in publish
//! order. Callbacks run outside the internal lock, so a subscriber may read
//! or publish from inside its callback: a publish made while values are
//! being delivered is queued and delivered by the outermost publisher after
//! the current value reaches every subscriber.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
    closed: bool,
    /// Значения, ожидающие рассылки
    pending: VecDeque<T>,
    delivering: bool,
}

pub struct Broadcast<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                subscribers: Vec::new(),
                next_id: 0,
                closed: false,
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// Текущее значение
    pub fn get(&self) -> T {
        self.inner.lock().unwrap().value.clone()
    }

    /// Установить новое значение и разослать его подписчикам.
    /// После `close` ничего не делает.
    pub fn publish(&self, value: T) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.closed {
                tracing::debug!("publish on a closed broadcast ignored");
                return;
            }
            inner.pending.push_back(value);
            // рассылку ведет внешний вызов publish
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }

        loop {
            let (value, subscribers) = {
                let mut inner = self.inner.lock().unwrap();
                let Some(value) = inner.pending.pop_front() else {
                    inner.delivering = false;
                    return;
                };
                if inner.closed {
                    inner.pending.clear();
                    inner.delivering = false;
                    return;
                }
                inner.value = value.clone();
                let subscribers: Vec<Callback<T>> =
                    inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
                (value, subscribers)
            };

            for callback in subscribers {
                callback(&value);
            }
        }
    }

    /// Подписаться; колбэк сразу получает текущее значение
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_id;
            inner.next_id += 1;
            if !inner.closed {
                inner.subscribers.push((id, Arc::clone(&callback)));
            }
            (id, inner.value.clone())
        };

        callback(&current);

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }

    /// Отписать всех и больше не принимать значения
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        inner.subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}

/// Подписка; при drop подписчик удаляется
pub struct Subscription<T> {
    id: u64,
    inner: Weak<Mutex<Inner<T>>>,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
