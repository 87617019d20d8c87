//! FIFO task queue.
//!
//! Two locks with distinct jobs: a spin lock serializes the list pointers and
//! is held for a handful of instructions, while a mutex/condvar pair parks
//! consumers when the queue is empty. Lock order is mutex first, then spin
//! lock; nothing ever takes the mutex or waits while holding the spin lock.

use std::ptr;

use parking_lot::{Condvar, Mutex};

use super::task::Task;
use crate::util::{CachePadded, SpinLock};

struct Node {
    task: Task,
    next: *mut Node,
}

/// Singly linked list, oldest at `head`, newest at `tail`.
///
/// Nodes are heap-allocated through `Box` and owned by the list; `head` and
/// `tail` are both null exactly when the list is empty.
struct Fifo {
    head: *mut Node,
    tail: *mut Node,
    len: usize,
}

// SAFETY: the nodes are reachable only through this value, so moving it to
// another thread moves sole ownership of every node along with it.
unsafe impl Send for Fifo {}

impl Fifo {
    const fn new() -> Self {
        Self {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            len: 0,
        }
    }

    /// Link an already-allocated node at the tail.
    fn push(&mut self, node: Box<Node>) {
        let node = Box::into_raw(node);
        if self.tail.is_null() {
            self.head = node;
        } else {
            // SAFETY: a non-null tail points at the live last node.
            unsafe { (*self.tail).next = node };
        }
        self.tail = node;
        self.len += 1;
    }

    /// Unlink and return the oldest task.
    fn pop(&mut self) -> Option<Task> {
        if self.head.is_null() {
            return None;
        }
        // SAFETY: head came from `Box::into_raw` and is unlinked here, so the
        // box is reconstructed exactly once.
        let node = unsafe { Box::from_raw(self.head) };
        self.head = node.next;
        if self.head.is_null() {
            self.tail = ptr::null_mut();
        }
        self.len -= 1;
        Some(node.task)
    }
}

impl Drop for Fifo {
    fn drop(&mut self) {
        // Tasks still queued are dropped, never run.
        while self.pop().is_some() {}
    }
}

/// Unbounded multi-producer multi-consumer FIFO with blocking retrieval.
///
/// Producers call [`enqueue`](TaskQueue::enqueue); consumers call
/// [`pop_blocking`](TaskQueue::pop_blocking) and park while the queue is
/// empty. [`unblock`](TaskQueue::unblock) turns parking off for good, after
/// which consumers drain what is left and then see `None`.
pub(crate) struct TaskQueue {
    /// Hot state, padded so producer traffic stays off the sleepers' line.
    fifo: CachePadded<SpinLock<Fifo>>,
    /// True while consumers may park. Cleared once, by `unblock`.
    blocking: Mutex<bool>,
    available: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            fifo: CachePadded::new(SpinLock::new(Fifo::new())),
            blocking: Mutex::new(true),
            available: Condvar::new(),
        }
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.fifo.lock().len
    }

    /// Append a task and wake one parked consumer.
    pub fn enqueue(&self, task: Task) {
        // Allocate before taking the spin lock; the critical section is then
        // two pointer writes and an increment.
        let node = Box::new(Node {
            task,
            next: ptr::null_mut(),
        });
        self.fifo.lock().push(node);

        // A consumer that just saw the queue empty may be between its
        // re-check and its wait. It holds the mutex for that whole stretch,
        // so passing through the mutex here orders the notify below after
        // the consumer is actually parked.
        drop(self.blocking.lock());
        self.available.notify_one();
    }

    /// Pop the oldest task if one is queued. Never blocks.
    pub fn try_pop(&self) -> Option<Task> {
        self.fifo.lock().pop()
    }

    /// Pop the oldest task, parking while the queue is empty and blocking
    /// mode is on.
    ///
    /// Returns `None` only once the queue is both unblocked and empty; while
    /// tasks remain queued they are handed out regardless of blocking mode.
    pub fn pop_blocking(&self) -> Option<Task> {
        loop {
            if let Some(task) = self.try_pop() {
                return Some(task);
            }

            let mut blocking = self.blocking.lock();
            // Re-check under the mutex: an enqueue that raced the pop above
            // has already passed through this mutex, so its task is visible
            // here and we must not park past it.
            if let Some(task) = self.try_pop() {
                return Some(task);
            }
            if !*blocking {
                return None;
            }
            self.available.wait(&mut blocking);
        }
    }

    /// Turn blocking mode off and wake every parked consumer.
    ///
    /// Irreversible. Enqueues are still accepted afterwards; whether such a
    /// task runs or is dropped depends on whether a consumer drains it first.
    pub fn unblock(&self) {
        let mut blocking = self.blocking.lock();
        *blocking = false;
        drop(blocking);
        self.available.notify_all();
    }
}
