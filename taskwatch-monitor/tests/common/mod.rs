//! Scripted backend shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use taskwatch_client::{Backend, Result, TransportError};
use taskwatch_core::domain::task::{Task, TaskId, TaskStatus};
use tokio::sync::Semaphore;

/// A canned backend reply
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Fail => Err(TransportError::server_error(503, "scripted failure")),
        }
    }
}

/// One scripted channel: replies are consumed in order, the last one repeats
struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    held: AtomicBool,
    gate: Semaphore,
}

impl<T: Clone> Script<T> {
    fn new(initial: Reply<T>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([initial])),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    async fn call(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.held.load(Ordering::SeqCst) {
            self.gate.acquire().await.unwrap().forget();
        }

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front().unwrap()
            } else {
                replies.front().cloned().unwrap()
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply.into_result()
    }

    fn set(&self, replies: Vec<Reply<T>>) {
        assert!(!replies.is_empty());
        *self.replies.lock().unwrap() = replies.into();
    }
}

/// In-memory backend whose replies and latency are controlled by the test
pub struct ScriptedBackend {
    tasks: Script<Vec<Task>>,
    workers: Script<u32>,
    submissions: Script<Task>,
    submitted: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            tasks: Script::new(Reply::Ok(Vec::new())),
            workers: Script::new(Reply::Ok(0)),
            submissions: Script::new(Reply::Fail),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn set_tasks(&self, replies: Vec<Reply<Vec<Task>>>) {
        self.tasks.set(replies);
    }

    pub fn set_workers(&self, replies: Vec<Reply<u32>>) {
        self.workers.set(replies);
    }

    pub fn set_submissions(&self, replies: Vec<Reply<Task>>) {
        self.submissions.set(replies);
    }

    /// Task fetches block until released
    pub fn hold_tasks(&self) {
        self.tasks.held.store(true, Ordering::SeqCst);
    }

    pub fn release_tasks(&self, count: usize) {
        self.tasks.gate.add_permits(count);
    }

    /// Worker-count fetches block until released
    pub fn hold_workers(&self) {
        self.workers.held.store(true, Ordering::SeqCst);
    }

    pub fn release_workers(&self, count: usize) {
        self.workers.gate.add_permits(count);
    }

    pub fn task_calls(&self) -> usize {
        self.tasks.calls.load(Ordering::SeqCst)
    }

    pub fn worker_calls(&self) -> usize {
        self.workers.calls.load(Ordering::SeqCst)
    }

    pub fn max_task_fetches_in_flight(&self) -> usize {
        self.tasks.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn max_worker_fetches_in_flight(&self) -> usize {
        self.workers.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.tasks.call().await
    }

    async fn fetch_worker_count(&self) -> Result<u32> {
        self.workers.call().await
    }

    async fn submit_task(&self, input: &str) -> Result<Task> {
        self.submitted.lock().unwrap().push(input.to_string());
        self.submissions.call().await
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

/// Builds a task whose result is consistent with its status
pub fn task(id: TaskId, status: TaskStatus) -> Task {
    let result = (status == TaskStatus::Completed).then(|| json!({"x": 1}));
    Task {
        id,
        input_data: "hello".to_string(),
        status,
        result,
        created_at: at(id),
        updated_at: at(id),
        worker_id: None,
    }
}
