//! Scripted fetch sources shared by the store tests

use async_trait::async_trait;
use heimdall_client::{ClientError, ConfigSource, HeimdallClient, JobSource};
use heimdall_core::domain::job::JobSummary;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Reply<T> = (Duration, Result<T, ClientError>);

/// Answers each fetch with the next scripted reply
///
/// Once the script runs out every fetch fails with a 503.
pub struct Scripted<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
}

impl<T> Scripted<T> {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(self, value: T) -> Self {
        self.push(Duration::ZERO, Ok(value))
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.push(Duration::ZERO, Err(error))
    }

    /// Reply that resolves only after `delay` of tokio time
    pub fn ok_after(self, delay: Duration, value: T) -> Self {
        self.push(delay, Ok(value))
    }

    pub fn push(self, delay: Duration, reply: Result<T, ClientError>) -> Self {
        self.replies.lock().unwrap().push_back((delay, reply));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ClientError::api_error(503, "no scripted reply")),
        }
    }
}

#[async_trait]
impl JobSource for Scripted<Vec<JobSummary>> {
    async fn fetch_jobs(&self) -> heimdall_client::Result<Vec<JobSummary>> {
        self.next().await
    }
}

#[async_trait]
impl ConfigSource for Scripted<serde_json::Value> {
    async fn fetch_config(&self) -> heimdall_client::Result<serde_json::Value> {
        self.next().await
    }
}

pub fn job(id: &str) -> JobSummary {
    JobSummary::new(json!({ "id": id }))
}

/// Failure reported by an upstream proxy
pub fn bad_gateway() -> ClientError {
    ClientError::api_error(502, "connection reset by peer")
}

/// Transport-level failure from a real client: nothing listens on port 9
pub async fn refused_connection() -> ClientError {
    HeimdallClient::new("http://127.0.0.1:9")
        .list_jobs()
        .await
        .expect_err("nothing listens on the discard port")
}

/// Lets spawned fetch tasks run to completion
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
