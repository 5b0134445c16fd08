//! Concurrent per-key requests with per-key outcomes

use crate::error::ClientError;
use futures::stream::{self, StreamExt};
use std::future::Future;

/// Result of a bulk action, split by key
#[derive(Debug, Default)]
pub struct BulkOutcome<K> {
    /// Keys whose request returned 200
    pub succeeded: Vec<K>,
    /// Keys whose request failed, with the cause
    pub failed: Vec<(K, ClientError)>,
}

impl<K> BulkOutcome<K> {
    /// Whether every request succeeded
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of keys attempted
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Keys whose request failed
    pub fn failed_keys(&self) -> impl Iterator<Item = &K> {
        self.failed.iter().map(|(key, _)| key)
    }
}

/// Run `op` for every item with at most `limit` requests in flight
///
/// A `limit` of 0 issues everything at once. Results come back in input order and
/// every item is attempted even when earlier ones fail.
pub async fn fan_out<I, T, F, Fut, R>(items: I, limit: usize, op: F) -> Vec<(T, R)>
where
    I: IntoIterator<Item = T>,
    T: Clone,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let items: Vec<T> = items.into_iter().collect();
    let width = if limit == 0 { items.len().max(1) } else { limit };

    stream::iter(items)
        .map(|item| {
            let fut = op(item.clone());
            async move { (item, fut.await) }
        })
        .buffered(width)
        .collect()
        .await
}

/// Fan out a fallible request per key and split the results
pub async fn fan_out_keys<K, F, Fut>(keys: Vec<K>, limit: usize, op: F) -> BulkOutcome<K>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<(), ClientError>>,
{
    let mut outcome = BulkOutcome {
        succeeded: Vec::with_capacity(keys.len()),
        failed: Vec::new(),
    };

    for (key, result) in fan_out(keys, limit, op).await {
        match result {
            Ok(()) => outcome.succeeded.push(key),
            Err(err) => outcome.failed.push((key, err)),
        }
    }

    outcome
}
