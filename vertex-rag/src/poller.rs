//! Long-running operation polling.
//!
//! [`poll_until_done`] knows nothing about HTTP. It repeatedly awaits a
//! status-fetch closure until the returned record reports `done`. The
//! Operations API and every `*_and_wait` helper are built on it.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use vertex_rag_types::operations::{Operation, OperationKind, OperationOutcome};

use crate::error::{Error, Result};

/// Default delay between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default upper bound for a single backoff delay.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(60);
/// Default upper bound for the whole wait.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30 * 60);

/// 轮询策略。
///
/// 第 `n` 次（从 1 开始）请求后的等待时间为 `interval * multiplier^(n-1)`，
/// 且不超过 `max_interval`。`multiplier` 为 `1.0` 时即固定间隔轮询。
#[derive(Debug, Clone, PartialEq)]
pub struct PollOptions {
    /// 初始轮询间隔。
    pub interval: Duration,
    /// 退避倍数，小于 `1.0` 时按 `1.0` 处理。
    pub multiplier: f64,
    /// 单次等待的上限。
    pub max_interval: Duration,
    /// 总等待时间上限，到达后不再发起请求。`None` 表示不限时。
    pub max_wait: Option<Duration>,
    /// 最大请求次数。`None` 表示不限次数。
    pub max_attempts: Option<u32>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            multiplier: 1.0,
            max_interval: DEFAULT_MAX_INTERVAL,
            max_wait: Some(DEFAULT_MAX_WAIT),
            max_attempts: None,
        }
    }
}

impl PollOptions {
    /// 固定间隔轮询。
    #[must_use]
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_interval: interval,
            ..Self::default()
        }
    }

    /// 指数退避轮询。
    #[must_use]
    pub fn exponential(initial: Duration, multiplier: f64, max_interval: Duration) -> Self {
        Self {
            interval: initial,
            multiplier,
            max_interval,
            ..Self::default()
        }
    }

    /// 设置最长等待时间。
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// 设置最大轮询次数。
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// 第 `attempt` 次（从 1 开始）请求后的等待时间。
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.multiplier.max(1.0).powi(exponent);
        Duration::try_from_secs_f64(self.interval.as_secs_f64() * factor)
            .unwrap_or(self.max_interval)
            .min(self.max_interval)
    }
}

/// 轮询直到操作完成。
///
/// `fetch` receives the 1-based attempt number and returns the latest record.
/// A fetch error aborts the wait immediately and is returned unchanged. The
/// returned record always has `done == true`. Its `error` field is not
/// inspected here. See [`into_response`].
///
/// # Errors
/// 当 fetch 失败，或超过 `max_attempts` / `max_wait` 时返回错误。
pub async fn poll_until_done<R, F, Fut>(mut fetch: F, options: &PollOptions) -> Result<Operation<R>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Operation<R>>>,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        let operation = fetch(attempt).await?;
        let name = operation.name.as_deref().unwrap_or("<unnamed>");

        if operation.is_done() {
            tracing::info!(operation = name, attempts = attempt, "operation completed");
            return Ok(operation);
        }

        if let Some(max_attempts) = options.max_attempts {
            if attempt >= max_attempts {
                tracing::warn!(operation = name, attempts = attempt, "operation wait exhausted attempts");
                return Err(Error::Timeout {
                    message: format!("operation {name} still running after {attempt} attempts"),
                });
            }
        }

        let delay = options.delay_for(attempt);
        if let Some(max_wait) = options.max_wait {
            let elapsed = start.elapsed();
            if elapsed
                .checked_add(delay)
                .is_none_or(|deadline| deadline >= max_wait)
            {
                tracing::warn!(
                    operation = name,
                    attempts = attempt,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "operation wait timed out"
                );
                return Err(Error::Timeout {
                    message: format!(
                        "operation {name} still running after {attempt} attempts ({:?} limit)",
                        max_wait
                    ),
                });
            }
        }

        tracing::debug!(
            operation = name,
            attempt,
            delay_ms = delay.as_millis() as u64,
            progress = ?operation.progress_percentage(),
            "operation still running"
        );
        tokio::time::sleep(delay).await;
    }
}

/// 轮询直到操作完成，或 `cancel` 先完成。
///
/// # Errors
/// 除 [`poll_until_done`] 的错误外，取消时返回 [`Error::Cancelled`]。
pub async fn poll_until_done_or_cancelled<R, F, Fut, C>(
    fetch: F,
    options: &PollOptions,
    cancel: C,
) -> Result<Operation<R>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Operation<R>>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        result = poll_until_done(fetch, options) => result,
        () = cancel => {
            tracing::warn!("operation wait cancelled");
            Err(Error::Cancelled {
                message: "operation wait cancelled by caller".into(),
            })
        }
    }
}

/// Fails with [`Error::OperationFailed`] when a finished operation carries an error.
///
/// # Errors
/// 当操作记录中包含 `error` 时返回错误。
pub fn ensure_succeeded<R>(operation: &Operation<R>) -> Result<()> {
    let Some(error) = &operation.error else {
        return Ok(());
    };
    let name = operation.name.clone().unwrap_or_default();
    let code = error.code.unwrap_or(2);
    let message = error.message.clone().unwrap_or_default();
    tracing::warn!(operation = %name, code, message = %message, "operation finished with error");
    Err(Error::OperationFailed {
        name,
        code,
        message,
    })
}

/// Extracts the typed payload from a finished operation.
///
/// A missing `response` decodes from JSON `null`, which suits `()` and other
/// unit-like payloads.
///
/// # Errors
/// 当操作未完成、包含错误，或 `response` 无法解析为 `R` 时返回错误。
pub fn into_response<R: DeserializeOwned>(operation: Operation) -> Result<R> {
    ensure_done(&operation)?;
    ensure_succeeded(&operation)?;
    let name = operation.name.unwrap_or_default();
    serde_json::from_value(operation.response.unwrap_or(Value::Null)).map_err(|err| Error::Parse {
        message: format!("operation {name} returned an unexpected payload: {err}"),
    })
}

/// Decodes a finished operation's payload by the kind of request that started it.
///
/// # Errors
/// 当操作未完成、包含错误，或载荷与 `kind` 不符时返回错误。
pub fn into_outcome(kind: OperationKind, operation: Operation) -> Result<OperationOutcome> {
    ensure_done(&operation)?;
    ensure_succeeded(&operation)?;
    let name = operation.name.unwrap_or_default();
    OperationOutcome::decode(kind, operation.response).map_err(|err| Error::Parse {
        message: format!("operation {name}: {err}"),
    })
}

fn ensure_done<R>(operation: &Operation<R>) -> Result<()> {
    if operation.is_done() {
        return Ok(());
    }
    Err(Error::InvalidConfig {
        message: format!(
            "operation {} is still running",
            operation.name.as_deref().unwrap_or("<unnamed>")
        ),
    })
}
