//! Async facade over the blocking hash operations
//!
//! Each call clones the context and runs on Tokio's blocking pool, so the
//! primitive lock never blocks an executor thread. Clearing flags apply to
//! the moved password buffer and to the clone's secret, not to the caller's
//! context.

use crate::context::Context;
use crate::error::{Argon2Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio::sync::oneshot;
use zeroize::Zeroizing;

/// Pending result of a blocking operation
pub struct AsyncArgon2Result<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

/// Pending result routed through a caller-supplied handler
pub struct AsyncArgon2ResultWithHandler<T, F> {
    receiver: oneshot::Receiver<Result<T>>,
    handler: Option<F>,
}

impl<T> AsyncArgon2Result<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<T>>) -> Self {
        Self { receiver }
    }

    /// Already completed result
    #[must_use]
    pub fn ready(result: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Already failed result
    #[must_use]
    pub fn error(error: Argon2Error) -> Self {
        Self::ready(Err(error))
    }

    /// Resolve through `handler` instead of yielding a `Result`
    pub fn on_result<F, U>(self, handler: F) -> AsyncArgon2ResultWithHandler<T, F>
    where
        F: FnOnce(Result<T>) -> U,
    {
        AsyncArgon2ResultWithHandler {
            receiver: self.receiver,
            handler: Some(handler),
        }
    }
}

fn dropped() -> Argon2Error {
    Argon2Error::internal("Argon2 blocking task dropped")
}

impl<T> Future for AsyncArgon2Result<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(dropped())),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, F, U> Future for AsyncArgon2ResultWithHandler<T, F>
where
    F: FnOnce(Result<T>) -> U + Unpin,
{
    type Output = U;

    fn poll(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let result = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => Err(dropped()),
            Poll::Pending => return Poll::Pending,
        };
        // Polling again after completion stays pending
        match this.handler.take() {
            Some(handler) => Poll::Ready(handler(result)),
            None => Poll::Pending,
        }
    }
}

fn spawn<T, F>(job: F) -> AsyncArgon2Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        return AsyncArgon2Result::error(Argon2Error::internal(
            "async Argon2 operations require a Tokio runtime",
        ));
    };
    let (tx, rx) = oneshot::channel();
    handle.spawn_blocking(move || {
        let _ = tx.send(job());
    });
    AsyncArgon2Result::new(rx)
}

impl Context {
    /// [`Context::hash`] on the blocking pool
    pub fn hash_async(&self, password: Vec<u8>, salt: Vec<u8>) -> AsyncArgon2Result<Vec<u8>> {
        let mut ctx = self.clone();
        spawn(move || {
            let mut password = Zeroizing::new(password);
            ctx.hash(&mut password, &salt)
        })
    }

    /// [`Context::hash_encoded`] on the blocking pool
    pub fn hash_encoded_async(&self, password: Vec<u8>, salt: Vec<u8>) -> AsyncArgon2Result<String> {
        let mut ctx = self.clone();
        spawn(move || {
            let mut password = Zeroizing::new(password);
            ctx.hash_encoded(&mut password, &salt)
        })
    }

    /// [`Context::verify_encoded`] on the blocking pool
    ///
    /// The decoded parameters are adopted by a clone, so this context is
    /// left as it was.
    pub fn verify_encoded_async(
        &self,
        encoded: impl Into<String>,
        password: Vec<u8>,
    ) -> AsyncArgon2Result<bool> {
        let mut ctx = self.clone();
        let encoded = encoded.into();
        spawn(move || {
            let mut password = Zeroizing::new(password);
            ctx.verify_encoded(&encoded, &mut password)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_result_resolves_immediately() {
        let value = AsyncArgon2Result::ready(Ok(7u8)).await.expect("ready value");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn handler_receives_the_error() {
        let code = AsyncArgon2Result::<u8>::error(Argon2Error::MemoryTooLittle)
            .on_result(|result| result.err().and_then(|e| e.code()))
            .await;
        assert_eq!(code, Some(-14));
    }

    #[tokio::test]
    async fn dropped_sender_is_an_internal_error() {
        let (tx, rx) = oneshot::channel::<Result<u8>>();
        drop(tx);
        let err = AsyncArgon2Result::new(rx).await.expect_err("sender dropped");
        assert!(matches!(err, Argon2Error::Internal(_)));
    }

    #[test]
    fn missing_runtime_is_reported() {
        let ctx = Context::default();
        let pending = ctx.hash_async(b"password".to_vec(), b"somesalt".to_vec());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build");
        let err = runtime.block_on(pending).expect_err("no runtime at spawn time");
        assert!(matches!(err, Argon2Error::Internal(_)));
    }
}
