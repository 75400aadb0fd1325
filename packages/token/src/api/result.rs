//! Async result handling for token operations

use crate::error::{TokenError, TokenResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Future resolving to the result of a background token operation
pub struct AsyncTokenResult<T> {
    receiver: oneshot::Receiver<TokenResult<T>>,
}

impl<T> AsyncTokenResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<TokenResult<T>>) -> Self {
        Self { receiver }
    }

    /// Already-completed result
    #[must_use]
    pub fn ready(result: TokenResult<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self::new(rx)
    }
}

impl<T> Future for AsyncTokenResult<T> {
    type Output = TokenResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TokenError::internal("token task dropped"))),
            Poll::Pending => Poll::Pending,
        }
    }
}
