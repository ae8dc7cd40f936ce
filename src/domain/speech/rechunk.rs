//! Rechunk Stream - 将任意大小的字节片段重新切分为固定大小的音频块
//!
//! 规则:
//! - 每收到一个片段就追加到累加缓冲区
//! - 缓冲区长度 >= chunk_size 时，切出前 chunk_size 字节作为一个块
//! - 上游结束后，若缓冲区非空，作为最后一个（可能较短的）块输出
//! - 上游出错时输出该错误并结束，缓冲区中的剩余字节丢弃
//!
//! 只在消费者拉取且缓冲区不足一个块时才轮询上游，不会提前读取。

use bytes::{Bytes, BytesMut};
use futures_util::stream::{FusedStream, Stream};
use futures_util::ready;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::ChunkSize;

/// 固定块大小的重分块流
pub struct RechunkStream<S> {
    inner: S,
    chunk_size: usize,
    buffer: BytesMut,
    /// 上游已结束（正常或出错）
    finished: bool,
    chunks_emitted: u64,
    bytes_emitted: u64,
}

impl<S> RechunkStream<S> {
    pub fn new(inner: S, chunk_size: ChunkSize) -> Self {
        Self {
            inner,
            chunk_size: chunk_size.get(),
            buffer: BytesMut::with_capacity(chunk_size.get()),
            finished: false,
            chunks_emitted: 0,
            bytes_emitted: 0,
        }
    }

    /// 已输出的块数
    pub fn chunks_emitted(&self) -> u64 {
        self.chunks_emitted
    }

    /// 已输出的总字节数
    pub fn bytes_emitted(&self) -> u64 {
        self.bytes_emitted
    }

    /// 当前缓冲但尚未输出的字节数
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn take(&mut self, chunk: Bytes) -> Bytes {
        self.chunks_emitted += 1;
        self.bytes_emitted += chunk.len() as u64;
        chunk
    }
}

impl<S, E> Stream for RechunkStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.buffer.len() >= this.chunk_size {
                let chunk = this.buffer.split_to(this.chunk_size).freeze();
                return Poll::Ready(Some(Ok(this.take(chunk))));
            }

            if this.finished {
                return Poll::Ready(None);
            }

            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(Ok(fragment)) => {
                    this.buffer.extend_from_slice(&fragment);
                }
                Some(Err(e)) => {
                    this.finished = true;
                    tracing::debug!(
                        discarded = this.buffer.len(),
                        chunks = this.chunks_emitted,
                        "Upstream audio stream failed"
                    );
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(e)));
                }
                None => {
                    this.finished = true;
                    let remainder = this.buffer.split().freeze();
                    let final_chunks = this.chunks_emitted + u64::from(!remainder.is_empty());
                    tracing::debug!(
                        chunks = final_chunks,
                        bytes = this.bytes_emitted + remainder.len() as u64,
                        "Audio stream converted"
                    );
                    if remainder.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(this.take(remainder))));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let ready_chunks = self.buffer.len() / self.chunk_size;
        if self.finished {
            let tail = usize::from(self.buffer.len() % self.chunk_size != 0);
            (ready_chunks + tail, Some(ready_chunks + tail))
        } else {
            (ready_chunks, None)
        }
    }
}

impl<S, E> FusedStream for RechunkStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.finished && self.buffer.is_empty()
    }
}
