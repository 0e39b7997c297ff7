//! 合成服务 - 分段拉取与流式聚合
//!
//! 把一段长文本变成按原始顺序排列的音频字节流：
//! 1. 文本分割为片段（domain::segmenter）
//! 2. 每个片段独立发起一次带伪造头部的上游请求
//! 3. 生产者任务把完成的缓冲推入有界通道，消费端以 Stream 形式消费
//!
//! 两种执行模式在入口一次性选定：
//! - 串行模式：逐片段处理，响应体的每个网络分块到达即发出
//! - 批量并发模式：按并发度分批，整批完成（屏障）后按片段原始
//!   下标升序发出成品缓冲，再调度下一批
//!
//! 单个片段失败（非 2xx、网络错误、超时）只丢弃该片段并记录日志，
//! 不中断兄弟片段，也不终止整个流。没有任何重试。

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::error::SynthesisError;
use super::ports::TtsUpstreamPort;
use crate::domain::segmenter;

/// 默认并发度
pub const DEFAULT_CONCURRENCY: usize = 3;

/// 生产者通道容量（有界，自然形成背压）
const CHUNK_CHANNEL_CAPACITY: usize = 8;

/// 合成服务配置
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// 最大片段字符数
    pub max_segment_chars: usize,
    /// 默认并发度
    pub concurrency: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_segment_chars: segmenter::DEFAULT_MAX_SEGMENT_CHARS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// 合成服务
pub struct SynthesisService {
    upstream: Arc<dyn TtsUpstreamPort>,
    config: SynthesisConfig,
}

impl SynthesisService {
    pub fn new(upstream: Arc<dyn TtsUpstreamPort>, config: SynthesisConfig) -> Self {
        Self { upstream, config }
    }

    /// 合成入口：文本 + 音色 -> 惰性音频字节流
    ///
    /// 空文本是调用方可见的错误；流一旦开始生产，片段级失败只会
    /// 让输出变短，不会再抛错。
    pub fn synthesize(
        &self,
        text: &str,
        voice: &str,
        concurrency: Option<usize>,
    ) -> Result<ReceiverStream<Bytes>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let segments = segmenter::split(text, self.config.max_segment_chars);
        let concurrency = concurrency.unwrap_or(self.config.concurrency);
        Ok(self.fetch_chunks(segments, voice.to_string(), concurrency))
    }

    /// 对已分割的片段序列发起拉取，返回按原始顺序的字节流
    ///
    /// 流是有限且不可重启的；消费端提前丢弃流会令生产者在下一次
    /// 发送时退出，不再调度后续批次（协作式取消）。
    pub fn fetch_chunks(
        &self,
        segments: Vec<String>,
        voice: String,
        concurrency: usize,
    ) -> ReceiverStream<Bytes> {
        let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);
        let upstream = self.upstream.clone();

        tokio::spawn(async move {
            let total = segments.len();
            tracing::debug!(total, concurrency, voice = %voice, "Chunk fetch started");

            if concurrency <= 1 || total <= 2 {
                serial_fetch(upstream, segments, &voice, tx).await;
            } else {
                batched_fetch(upstream, segments, &voice, concurrency, tx).await;
            }
        });

        ReceiverStream::new(rx)
    }
}

/// 串行模式：逐片段拉取，网络分块到达即转发
///
/// 片段失败时已发出的部分数据不回收，直接继续下一片段。
async fn serial_fetch(
    upstream: Arc<dyn TtsUpstreamPort>,
    segments: Vec<String>,
    voice: &str,
    tx: mpsc::Sender<Bytes>,
) {
    for (index, segment) in segments.iter().enumerate() {
        let mut stream = match upstream.fetch_audio(segment, voice).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(index, error = %e, "Segment fetch failed, skipping");
                continue;
            }
        };

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    if tx.send(bytes).await.is_err() {
                        tracing::debug!(index, "Consumer dropped, stopping");
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Segment stream broke, skipping rest");
                    break;
                }
            }
        }
    }
}

/// 批量并发模式：分批发起、整批屏障、按下标升序发出
///
/// 每批内一个片段一个任务，各自把响应完整汇入一个缓冲；等待
/// 全批结束后才发出，真实完成顺序不影响输出顺序。
async fn batched_fetch(
    upstream: Arc<dyn TtsUpstreamPort>,
    segments: Vec<String>,
    voice: &str,
    concurrency: usize,
    tx: mpsc::Sender<Bytes>,
) {
    let indexed: Vec<(usize, String)> = segments.into_iter().enumerate().collect();

    for batch in indexed.chunks(concurrency) {
        let mut tasks = Vec::with_capacity(batch.len());
        for (index, segment) in batch {
            let upstream = upstream.clone();
            let voice = voice.to_string();
            let index = *index;
            let segment = segment.clone();
            tasks.push(tokio::spawn(async move {
                (index, drain_segment(upstream, index, &segment, &voice).await)
            }));
        }

        // 屏障：整批完成后才进入发送阶段
        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!(error = %e, "Segment task panicked"),
            }
        }

        // tasks 按下标升序创建，results 保持同序；失败片段静默跳过
        for (index, buffer) in results {
            if let Some(buffer) = buffer {
                if tx.send(buffer).await.is_err() {
                    tracing::debug!(index, "Consumer dropped, stopping");
                    return;
                }
            }
        }
    }
}

/// 把单个片段的响应完整汇入一个缓冲
///
/// 任何失败（发起失败或中途断流）都让该片段整体落空。
async fn drain_segment(
    upstream: Arc<dyn TtsUpstreamPort>,
    index: usize,
    segment: &str,
    voice: &str,
) -> Option<Bytes> {
    let mut stream = match upstream.fetch_audio(segment, voice).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(index, error = %e, "Segment fetch failed, skipping");
            return None;
        }
    };

    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => buffer.extend_from_slice(&bytes),
            Err(e) => {
                tracing::warn!(index, error = %e, "Segment stream broke, skipping");
                return None;
            }
        }
    }

    tracing::debug!(index, size = buffer.len(), "Segment assembled");
    Some(buffer.freeze())
}
