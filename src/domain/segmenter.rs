//! 文本分割器
//!
//! 将长文本切分为长度受限的片段，每个片段对应一次独立的上游合成请求。
//!
//! 分割策略（两级）：
//! 1. 按句末标点（。？！.?! 或换行）分割，标点保留在句尾
//! 2. 超长句子再按逗号（, 或 ，）分割，并贪心合并相邻短部分
//!
//! 纯同步函数，无并发、无 IO。

/// 默认最大片段字符数
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 200;

/// 检查是否为句末分隔符（换行也视为句末）
#[inline]
fn is_sentence_delimiter(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！' | '.' | '?' | '!' | '\n')
}

/// 检查是否为逗号分隔符
#[inline]
fn is_comma_delimiter(ch: char) -> bool {
    matches!(ch, ',' | '，')
}

/// 将文本分割为字符数不超过 `max_len` 的片段
///
/// 规则：
/// - 文本整体不超过 `max_len` 时原样返回单元素序列，不做任何过滤
/// - 第一级按句末标点分割，标点附着在前一句末尾
/// - 超过 `max_len` 的句子第二级按逗号分割，相邻部分贪心合并，
///   合并后不超过 `max_len`
/// - 无逗号可分的超长原子单元原样输出（不截断、不报错）
/// - 最终过滤掉去除空白后为空的片段
///
/// 输出顺序与输入文本顺序严格一致。
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut segments: Vec<String> = Vec::new();

    for sentence in split_sentences(text) {
        if sentence.chars().count() <= max_len {
            segments.push(sentence);
        } else {
            segments.extend(split_by_commas(&sentence, max_len));
        }
    }

    segments
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// 第一级：按句末标点分割，标点保留在句尾
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if is_sentence_delimiter(ch) {
            sentences.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// 第二级：按逗号分割并贪心合并
///
/// 逗号附着在部分末尾。把连续部分累积进缓冲区，加入下一部分会
/// 超出 `max_len` 时先输出缓冲区再重新开始。无逗号的超长部分
/// 会单独成段。
fn split_by_commas(sentence: &str, max_len: usize) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in sentence.chars() {
        current.push(ch);
        if is_comma_delimiter(ch) {
            parts.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    let mut segments: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for part in parts {
        let part_chars = part.chars().count();
        if buffer_chars + part_chars <= max_len {
            buffer.push_str(&part);
            buffer_chars += part_chars;
        } else {
            if !buffer.is_empty() {
                segments.push(std::mem::take(&mut buffer));
            }
            buffer = part;
            buffer_chars = part_chars;
        }
    }

    if !buffer.is_empty() {
        segments.push(buffer);
    }

    segments
}
