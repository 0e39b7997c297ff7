//! 整数哈希引擎
//!
//! 对任意字符串计算 32 位有符号哈希值，与上游网页端 JS 实现保持
//! 逐位一致。上游在 32 位整型环境下运算，这里必须按同样的截断语义
//! 复现，否则较长输入的哈希值会发散。

/// 累加移位后的低 28 位掩码
const MASK_LOW28: i64 = 0x0FFF_FFFF;

/// 折叠掩码（第 21~27 位）
const MASK_FOLD: i32 = 0x0FE0_0000;

/// 计算字符串的 32 位有符号哈希
///
/// 算法：从最后一个 UTF-16 码元向前扫描，对每个码元 `c`：
/// 1. `a = truncate32(((a << 6) & MASK_LOW28) + c + (c << 14))`
/// 2. `folded = a & MASK_FOLD`，若非零则 `a ^= folded >>> 21`
///
/// 纯函数，相同输入恒产生相同输出；空串返回 0。
///
/// 按 UTF-16 码元而非 Unicode 标量扫描，与网页端 `charCodeAt`
/// 的行为一致（代理对会被拆成两个码元分别参与运算）。
pub fn hash(input: &str) -> i32 {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut acc: i32 = 0;

    for &unit in units.iter().rev() {
        let code = unit as i64;
        let shifted = ((acc as i64) << 6) & MASK_LOW28;
        acc = (shifted + code + (code << 14)) as i32;

        let folded = acc & MASK_FOLD;
        if folded != 0 {
            acc ^= ((folded as u32) >> 21) as i32;
        }
    }

    acc
}
