//! 设备指纹与会话标识合成
//!
//! 伪造一个"真实浏览器会话"的设备指纹数值与 access-token 字符串。
//! 两者都不承载真实身份，每次调用重新生成。
//!
//! 时间与随机数通过 [`EntropySource`] 注入，哈希与拼接逻辑保持纯函数，
//! 便于单元测试。

use serde::Deserialize;

use super::hash::hash;

/// 会话标识中参与哈希的固定域名
const FIXED_DOMAIN: &str = "zmvoice.com";

/// 会话标识最大长度
pub const SESSION_ID_MAX_LEN: usize = 32;

/// 时间与随机数来源
///
/// 指纹与会话标识依赖环境随机性，抽象为 trait 以便测试注入固定值。
pub trait EntropySource: Send + Sync {
    /// [0, 2147483647] 闭区间内的随机整数
    fn random_u31(&self) -> u32;

    /// [0, 1) 区间内的随机浮点数
    fn random_unit(&self) -> f64;

    /// 当前 Unix 毫秒时间戳
    fn now_millis(&self) -> u64;
}

/// 模拟浏览器环境的固定常量
///
/// 与真实浏览器的 navigator / screen / document 取值对应，
/// 可通过配置覆盖，默认值模拟 Windows 桌面版 Chrome。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserProfile {
    /// navigator.appName
    pub app_name: String,
    /// navigator.appVersion
    pub app_version: String,
    /// navigator.language
    pub language: String,
    /// navigator.platform
    pub platform: String,
    /// navigator.userAgent
    pub user_agent: String,
    /// screen.width
    pub screen_width: u32,
    /// screen.height
    pub screen_height: u32,
    /// screen.colorDepth
    pub color_depth: u32,
    /// document.referrer
    pub referrer: String,
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self {
            app_name: "Netscape".to_string(),
            app_version: "5.0 (Windows)".to_string(),
            language: "zh-CN".to_string(),
            platform: "Win32".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36"
                .to_string(),
            screen_width: 1920,
            screen_height: 1080,
            color_depth: 24,
            referrer: "https://www.zmvoice.com/".to_string(),
        }
    }
}

impl BrowserProfile {
    /// 拼接指纹描述串（各字段无分隔符直接连接）
    fn descriptor(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}{}{}",
            self.app_name,
            self.app_version,
            self.language,
            self.platform,
            self.user_agent,
            self.screen_width,
            self.screen_height,
            self.color_depth,
            self.referrer,
        )
    }
}

/// 合成设备指纹数值
///
/// 描述串末尾追加一段 `k ^ len` 后缀。上游实现中计数器从 1 起步、
/// 每轮递减，循环恰好执行一次；下游 token 形态依赖这个结果，
/// 保持原行为不做"修正"。
///
/// 最终值为随机数与描述串哈希异或后乘以 2147483647，不做 32 位
/// 截断。每次调用因随机数不同而变化。
pub fn device_fingerprint(profile: &BrowserProfile, entropy: &dyn EntropySource) -> u64 {
    let mut descriptor = profile.descriptor();

    let mut counter: u32 = 1;
    let mut len = descriptor.len();
    while counter != 0 {
        descriptor.push_str(&(counter as usize ^ len).to_string());
        counter -= 1;
        len += 1;
    }

    let mixed = entropy.random_u31() ^ (hash(&descriptor) as u32);
    mixed as u64 * 2_147_483_647
}

/// 生成会话标识（access-token）
///
/// 由固定域名哈希、设备指纹、时间加随机数的盐值拼接而成；只替换
/// 第一个小数点为 `e`（上游行为如此，不是全量替换），再截取前
/// 32 个字符。不保证唯一性，概率上不重复即可。
pub fn session_identifier(profile: &BrowserProfile, entropy: &dyn EntropySource) -> String {
    let salt = entropy.now_millis() as f64 + entropy.random_unit() + entropy.random_unit();
    let raw = format!(
        "{}{}{}",
        hash(FIXED_DOMAIN),
        device_fingerprint(profile, entropy),
        salt,
    );

    raw.replacen('.', "e", 1).chars().take(SESSION_ID_MAX_LEN).collect()
}
