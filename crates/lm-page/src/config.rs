//! Page Configuration
//!
//! Copy strings, class names and timings used by the behaviors. Defaults
//! reproduce the production landing page; a JSON file can override any
//! subset of fields.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hero heading shown for `ab_h1=B`
    pub hero_heading_b: String,

    /// Secondary CTA label for `ab_secondary=whitepaper`
    pub whitepaper_label: String,

    /// Secondary CTA label for `ab_secondary=demo`
    pub demo_label: String,

    /// Price text shown for `ab_pricing=hidden`
    pub pricing_hidden_label: String,

    /// Inline error under the contact field
    pub contact_error: String,

    /// Toast shown after a successful submission
    pub toast_message: String,

    /// How long the toast stays visible (milliseconds)
    pub toast_duration_ms: u64,

    /// Body class that suppresses page scrolling
    pub scroll_lock_class: String,

    /// Class that hides a region
    pub hidden_class: String,
}

impl Config {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hero_heading_b: "联脉｜首批可联对象，T+24 必达".to_string(),
            whitepaper_label: "下载白皮书".to_string(),
            demo_label: "预约 Demo".to_string(),
            pricing_hidden_label: "联系我们获取报价".to_string(),
            contact_error: "请输入有效的邮箱、电话或微信号。".to_string(),
            toast_message: "提交成功！我们将在 24 小时内联系你。".to_string(),
            toast_duration_ms: 4000,
            scroll_lock_class: "no-scroll".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config: Config =
            serde_json::from_str(r#"{"toast_duration_ms": 1500, "demo_label": "Book a demo"}"#).unwrap();
        assert_eq!(config.toast_duration(), Duration::from_millis(1500));
        assert_eq!(config.demo_label, "Book a demo");
        assert_eq!(config.whitepaper_label, Config::default().whitepaper_label);
    }

    #[test]
    fn test_default_toast_is_four_seconds() {
        assert_eq!(Config::default().toast_duration(), Duration::from_secs(4));
    }
}
