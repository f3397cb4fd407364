// 設定管理の具象実装

use crate::core::{PipelineConfig, PipelineError, PipelineResult};
use crate::engine::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// デフォルト設定実装
///
/// JSONでは待機時間をミリ秒で表す（小数で1ms未満も指定できる）。
/// 省略したフィールドはデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultPipelineConfig {
    capacity: usize,
    #[serde(rename = "producer_delay_ms", with = "millis")]
    producer_delay: Duration,
    #[serde(rename = "consumer_delay_ms", with = "millis")]
    consumer_delay: Duration,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_producer_delay(mut self, delay: Duration) -> Self {
        self.producer_delay = delay;
        self
    }

    pub fn with_consumer_delay(mut self, delay: Duration) -> Self {
        self.consumer_delay = delay;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定の妥当性をチェック
    pub fn validate(&self) -> PipelineResult<()> {
        if self.capacity == 0 {
            return Err(PipelineError::configuration(
                "capacity は1以上である必要があります",
            ));
        }
        Ok(())
    }

    /// JSON文字列から設定を読み込む
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            PipelineError::configuration(format!("設定JSONの解析に失敗しました: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// JSONファイルから設定を読み込む
    pub fn from_json_file(path: &Path) -> PipelineResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::configuration(format!(
                "設定ファイルを読み込めません: {} - {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::internal(e.into()))
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY.get(),
            producer_delay: Duration::ZERO,
            consumer_delay: Duration::ZERO,
            enable_progress: true,
        }
    }
}

/// `Duration` とミリ秒（JSON数値）の相互変換
mod millis {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(delay.as_millis()) {
            Ok(ms) if delay.subsec_nanos() % 1_000_000 == 0 => serializer.serialize_u64(ms),
            _ => serializer.serialize_f64(delay.as_nanos() as f64 / 1_000_000.0),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        let nanos = (ms * 1_000_000.0).round();
        if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
            return Err(D::Error::custom(format!("invalid delay in milliseconds: {ms}")));
        }
        Ok(Duration::from_nanos(nanos as u64))
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn channel_capacity(&self) -> usize {
        self.capacity
    }

    fn producer_delay(&self) -> Duration {
        self.producer_delay
    }

    fn consumer_delay(&self) -> Duration {
        self.consumer_delay
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
