// ログ初期化 - tracing_subscriber の設定

use tracing_subscriber::EnvFilter;

/// ログレベルを指定する環境変数
pub const LOG_ENV_VAR: &str = "PIPELINE_LOG";

/// `PIPELINE_LOG`、`RUST_LOG`、デフォルト（info）の順でフィルタを決めて初期化する
///
/// 既に初期化済みの場合は何もしない。
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
