// 集計レイヤー - 表形式データ（CSV）の逐次集計とレポート生成
// パイプラインとは独立したバッチ処理

pub mod numeric;
pub mod report;
pub mod sales;
pub mod table;

// 公開API
pub use numeric::parse_or_zero;
pub use report::{format_currency, render_report, ReportOptions, SalesReport};
pub use sales::SalesAnalysis;
pub use table::{ColumnStats, Record, TabularData};
