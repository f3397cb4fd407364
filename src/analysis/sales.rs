// 売上データ分析 - 固定スキーマの売上CSVに対する集計

use super::table::{ColumnStats, Record, TabularData};
use crate::core::AnalysisResult;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 売上CSVの列名
pub mod columns {
    pub const DATE: &str = "date";
    pub const PRODUCT: &str = "product";
    pub const CATEGORY: &str = "category";
    pub const REGION: &str = "region";
    pub const QUANTITY: &str = "quantity";
    pub const UNIT_PRICE: &str = "unit_price";
    pub const TOTAL_SALES: &str = "total_sales";
}

/// 売上データ分析
///
/// 読み込み時に全行をメモリに保持し、各集計は同じデータに対して行う。
#[derive(Debug, Clone, Default)]
pub struct SalesAnalysis {
    data: TabularData,
}

impl SalesAnalysis {
    /// CSVファイルから読み込む
    pub fn from_path(path: &Path) -> AnalysisResult<Self> {
        let data = TabularData::from_path(path)?;
        tracing::info!(path = %path.display(), rows = data.len(), "sales data loaded");
        Ok(Self { data })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        Ok(Self {
            data: TabularData::from_reader(reader)?,
        })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            data: TabularData::new(records),
        }
    }

    pub fn data(&self) -> &TabularData {
        &self.data
    }

    pub fn transaction_count(&self) -> usize {
        self.data.len()
    }

    /// 全体の売上合計
    pub fn total_revenue(&self) -> f64 {
        self.data.total(columns::TOTAL_SALES)
    }

    /// カテゴリ別の売上合計
    pub fn revenue_by_category(&self) -> HashMap<String, f64> {
        self.data.sum_by(columns::CATEGORY, columns::TOTAL_SALES)
    }

    /// 地域別の売上合計
    pub fn revenue_by_region(&self) -> HashMap<String, f64> {
        self.data.sum_by(columns::REGION, columns::TOTAL_SALES)
    }

    /// 売上上位n商品（売上の降順）
    pub fn top_products_by_revenue(&self, n: usize) -> Vec<(String, f64)> {
        self.data
            .top_k_by(columns::PRODUCT, columns::TOTAL_SALES, n)
    }

    /// 1取引あたりの平均売上（取引がなければ0）
    pub fn average_transaction_value(&self) -> f64 {
        self.data.mean(columns::TOTAL_SALES)
    }

    /// 月別（YYYY-MM）の売上合計
    pub fn monthly_revenue_trend(&self) -> HashMap<String, f64> {
        self.data
            .sum_by_year_month(columns::DATE, columns::TOTAL_SALES)
    }

    /// 数量の最小・最大・平均
    pub fn quantity_statistics(&self) -> ColumnStats {
        self.data.column_stats(columns::QUANTITY)
    }

    /// 売上が閾値以上の取引
    pub fn filter_high_value_transactions(&self, threshold: f64) -> Vec<&Record> {
        self.data.filter_at_least(columns::TOTAL_SALES, threshold)
    }

    /// 地域ごとの販売商品一覧（重複なし）
    pub fn products_by_region(&self) -> HashMap<String, Vec<String>> {
        self.data.distinct_by(columns::REGION, columns::PRODUCT)
    }
}
