// 表形式データの読み込みと汎用集計

use super::numeric::parse_or_zero;
use crate::core::{AnalysisError, AnalysisResult};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// 1行分のレコード（列名 → 文字列値）
pub type Record = HashMap<String, String>;

/// 数値列の最小・最大・平均
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// ヘッダー行付きの区切りテキストから読み込んだ表
///
/// すべての集計は読み取り専用で、グループ集計の結果は順序を持たない `HashMap` で返す。
/// 表示順は呼び出し側で決める。
#[derive(Debug, Clone, Default)]
pub struct TabularData {
    records: Vec<Record>,
}

impl TabularData {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// CSVファイルを読み込む
    pub fn from_path(path: &Path) -> AnalysisResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_reader(file).map_err(|e| AnalysisError::csv(path, e))
    }

    /// 任意のリーダーからCSVを読み込む
    ///
    /// 列数が足りない行は、欠けた列を持たないレコードになる。
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let record: Record = headers
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect();
            records.push(record);
        }

        tracing::debug!(rows = records.len(), columns = headers.len(), "loaded csv");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 列の値（欠落時は空文字列）
    pub fn field<'a>(record: &'a Record, column: &str) -> &'a str {
        record.get(column).map(String::as_str).unwrap_or("")
    }

    /// 列の数値（変換できなければ0）
    pub fn numeric(record: &Record, column: &str) -> f64 {
        parse_or_zero(Self::field(record, column))
    }

    /// 数値列の合計
    pub fn total(&self, column: &str) -> f64 {
        self.records
            .iter()
            .fold(0.0, |acc, record| acc + Self::numeric(record, column))
    }

    /// 数値列の全行平均（行がなければ0）
    pub fn mean(&self, column: &str) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.total(column) / self.records.len() as f64
    }

    /// 任意のキー関数でグループ化して数値列を合計
    pub fn sum_by_key<F>(&self, key: F, value_column: &str) -> HashMap<String, f64>
    where
        F: Fn(&Record) -> String,
    {
        self.records.iter().fold(HashMap::new(), |mut sums, record| {
            *sums.entry(key(record)).or_insert(0.0) += Self::numeric(record, value_column);
            sums
        })
    }

    /// 列の値でグループ化して数値列を合計
    pub fn sum_by(&self, group_column: &str, value_column: &str) -> HashMap<String, f64> {
        self.sum_by_key(
            |record| Self::field(record, group_column).to_string(),
            value_column,
        )
    }

    /// 日付列の先頭7文字（YYYY-MM）でグループ化して合計
    pub fn sum_by_year_month(&self, date_column: &str, value_column: &str) -> HashMap<String, f64> {
        self.sum_by_key(
            |record| Self::field(record, date_column).chars().take(7).collect(),
            value_column,
        )
    }

    /// グループ合計の上位k件（降順、同値はキーの昇順）
    pub fn top_k_by(&self, group_column: &str, value_column: &str, k: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> =
            self.sum_by(group_column, value_column).into_iter().collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// 数値列の最小・最大・平均（行がなければ全て0）
    pub fn column_stats(&self, column: &str) -> ColumnStats {
        let values: Vec<f64> = self
            .records
            .iter()
            .map(|record| Self::numeric(record, column))
            .collect();
        let Some(&first) = values.first() else {
            return ColumnStats::default();
        };

        let (min, max, sum) = values
            .iter()
            .fold((first, first, 0.0), |(min, max, sum), &value| {
                (
                    if value < min { value } else { min },
                    if value > max { value } else { max },
                    sum + value,
                )
            });

        ColumnStats {
            min,
            max,
            average: sum / values.len() as f64,
        }
    }

    /// 数値列が閾値以上の行
    pub fn filter_at_least(&self, column: &str, threshold: f64) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| Self::numeric(record, column) >= threshold)
            .collect()
    }

    /// グループごとの重複しない値一覧（値は昇順）
    pub fn distinct_by(&self, group_column: &str, value_column: &str) -> HashMap<String, Vec<String>> {
        let grouped: HashMap<String, BTreeSet<String>> =
            self.records.iter().fold(HashMap::new(), |mut groups, record| {
                groups
                    .entry(Self::field(record, group_column).to_string())
                    .or_default()
                    .insert(Self::field(record, value_column).to_string());
                groups
            });

        grouped
            .into_iter()
            .map(|(group, values)| (group, values.into_iter().collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,team,score,date
alice,red,10,2024-01-05
bob,blue,7.5,2024-01-20
carol,red,oops,2024-02-01
dave,green,,2024-02-14
erin,blue,2.5,2024-03-09
";

    fn table() -> TabularData {
        TabularData::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_from_reader_builds_records() {
        let table = table();

        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
        assert_eq!(TabularData::field(&table.records()[0], "name"), "alice");
        assert_eq!(TabularData::field(&table.records()[3], "score"), "");
        assert_eq!(TabularData::field(&table.records()[0], "missing"), "");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let table = TabularData::from_reader("a,b,c\n1,2\n".as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(TabularData::numeric(&table.records()[0], "c"), 0.0);
        assert_eq!(TabularData::numeric(&table.records()[0], "b"), 2.0);
    }

    #[test]
    fn test_total_and_mean_with_invalid_values() {
        let table = table();

        assert_eq!(table.total("score"), 20.0);
        assert_eq!(table.mean("score"), 4.0);
        assert_eq!(TabularData::default().mean("score"), 0.0);
    }

    #[test]
    fn test_sum_by_group() {
        let sums = table().sum_by("team", "score");

        assert_eq!(sums.len(), 3);
        assert_eq!(sums["red"], 10.0);
        assert_eq!(sums["blue"], 10.0);
        assert_eq!(sums["green"], 0.0);
    }

    #[test]
    fn test_sum_by_year_month() {
        let months = table().sum_by_year_month("date", "score");

        assert_eq!(months.len(), 3);
        assert_eq!(months["2024-01"], 17.5);
        assert_eq!(months["2024-02"], 0.0);
        assert_eq!(months["2024-03"], 2.5);
    }

    #[test]
    fn test_top_k_ties_sorted_by_key() {
        let top = table().top_k_by("team", "score", 2);

        assert_eq!(
            top,
            vec![("blue".to_string(), 10.0), ("red".to_string(), 10.0)]
        );
        assert_eq!(table().top_k_by("team", "score", 10).len(), 3);
        assert!(table().top_k_by("team", "score", 0).is_empty());
    }

    #[test]
    fn test_column_stats() {
        let stats = table().column_stats("score");

        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.average, 4.0);
        assert_eq!(TabularData::default().column_stats("score"), ColumnStats::default());
    }

    #[test]
    fn test_filter_at_least_is_inclusive() {
        let table = table();
        let rows = table.filter_at_least("score", 7.5);

        let names: Vec<&str> = rows
            .iter()
            .map(|record| TabularData::field(record, "name"))
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_distinct_by() {
        let csv = "region,product\nEast,Mouse\nEast,Laptop\nEast,Mouse\nWest,Desk\n";
        let table = TabularData::from_reader(csv.as_bytes()).unwrap();
        let distinct = table.distinct_by("region", "product");

        assert_eq!(distinct["East"], vec!["Laptop".to_string(), "Mouse".to_string()]);
        assert_eq!(distinct["West"], vec!["Desk".to_string()]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = TabularData::from_path(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(AnalysisError::Io { .. })));
    }
}
