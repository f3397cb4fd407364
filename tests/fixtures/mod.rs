// テストユーティリティ - 統合テスト共通のデータとヘルパー
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 5行の売上サンプル（合計 3975、平均 795、数量 1..5 平均 2.6）
pub const SAMPLE_SALES_CSV: &str = "\
date,product,category,region,quantity,unit_price,total_sales
2024-01-15,Laptop,Electronics,North,2,1000,2000
2024-01-20,Mouse,Electronics,South,5,25,125
2024-02-10,Desk,Furniture,East,3,150,450
2024-02-15,Chair,Furniture,West,1,1000,1000
2024-03-05,Monitor,Electronics,North,2,200,400
";

/// 一時ディレクトリにCSVを書き出す（TempDirはファイルの生存期間を保持する）
pub fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sales.csv");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

pub fn write_sample_sales() -> (TempDir, PathBuf) {
    write_csv(SAMPLE_SALES_CSV)
}

/// 日付・数量を変えながら n 行の売上データを生成
pub fn generated_sales_csv(rows: usize) -> String {
    let categories = ["Electronics", "Furniture", "Office"];
    let regions = ["North", "South", "East", "West"];
    let mut csv = String::from("date,product,category,region,quantity,unit_price,total_sales\n");
    for i in 0..rows {
        let quantity = i % 7 + 1;
        let unit_price = 10 * (i % 13 + 1);
        csv.push_str(&format!(
            "2024-{:02}-{:02},Product{},{},{},{},{},{}\n",
            i % 12 + 1,
            i % 28 + 1,
            i % 9,
            categories[i % categories.len()],
            regions[i % regions.len()],
            quantity,
            unit_price,
            quantity * unit_price,
        ));
    }
    csv
}
