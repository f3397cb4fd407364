// レポート生成 - 集計結果の表示順の決定と整形

use super::sales::SalesAnalysis;
use super::table::ColumnStats;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// レポートの表示オプション
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub high_value_threshold: f64,
    pub months_shown: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            high_value_threshold: 5000.0,
            months_shown: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub revenue: f64,
}

/// 全集計結果をまとめたレポート（JSON出力用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub transactions: usize,
    pub total_revenue: f64,
    pub revenue_by_category: Vec<RankedEntry>,
    pub revenue_by_region: Vec<RankedEntry>,
    pub top_products: Vec<RankedEntry>,
    pub average_transaction_value: f64,
    pub monthly_revenue: BTreeMap<String, f64>,
    pub quantity_statistics: ColumnStats,
    pub high_value_threshold: f64,
    pub high_value_transactions: usize,
    pub unique_products_by_region: BTreeMap<String, usize>,
}

fn ranked(entries: impl IntoIterator<Item = (String, f64)>) -> Vec<RankedEntry> {
    let mut entries: Vec<(String, f64)> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
        .into_iter()
        .map(|(name, revenue)| RankedEntry { name, revenue })
        .collect()
}

impl SalesReport {
    pub fn build(analysis: &SalesAnalysis, options: &ReportOptions) -> Self {
        Self {
            transactions: analysis.transaction_count(),
            total_revenue: analysis.total_revenue(),
            revenue_by_category: ranked(analysis.revenue_by_category()),
            revenue_by_region: ranked(analysis.revenue_by_region()),
            top_products: ranked(analysis.top_products_by_revenue(options.top_n)),
            average_transaction_value: analysis.average_transaction_value(),
            monthly_revenue: analysis.monthly_revenue_trend().into_iter().collect(),
            quantity_statistics: analysis.quantity_statistics(),
            high_value_threshold: options.high_value_threshold,
            high_value_transactions: analysis
                .filter_high_value_transactions(options.high_value_threshold)
                .len(),
            unique_products_by_region: analysis
                .products_by_region()
                .into_iter()
                .map(|(region, products)| (region, products.len()))
                .collect(),
        }
    }
}

/// 金額を `$1,234.50` 形式に整形
///
/// 負の値は `$-1,234.50` になる。
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let formatted = format!("{:.2}", amount.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("${sign}{grouped}.{fraction}")
}

/// 閾値の表示（整数なら小数部を省いて `$5,000`）
fn format_threshold(amount: f64) -> String {
    let formatted = format_currency(amount);
    if amount.fract() == 0.0 {
        if let Some(whole) = formatted.strip_suffix(".00") {
            return whole.to_string();
        }
    }
    formatted
}

/// 9セクションのテキストレポートを生成
pub fn render_report(analysis: &SalesAnalysis, options: &ReportOptions) -> String {
    render_sales_report(&SalesReport::build(analysis, options), options)
}

pub fn render_sales_report(report: &SalesReport, options: &ReportOptions) -> String {
    let mut out = String::new();
    // Stringへの書き込みは失敗しない
    let _ = write_report(&mut out, report, options);
    out
}

fn write_report(out: &mut String, report: &SalesReport, options: &ReportOptions) -> std::fmt::Result {
    writeln!(out, "=== Sales Data Analysis ===")?;
    writeln!(out)?;

    writeln!(
        out,
        "1. Total Revenue: {}",
        format_currency(report.total_revenue)
    )?;
    writeln!(out)?;

    writeln!(out, "2. Revenue by Category:")?;
    for entry in &report.revenue_by_category {
        writeln!(out, "   {}: {}", entry.name, format_currency(entry.revenue))?;
    }
    writeln!(out)?;

    writeln!(out, "3. Revenue by Region:")?;
    for entry in &report.revenue_by_region {
        writeln!(out, "   {}: {}", entry.name, format_currency(entry.revenue))?;
    }
    writeln!(out)?;

    writeln!(out, "4. Top {} Products by Revenue:", options.top_n)?;
    for (rank, entry) in report.top_products.iter().enumerate() {
        writeln!(
            out,
            "   {}. {}: {}",
            rank + 1,
            entry.name,
            format_currency(entry.revenue)
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "5. Average Transaction Value: {}",
        format_currency(report.average_transaction_value)
    )?;
    writeln!(out)?;

    writeln!(out, "6. Monthly Revenue Trend:")?;
    for (month, revenue) in report.monthly_revenue.iter().take(options.months_shown) {
        writeln!(out, "   {month}: {}", format_currency(*revenue))?;
    }
    if report.monthly_revenue.len() > options.months_shown {
        writeln!(
            out,
            "   ... ({} more months)",
            report.monthly_revenue.len() - options.months_shown
        )?;
    }
    writeln!(out)?;

    let quantity = &report.quantity_statistics;
    writeln!(out, "7. Quantity Statistics:")?;
    writeln!(out, "   Minimum: {:.0}", quantity.min)?;
    writeln!(out, "   Maximum: {:.0}", quantity.max)?;
    writeln!(out, "   Average: {:.2}", quantity.average)?;
    writeln!(out)?;

    writeln!(
        out,
        "8. High Value Transactions (>= {}): {} transactions",
        format_threshold(report.high_value_threshold),
        report.high_value_transactions
    )?;
    writeln!(out)?;

    writeln!(out, "9. Products by Region:")?;
    for (region, count) in &report.unique_products_by_region {
        writeln!(out, "   {region}: {count} unique products")?;
    }
    writeln!(out)?;

    Ok(())
}
