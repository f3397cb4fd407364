// 数値変換 - 解析できない値は0として扱う

/// 文字列を数値に変換し、失敗した場合は0を返す
///
/// 空文字列や列の欠落、数値でない文字列はすべて0になる。集計を止めないための
/// 寛容な変換で、厳密な検証が必要な場合は呼び出し側で事前に行う。
pub fn parse_or_zero(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed.parse::<f64>() {
        Ok(number) => number,
        Err(_) => {
            // 桁区切りのアンダースコア（例: 1_000）は許容する
            if trimmed.contains('_') && !trimmed.starts_with('_') && !trimmed.ends_with('_') {
                trimmed.replace('_', "").parse().unwrap_or(0.0)
            } else {
                0.0
            }
        }
    }
}
