//! CSVパーサー
//!
//! スプレッドシートのCSVエクスポートを、ヘッダー名で引けるテーブルに変換する。
//! 壊れた行（フィールド不足・閉じていない引用符）でも失敗せず、
//! 欠けたフィールドは空文字列として扱う。

use crate::error::{Error, Result};

/// ヘッダー行 + データ行
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// CSV文字列をパース
    ///
    /// # Returns
    /// * `Ok(CsvTable)` - パース成功（データ行0件も成功）
    /// * `Err` - ヘッダー行が無い場合
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.trim_start_matches('\u{feff}');
        let mut lines = content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let header_line = lines
            .next()
            .ok_or_else(|| Error::Parse("ヘッダー行がありません".into()))?;
        let headers = parse_csv_line(header_line);

        let rows: Vec<Vec<String>> = lines.map(parse_csv_line).collect();
        log::debug!("CSV: {}列 x {}行", headers.len(), rows.len());

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// データ行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 読み込み順にレコードを返す
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            headers: &self.headers,
            values,
        })
    }
}

/// ヘッダー名でフィールドを引ける1行分のビュー
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    /// ヘッダー名（大文字小文字無視）でフィールドを取得
    ///
    /// ヘッダーが無い、または行のフィールドが足りない場合は `None`。
    pub fn get(&self, header: &str) -> Option<&'a str> {
        let index = self
            .headers
            .iter()
            .position(|h| h.to_lowercase() == header.to_lowercase())?;
        Some(self.values.get(index).map(String::as_str).unwrap_or(""))
    }

    /// 候補ヘッダーを順に試し、最初に見つかった空でない値を返す
    pub fn get_any(&self, variants: &[&str]) -> &'a str {
        variants
            .iter()
            .filter_map(|variant| self.get(variant))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// 候補ヘッダーのいずれかが存在し、かつ値が入っているか
    pub fn has_any(&self, variants: &[&str]) -> bool {
        !self.get_any(variants).is_empty()
    }
}

/// CSV行をパース（ダブルクォート対応）
///
/// - 引用符内のカンマは区切りとみなさない
/// - `""` は引用符1つに戻す
/// - 閉じていない引用符は行末までを1フィールドとして扱う
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }

    // 最後のフィールド
    fields.push(field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_csv_line("Amy-2,krzesla,true"), vec!["Amy-2", "krzesla", "true"]);
    }

    #[test]
    fn test_parse_quoted_comma() {
        let fields = parse_csv_line(r#""Amy-2","krzesło, biurowe","true""#);
        assert_eq!(fields, vec!["Amy-2", "krzesło, biurowe", "true"]);
    }

    #[test]
    fn test_parse_escaped_quote() {
        let fields = parse_csv_line(r#""Fotel ""Lux""",chair"#);
        assert_eq!(fields, vec![r#"Fotel "Lux""#, "chair"]);
    }

    #[test]
    fn test_parse_empty_fields_kept() {
        let fields = parse_csv_line("Amy-2,,true,");
        assert_eq!(fields, vec!["Amy-2", "", "true", ""]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let fields = parse_csv_line(r#"Amy-2,"krzesla,true"#);
        assert_eq!(fields, vec!["Amy-2", "krzesla,true"]);
    }

    #[test]
    fn test_table_headers_unquoted() {
        let table = CsvTable::parse("\"Nazwa\",\"Kategoria\"\nAmy-2,krzesla\n").unwrap();
        assert_eq!(table.headers(), &["Nazwa".to_string(), "Kategoria".to_string()]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_skips_blank_lines_and_crlf() {
        let table = CsvTable::parse("Nazwa,Kategoria\r\n\r\nAmy-2,krzesla\r\n\nAva,hooker\r\n").unwrap();
        assert_eq!(table.len(), 2);
        let categories: Vec<_> = table.records().map(|r| r.get("Kategoria").unwrap()).collect();
        assert_eq!(categories, vec!["krzesla", "hooker"]);
    }

    #[test]
    fn test_table_empty_is_error() {
        assert!(matches!(CsvTable::parse(""), Err(Error::Parse(_))));
        assert!(matches!(CsvTable::parse("\n  \n"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_record_short_row_resolves_to_empty() {
        let table = CsvTable::parse("Nazwa,Kategoria,Visible\nAmy-2\n").unwrap();
        let record = table.records().next().unwrap();
        assert_eq!(record.get("Nazwa"), Some("Amy-2"));
        assert_eq!(record.get("Visible"), Some(""));
        assert_eq!(record.get("Obrazek"), None);
    }

    #[test]
    fn test_record_header_case_insensitive() {
        let table = CsvTable::parse("NAZWA,kategoria\nAmy-2,krzesla\n").unwrap();
        let record = table.records().next().unwrap();
        assert_eq!(record.get("Nazwa"), Some("Amy-2"));
        assert_eq!(record.get("KATEGORIA"), Some("krzesla"));
    }

    #[test]
    fn test_record_get_any_first_non_empty_wins() {
        let table = CsvTable::parse("Grupa,Group\n,office chair\nkubełek,chair\n").unwrap();
        let records: Vec<_> = table.records().collect();
        assert_eq!(records[0].get_any(&["Grupa", "Group"]), "office chair");
        assert_eq!(records[1].get_any(&["Grupa", "Group"]), "kubełek");
        assert_eq!(records[1].get_any(&["Typ", "Type"]), "");
        assert!(!records[1].has_any(&["Typ", "Type"]));
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = CsvTable::parse("\u{feff}Nazwa\nAmy-2\n").unwrap();
        let record = table.records().next().unwrap();
        assert_eq!(record.get("Nazwa"), Some("Amy-2"));
    }
}
