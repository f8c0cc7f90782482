//! カタログ列の定義
//!
//! スプレッドシートは英語・ポーランド語どちらの列名でも書かれうるため、
//! 各列に複数のヘッダー名候補を持たせる。先頭の候補ほど優先。

use crate::parser::Record;

/// カタログで意味を持つ列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Category,
    Group,
    Type,
    Image,
    Visible,
}

impl Column {
    /// ヘッダー名の候補
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            Column::Name => &["Nazwa", "Name"],
            Column::Category => &["Kategoria", "Category"],
            Column::Group => &["Grupa", "Group"],
            Column::Type => &["Typ", "Type"],
            Column::Image => &["Obrazek", "Image"],
            Column::Visible => &["Visible", "Widoczny"],
        }
    }

    /// レコードから値を取得（無ければ空文字列）
    pub fn read<'a>(&self, record: &Record<'a>) -> &'a str {
        record.get_any(self.variants())
    }
}
