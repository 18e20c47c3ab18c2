//! データセット読み込みモジュール
//!
//! ヘッダー行付きの区切りテキストを読み込み、列名の表記ゆれを吸収して
//! [`Record`] に正規化する。
//!
//! ## 列名の候補（優先順）
//! - trait: `trait`, `trait_name`, `traitName`, `Trait`, `TraitName`
//! - theme: `theme`, `theme_name`, `themeName`, `Theme`
//! - date: `date`, `Date`, `year`, `Year`
//! - image_url: `image_url`, `image`, `Image`, `imageUrl`
//! - title: `title`, `Title`

use crate::error::Result;
use crate::types::Record;
use csv::{ReaderBuilder, StringRecord};

/// Webビューアが読み込む固定パス
pub const DEFAULT_DATA_PATH: &str = "/trait_theme_timeline.csv";

pub const TRAIT_KEYS: &[&str] = &["trait", "trait_name", "traitName", "Trait", "TraitName"];
pub const THEME_KEYS: &[&str] = &["theme", "theme_name", "themeName", "Theme"];
pub const DATE_KEYS: &[&str] = &["date", "Date", "year", "Year"];
pub const IMAGE_URL_KEYS: &[&str] = &["image_url", "image", "Image", "imageUrl"];
pub const TITLE_KEYS: &[&str] = &["title", "Title"];

/// 区切り文字の候補
const DELIMITER_CANDIDATES: &[u8] = b",\t|;";

/// フィールドごとの候補列インデックス（優先順）
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    trait_name: Vec<usize>,
    theme: Vec<usize>,
    date: Vec<usize>,
    image_url: Vec<usize>,
    title: Vec<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        Self {
            trait_name: resolve_columns(headers, TRAIT_KEYS),
            theme: resolve_columns(headers, THEME_KEYS),
            date: resolve_columns(headers, DATE_KEYS),
            image_url: resolve_columns(headers, IMAGE_URL_KEYS),
            title: resolve_columns(headers, TITLE_KEYS),
        }
    }

    fn to_record(&self, row: &StringRecord) -> Record {
        Record {
            trait_name: first_non_empty(row, &self.trait_name),
            theme: first_non_empty(row, &self.theme),
            date: first_non_empty(row, &self.date),
            image_url: first_non_empty(row, &self.image_url),
            title: first_non_empty(row, &self.title),
        }
    }
}

/// 候補キーの順に一致する列を集める
fn resolve_columns(headers: &StringRecord, keys: &[&str]) -> Vec<usize> {
    keys.iter()
        .filter_map(|key| headers.iter().position(|h| h == *key))
        .collect()
}

/// 最初に空でない値を採用（値はトリムしない）
fn first_non_empty(row: &StringRecord, columns: &[usize]) -> String {
    columns
        .iter()
        .filter_map(|&i| row.get(i))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// ヘッダー行から区切り文字を推定
///
/// 候補 `,` `\t` `|` `;` のうち最も多く現れるものを採用する。
/// 同数または見つからない場合は `,`。
pub fn guess_delimiter(content: &str) -> u8 {
    let Some(header_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let mut best = b',';
    let mut best_count = 0;
    for &candidate in DELIMITER_CANDIDATES {
        let count = header_line.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// 区切りテキストを読み込んでレコード列を返す
///
/// 空行はスキップし、未知の列は無視する。列数が揃わない行も受け付ける。
///
/// # Errors
/// 不正なUTF-8などでCSVリーダーが失敗した場合。部分的な結果は返さない。
///
/// # Examples
/// ```
/// use timeline_common::parse_records;
///
/// let records = parse_records("Trait,theme,year\nCourage,War,1944\n").unwrap();
/// assert_eq!(records[0].trait_name, "Courage");
/// assert_eq!(records[0].date, "1944");
/// ```
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let delimiter = guess_delimiter(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() == 1 && row.get(0).is_some_and(str::is_empty) {
            continue;
        }
        records.push(columns.to_record(&row));
    }

    tracing::debug!(
        rows = records.len(),
        delimiter = %(delimiter as char).escape_default(),
        "dataset parsed"
    );
    Ok(records)
}

/// 読み込み結果を「レコードなし」に縮退させる
///
/// 失敗はログに残し、空のレコード列として扱う。
/// ファイルがない場合と空の場合は区別しない。
pub fn load_or_empty<E: std::fmt::Display>(result: std::result::Result<Vec<Record>, E>) -> Vec<Record> {
    match result {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(error = %err, "CSV parse error");
            Vec::new()
        }
    }
}

/// ファイルから読み込み
pub fn load_file(path: &std::path::Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    parse_records(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file_reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"trait\ttheme\tdate\nA\tX\t2020\n").unwrap();

        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].theme, "X");
    }

    #[test]
    fn test_load_file_missing_is_io_error() {
        let err = load_file(std::path::Path::new("/no/such/timeline.csv")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_parse_canonical_headers() {
        let csv = "trait,theme,date,image_url,title\n\
                   Courage,War,2020-01-02,http://x/a.png,First\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trait_name, "Courage");
        assert_eq!(records[0].theme, "War");
        assert_eq!(records[0].date, "2020-01-02");
        assert_eq!(records[0].image_url, "http://x/a.png");
        assert_eq!(records[0].title, "First");
    }

    #[test]
    fn test_parse_synonym_headers() {
        let csv = "TraitName,themeName,Year,imageUrl,Title\nHonesty,Family,1999,img.jpg,T\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].trait_name, "Honesty");
        assert_eq!(records[0].theme, "Family");
        assert_eq!(records[0].date, "1999");
        assert_eq!(records[0].image_url, "img.jpg");
        assert_eq!(records[0].title, "T");
    }

    #[test]
    fn test_synonym_priority_first_non_empty_wins() {
        // trait が空なら trait_name を採用、両方あれば trait を優先
        let csv = "Trait,trait,trait_name\nC,,B\nC,A,B\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].trait_name, "B");
        assert_eq!(records[1].trait_name, "A");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let csv = "title,unrelated\nOnly title,zzz\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Only title");
        assert_eq!(records[0].trait_name, "");
        assert_eq!(records[0].theme, "");
        assert_eq!(records[0].date, "");
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn test_short_rows_default_to_empty() {
        let csv = "trait,theme,date,image_url,title\nA,X\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].theme, "X");
        assert_eq!(records[0].title, "");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "trait,theme\n\nA,X\n\n\nB,Y\n\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].trait_name, "B");
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let csv = "trait,theme\n A ,X\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].trait_name, " A ");
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "trait,theme,title\nA,X,\"Hello, world\"\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].title, "Hello, world");
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = "\u{feff}trait,theme\nA,X\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].trait_name, "A");
    }

    #[test]
    fn test_guess_delimiter() {
        assert_eq!(guess_delimiter("trait,theme,date"), b',');
        assert_eq!(guess_delimiter("trait\ttheme\tdate"), b'\t');
        assert_eq!(guess_delimiter("trait;theme;date"), b';');
        assert_eq!(guess_delimiter("trait|theme"), b'|');
        assert_eq!(guess_delimiter("trait"), b',');
        assert_eq!(guess_delimiter(""), b',');
    }

    #[test]
    fn test_parse_tab_separated() {
        let csv = "trait\ttheme\tdate\nA\tX\t2020\n";

        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].trait_name, "A");
        assert_eq!(records[0].theme, "X");
        assert_eq!(records[0].date, "2020");
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = parse_records("trait,theme,date\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        let records = parse_records("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_or_empty_degrades_errors() {
        let err: Result<Vec<Record>> = Err(crate::Error::Fetch("404".into()));
        assert!(load_or_empty(err).is_empty());

        let ok: Result<Vec<Record>> = Ok(vec![Record::default()]);
        assert_eq!(load_or_empty(ok).len(), 1);
    }

    #[test]
    fn test_lower_priority_synonym_fills_empty_field() {
        let records = parse_records("date,Date\n,2020\n").unwrap();
        assert_eq!(records[0].date, "2020");

        let records = parse_records("image,Image,imageUrl\n,,u\n").unwrap();
        assert_eq!(records[0].image_url, "u");
        assert_eq!(records[0].title, "");
    }
}
