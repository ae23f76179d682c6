//! ベンチマーク CSV の読み込み
//!
//! ベンチマークランナーは1行目に `'Case','Image',...` の見出しを書き、以降は
//! 引用符なしの値を列順固定で出力する。見出しは列数の確認にだけ使う。

use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use featbench_core::{Record, RecordStore};

use super::io::open_input;

/// 列の並び（ランナーの出力順）
pub const COLUMNS: [&str; 13] = [
    "case",
    "image",
    "detector",
    "descriptor",
    "matcher",
    "selector",
    "detector_duration",
    "descriptor_duration",
    "matching_duration",
    "keypoints",
    "keypoint_size_mean",
    "keypoint_size_stddev",
    "matches",
];

struct CsvRow<'a> {
    cols: Vec<&'a str>,
    line_no: usize,
}

impl<'a> CsvRow<'a> {
    fn new(line: &'a str, line_no: usize) -> Result<Self> {
        // ランナーの CSV は引用符なしで生成されるため、単純splitで扱う。
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        if cols.len() != COLUMNS.len() {
            bail!(
                "line {line_no}: expected {} columns but got {}",
                COLUMNS.len(),
                cols.len()
            );
        }
        Ok(Self { cols, line_no })
    }

    fn text(&self, idx: usize) -> String {
        self.cols[idx].to_owned()
    }

    fn parse<T>(&self, idx: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self.cols[idx];
        raw.parse::<T>().with_context(|| {
            format!("line {}: failed to parse {} column: {raw:?}", self.line_no, COLUMNS[idx])
        })
    }

    fn into_record(self) -> Result<Record> {
        Ok(Record {
            case: self.parse(0)?,
            image: self.parse(1)?,
            detector: self.text(2),
            descriptor: self.text(3),
            matcher: self.text(4),
            selector: self.text(5),
            detector_duration: self.parse(6)?,
            descriptor_duration: self.parse(7)?,
            matching_duration: self.parse(8)?,
            keypoints: self.parse(9)?,
            keypoint_size_mean: self.parse(10)?,
            keypoint_size_stddev: self.parse(11)?,
            matches: self.parse(12)?,
        })
    }
}

/// CSV テキストから RecordStore を作る
///
/// `source` はエラーメッセージ用の名前。空行は読み飛ばす。
pub fn parse_records<R: BufRead>(reader: R, source: &str) -> Result<RecordStore> {
    let mut records = Vec::new();
    let mut header_seen = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read {source} line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !header_seen {
            let header_cols = trimmed.split(',').count();
            if header_cols != COLUMNS.len() {
                bail!(
                    "{source}: header has {header_cols} columns, expected {}",
                    COLUMNS.len()
                );
            }
            header_seen = true;
            continue;
        }
        let record = CsvRow::new(trimmed, line_no)
            .and_then(CsvRow::into_record)
            .with_context(|| format!("invalid row in {source}"))?;
        records.push(record);
    }

    if !header_seen {
        bail!("{source}: input is empty");
    }
    log::debug!("loaded {} records from {source}", records.len());
    RecordStore::new(records).with_context(|| format!("invalid records in {source}"))
}

/// ファイル（`-` は標準入力、`.gz` は展開）から RecordStore を作る
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<RecordStore> {
    let path = path.as_ref();
    let reader = open_input(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_records(reader, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const HEADER: &str = "'Case','Image','Detector','Descriptor','Matcher','Selector',\
'Detector Duration (ms)','Descriptor Duration (ms)','Matching Duration (ms)',\
'Keypoints','Mean Size','StdDev Size','Matches'";

    fn parse(body: &str) -> Result<RecordStore> {
        parse_records(Cursor::new(format!("{HEADER}\n{body}")), "test.csv")
    }

    #[test]
    fn test_parse_runner_output() {
        // ランナーはケース番号を 0 から振る
        let store = parse(
            "0,1,SHITOMASI,BRISK,MAT_BF,SEL_NN,12.5,1.25,0.3,125,4,0,0\n\
             0,2,SHITOMASI,BRISK,MAT_BF,SEL_NN,11.5,1.5,0.2,118,4,0,95\n",
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.num_images(), 2);
        let r = &store.records()[1];
        assert_eq!(r.case, 0);
        assert_eq!(r.detector, "SHITOMASI");
        assert_eq!(r.selector, "SEL_NN");
        assert_eq!(r.keypoints, 118);
        assert_eq!(r.matches, 95);
        assert_eq!(r.descriptor_duration, 1.5);
    }

    #[test]
    fn test_zero_image_is_rejected() {
        let err = parse("1,0,FAST,ORB,MAT_BF,SEL_KNN,1.0,2.0,0.1,10,7.0,0.0,4\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("image index must be >= 1"), "{msg}");
    }

    #[test]
    fn test_negative_size_for_empty_image_is_accepted() {
        let store = parse("3,4,HARRIS,BRIEF,MAT_BF,SEL_KNN,9.1,0.4,0.1,0,-1,-1,0\n").unwrap();
        assert_eq!(store.records()[0].keypoint_size_mean, -1.0);
        assert_eq!(store.records()[0].keypoints, 0);
    }

    #[test]
    fn test_blank_lines_and_spaces_are_ignored() {
        let store =
            parse("\n 1, 1, FAST, ORB, MAT_BF, SEL_KNN, 1.0, 2.0, 0.1, 10, 7.0, 0.0, 4 \n\n").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].descriptor, "ORB");
    }

    #[test]
    fn test_wrong_column_count_names_line() {
        let err = parse("1,1,FAST,ORB,MAT_BF,SEL_KNN,1.0,2.0\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("expected 13 columns"), "{msg}");
    }

    #[test]
    fn test_unparsable_number_names_column() {
        let err = parse("1,1,FAST,ORB,MAT_BF,SEL_KNN,1.0,2.0,0.1,many,7.0,0.0,4\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("keypoints"), "{msg}");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(parse_records(Cursor::new(""), "empty.csv").is_err());
    }

    #[test]
    fn test_header_only_is_an_empty_store() {
        let store = parse("").unwrap();
        assert!(store.is_empty());
    }
}
