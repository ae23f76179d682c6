//! 特徴点検出・マッチングベンチマークの集計エンジン
//!
//! ベンチマークランナーが出力する (case, image) 単位の行データを、
//! レポート用の統計にまとめる。
//!
//! - 検出器ごとのキーポイント数・キーポイントサイズ統計 ([`DetectorStats`])
//! - テストケースごとの処理時間・マッチ数統計 ([`CaseStats`])
//! - 検出器×記述子の処理時間マトリクス ([`DurationMatrix`])
//! - 処理時間でソートした表 ([`CaseTable`])
//!
//! CSV の読み込みや描画は `tools` クレート側の責務で、ここでは
//! [`RecordStore`] を入力として受け取り、不変な集計結果を返すだけにとどめる。

pub mod case_stats;
pub mod detector_stats;
pub mod duration_matrix;
pub mod error;
pub mod label_index;
pub mod record;
pub mod summary;
pub mod table;

pub use case_stats::{CaseStat, CaseStats};
pub use detector_stats::{CountSpread, DetectorStat, DetectorStats};
pub use duration_matrix::{DurationMatrix, MatrixAnnotation, SENTINEL_OFFSET};
pub use error::{StoreError, StoreResult};
pub use label_index::LabelIndex;
pub use record::{Record, RecordStore};
pub use summary::BenchmarkSummary;
pub use table::{CaseTable, TABLE_COLUMNS, TableRow};
