//! 集計パイプライン全体の結果

use serde::Serialize;

use crate::case_stats::CaseStats;
use crate::detector_stats::DetectorStats;
use crate::duration_matrix::DurationMatrix;
use crate::label_index::LabelIndex;
use crate::record::RecordStore;
use crate::table::CaseTable;

/// 1つの RecordStore から作った全集計結果
///
/// JSON 出力時は描画用グリッド（番兵適用後）も含める。
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary {
    pub num_records: usize,
    pub num_images: u32,
    pub detectors: DetectorStats,
    pub cases: CaseStats,
    pub labels: LabelIndex,
    pub matrix: DurationMatrix,
    /// `matrix.render()` の結果
    pub duration_grid: Vec<Vec<f64>>,
    pub table: CaseTable,
    pub sorted_table: CaseTable,
}

impl BenchmarkSummary {
    pub fn build(store: &RecordStore) -> Self {
        let detectors = DetectorStats::aggregate(store);
        let cases = CaseStats::aggregate(store);
        let labels = LabelIndex::assign(&cases);
        let matrix = DurationMatrix::build(&cases, &labels);
        let duration_grid = matrix.render();
        let table = CaseTable::build(&cases);
        let sorted_table = table.sorted_by_duration();
        log::info!(
            "summarized {} records: {} detectors, {} cases, {}x{} duration matrix",
            store.len(),
            detectors.len(),
            cases.len(),
            matrix.rows(),
            matrix.cols()
        );

        Self {
            num_records: store.len(),
            num_images: store.num_images(),
            detectors,
            cases,
            labels,
            matrix,
            duration_grid,
            table,
            sorted_table,
        }
    }
}
