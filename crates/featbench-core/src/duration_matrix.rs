//! 検出器×記述子の処理時間マトリクス
//!
//! 行が記述子、列が検出器。組み合わせが存在しないセルは内部では `None` で持ち、
//! 描画用の数値グリッドに変換する時点でだけ番兵値（`global_max + 0.5`）に置き換える。
//!
//! 番兵の判定は「`global_min` 未満のセル」で行うため、実データとして 0 に近い
//! 処理時間があると「データなし」と区別できない。描画側との互換のため、
//! この挙動はそのまま残している。

use serde::Serialize;

use crate::case_stats::CaseStats;
use crate::label_index::LabelIndex;

/// 「データなし」セルを実データの最大値からどれだけ外側に置くか
pub const SENTINEL_OFFSET: f64 = 0.5;

/// セル上に表示する注記（処理時間の整数表示）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixAnnotation {
    pub case: u32,
    pub detector_index: usize,
    pub descriptor_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DurationMatrix {
    /// `cells[descriptor_index][detector_index]`
    cells: Vec<Vec<Option<f64>>>,
    /// 番兵適用前の `(global_min, global_max)`
    bounds: Option<(f64, f64)>,
    annotations: Vec<MatrixAnnotation>,
}

impl DurationMatrix {
    /// ケース番号の昇順にセルを埋める。同じ組み合わせのケースが複数あれば後のケースで上書きする。
    pub fn build(cases: &CaseStats, labels: &LabelIndex) -> Self {
        let cols = labels.detectors().len();
        let rows = labels.descriptors().len();
        let mut cells = vec![vec![None; cols]; rows];
        let mut annotations = Vec::with_capacity(cases.len());

        for case in cases.iter() {
            let x = labels.detector(&case.detector);
            let y = labels.descriptor(&case.descriptor);
            let (Some(x), Some(y)) = (x, y) else {
                log::warn!(
                    "case {} ({}/{}) is not in the label index; skipped",
                    case.case,
                    case.detector,
                    case.descriptor
                );
                continue;
            };
            if cells[y][x].is_some() {
                log::debug!(
                    "case {} overwrites cell ({}, {})",
                    case.case,
                    case.detector,
                    case.descriptor
                );
            }
            cells[y][x] = Some(case.total_duration);
            annotations.push(MatrixAnnotation {
                case: case.case,
                detector_index: x,
                descriptor_index: y,
                text: format!("{:.0}", case.total_duration),
            });
        }

        Self {
            cells,
            bounds: cases.duration_bounds(),
            annotations,
        }
    }

    /// 記述子数
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// 検出器数
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// 組み合わせが観測されていなければ `None`
    pub fn cell(&self, descriptor_index: usize, detector_index: usize) -> Option<f64> {
        self.cells.get(descriptor_index)?.get(detector_index).copied().flatten()
    }

    /// カラースケールの範囲（番兵適用前）
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    pub fn sentinel(&self) -> Option<f64> {
        self.bounds.map(|(_, max)| max + SENTINEL_OFFSET)
    }

    pub fn annotations(&self) -> &[MatrixAnnotation] {
        &self.annotations
    }

    /// 描画用の数値グリッド
    ///
    /// 未記入セルを 0 で埋めてから、`global_min` 未満のセルをすべて番兵値に置き換える。
    pub fn render(&self) -> Vec<Vec<f64>> {
        let filled = self.cells.iter().map(|row| row.iter().map(|c| c.unwrap_or(0.0)));
        match self.bounds {
            Some((min, max)) => {
                let sentinel = max + SENTINEL_OFFSET;
                filled
                    .map(|row| row.map(|v| if v < min { sentinel } else { v }).collect())
                    .collect()
            }
            None => filled.map(|row| row.collect()).collect(),
        }
    }
}
