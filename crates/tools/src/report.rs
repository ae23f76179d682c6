//! 集計結果のテキストレポート

use std::io::{self, Write};

use featbench_core::{BenchmarkSummary, CaseTable, TABLE_COLUMNS};

use crate::config::Section;

/// 指定された節を順に出力する
pub fn write_report<W: Write>(
    out: &mut W,
    summary: &BenchmarkSummary,
    sections: &[Section],
) -> io::Result<()> {
    writeln!(
        out,
        "Records: {}  Images: {}  Detectors: {}  Cases: {}",
        summary.num_records,
        summary.num_images,
        summary.detectors.len(),
        summary.cases.len()
    )?;
    for section in sections {
        writeln!(out)?;
        match section {
            Section::Keypoints => write_keypoints(out, summary)?,
            Section::Matches => write_matches(out, summary)?,
            Section::Durations => write_durations(out, summary)?,
            Section::Matrix => write_matrix(out, summary)?,
            Section::Table => {
                writeln!(out, "=== Duration Table ===")?;
                write_table(out, &summary.table)?;
            }
            Section::SortedTable => {
                writeln!(out, "=== Duration Table (sorted) ===")?;
                write_table(out, &summary.sorted_table)?;
            }
        }
    }
    Ok(())
}

fn write_keypoints<W: Write>(out: &mut W, summary: &BenchmarkSummary) -> io::Result<()> {
    writeln!(out, "=== Detector vs. Keypoint Count ===")?;
    writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>8} {:>8}",
        "Detector", "Total", "Mean/img", "Min", "Max"
    )?;
    writeln!(out, "{}", "-".repeat(52))?;
    for stat in summary.detectors.iter() {
        let spread = stat.count_spread();
        writeln!(
            out,
            "{:<12} {:>10} {:>10.1} {:>8} {:>8}",
            stat.detector, stat.total_keypoints, spread.mean, spread.min, spread.max
        )?;
    }

    writeln!(out)?;
    writeln!(out, "=== Detector vs. Mean Keypoint Size ===")?;
    writeln!(out, "{:<12} {:>10} {:>10}", "Detector", "Mean Size", "StdDev")?;
    writeln!(out, "{}", "-".repeat(34))?;
    for stat in summary.detectors.iter() {
        writeln!(out, "{:<12} {:>10.2} {:>10.2}", stat.detector, stat.mean_size, stat.stddev_size)?;
    }
    Ok(())
}

fn write_matches<W: Write>(out: &mut W, summary: &BenchmarkSummary) -> io::Result<()> {
    writeln!(out, "=== Matches per Case ===")?;
    writeln!(out, "{:<10} {:>10} {:>8} {:>8}", "Case", "Mean", "Min", "Max")?;
    writeln!(out, "{}", "-".repeat(39))?;
    for case in summary.cases.iter() {
        writeln!(
            out,
            "{:<10} {:>10.1} {:>8} {:>8}",
            case.label(),
            case.mean_matches,
            case.min_matches,
            case.max_matches
        )?;
    }
    Ok(())
}

fn write_durations<W: Write>(out: &mut W, summary: &BenchmarkSummary) -> io::Result<()> {
    writeln!(out, "=== Detector vs. Descriptor Durations ===")?;
    writeln!(
        out,
        "{:<10} {:<12} {:<12} {:>14} {:>16} {:>10}",
        "Case", "Detector", "Descriptor", "Detector (ms)", "Descriptor (ms)", "Total"
    )?;
    writeln!(out, "{}", "-".repeat(79))?;
    for case in summary.cases.iter() {
        let (det, desc) = case.duration_point();
        writeln!(
            out,
            "{:<10} {:<12} {:<12} {:>14.2} {:>16.2} {:>10.2}",
            case.label(),
            case.detector,
            case.descriptor,
            det,
            desc,
            case.total_duration
        )?;
    }
    Ok(())
}

fn write_matrix<W: Write>(out: &mut W, summary: &BenchmarkSummary) -> io::Result<()> {
    let matrix = &summary.matrix;
    let labels = &summary.labels;
    writeln!(out, "=== Detector vs. Descriptor Durations (ms) ===")?;
    write!(out, "{:<12}", "")?;
    for detector in labels.detectors() {
        write!(out, " {detector:>10}")?;
    }
    writeln!(out)?;
    for (y, descriptor) in labels.descriptors().iter().enumerate() {
        write!(out, "{descriptor:<12}")?;
        for x in 0..matrix.cols() {
            match matrix.cell(y, x) {
                Some(d) => write!(out, " {:>10}", format!("{d:.0}"))?,
                None => write!(out, " {:>10}", "-")?,
            }
        }
        writeln!(out)?;
    }
    if let (Some((min, max)), Some(sentinel)) = (matrix.bounds(), matrix.sentinel()) {
        writeln!(out, "color scale: {min:.1} .. {max:.1} ms (no data = {sentinel:.1})")?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, table: &CaseTable) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<12} {:<12} {:>14} {:>8}",
        "", TABLE_COLUMNS[0], TABLE_COLUMNS[1], TABLE_COLUMNS[2], TABLE_COLUMNS[3]
    )?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (label, row) in table.iter() {
        writeln!(
            out,
            "{:<10} {:<12} {:<12} {:>14} {:>8}",
            label, row.detector, row.descriptor, row.duration, row.matches
        )?;
    }
    Ok(())
}
