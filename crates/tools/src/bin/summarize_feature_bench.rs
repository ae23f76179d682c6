//! 特徴点検出ベンチマーク CSV の集計レポート
//!
//! 使い方:
//!   # 全節をテキストで出力
//!   summarize_feature_bench output_2020-04-07_09h04m54s.csv
//!
//!   # 時間順の表だけ
//!   summarize_feature_bench output.csv --section sorted-table
//!
//!   # JSON 出力（gzip 入力も可）
//!   summarize_feature_bench --json output.csv.gz
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use featbench_core::BenchmarkSummary;
use tools::common::csv::load_records;
use tools::config::{Section, load_config_file, merge_config};
use tools::report::write_report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a 2D feature detection/matching benchmark CSV")]
struct Cli {
    /// ベンチマーク CSV（`-` で標準入力、`.gz` は自動展開）
    input: PathBuf,

    /// JSON 出力モード
    #[arg(long)]
    json: bool,

    /// 出力する節（複数指定可、省略時は全節、`--json` とは併用不可）
    #[arg(long = "section", value_enum)]
    sections: Vec<Section>,

    /// レポート設定ファイル（TOML / JSON）
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let file_config = cli.config.as_deref().map(load_config_file).transpose()?;
    let sections_given = !cli.sections.is_empty();
    let config = merge_config(file_config, cli.sections, cli.json);
    if config.json && sections_given {
        bail!("--section cannot be combined with --json");
    }
    log::debug!("report config: {config:?}");

    let store = load_records(&cli.input)?;
    if store.is_empty() {
        bail!("no benchmark records found in {}", cli.input.display());
    }
    let summary = BenchmarkSummary::build(&store);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.json {
        serde_json::to_writer_pretty(&mut out, &summary).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        write_report(&mut out, &summary, &config.sections).context("failed to write report")?;
    }
    out.flush()?;
    Ok(())
}
