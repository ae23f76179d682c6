//! ベンチマークログのレポートツール
//!
//! CSV の読み込み、レポート設定、テキストレポートの出力を提供する。
//! 集計そのものは `featbench-core` が担う。

pub mod common;
pub mod config;
pub mod report;
