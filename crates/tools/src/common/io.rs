//! 入力ファイルのオープン（gzip・標準入力対応）

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const READER_BUF_CAP: usize = 64 * 1024; // 64 KiB

/// 入力元の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// `-`
    Stdin,
    /// 拡張子 `.gz`
    Gzip,
    Plain,
}

impl InputKind {
    pub fn detect(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            return InputKind::Stdin;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if ext.eq_ignore_ascii_case("gz") {
            InputKind::Gzip
        } else {
            InputKind::Plain
        }
    }
}

pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let p = path.as_ref();
    let reader: Box<dyn BufRead> = match InputKind::detect(p) {
        InputKind::Stdin => Box::new(BufReader::with_capacity(READER_BUF_CAP, io::stdin())),
        InputKind::Gzip => {
            let dec = flate2::read::GzDecoder::new(File::open(p)?);
            Box::new(BufReader::with_capacity(READER_BUF_CAP, dec))
        }
        InputKind::Plain => Box::new(BufReader::with_capacity(READER_BUF_CAP, File::open(p)?)),
    };
    Ok(reader)
}
