//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};

pub struct OutputWriter {
    jsonl_writer: Box<dyn Write + Send>,
    csv_writer: Option<csv::Writer<BufWriter<File>>>,
    jsonl_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
}

impl OutputWriter {
    /// JSONL to `output` (gzip when it ends in `.gz`) or stdout, plus an
    /// optional CSV summary.
    pub fn new(
        output: Option<&Path>,
        summary_csv: Option<&Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let jsonl_writer: Box<dyn Write + Send> = match output {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                let file = create_truncated(path)?;
                if path.extension().is_some_and(|ext| ext == "gz") {
                    Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
                } else {
                    Box::new(BufWriter::new(file))
                }
            }
            None => Box::new(io::stdout()),
        };

        let csv_writer = match summary_csv {
            Some(path) => Some(csv::Writer::from_writer(BufWriter::new(create_truncated(
                path,
            )?))),
            None => None,
        };

        Ok(Self {
            jsonl_writer,
            csv_writer,
            jsonl_path: output.map(Path::to_path_buf),
            csv_path: summary_csv.map(Path::to_path_buf),
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.jsonl_writer, "{json}")?;

        if let Some(ref mut writer) = self.csv_writer {
            let row: CsvSummaryRow = metrics.into();
            writer.serialize(&row)?;
        }

        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.jsonl_writer.flush()?;
        if let Some(ref mut writer) = self.csv_writer {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, Option<&PathBuf>) {
        (self.jsonl_path.as_ref(), self.csv_path.as_ref())
    }
}

fn create_truncated(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
