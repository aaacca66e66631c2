use std::io::Write;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::sweep::SweepPoint;

/// How sweep points are written out
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// One `hit_ratio,throughput` line per point, no header
    #[default]
    Csv,
    /// A pretty-printed JSON array of points
    Json,
}

/// Writes sweep points to `writer`, returning the number of points written
///
/// CSV output is streamed point by point; JSON output is collected first as it is a single
/// document. Nothing is flushed, that's left to the caller
///
/// # Arguments
///
/// * `writer`: Destination, usually a buffered standard output
/// * `points`: The points, in the order they should appear
/// * `format`: The output format
///
/// returns: Result<usize, String>
pub fn write_points<W, I>(writer: &mut W, points: I, format: OutputFormat) -> Result<usize, String>
where
    W: Write,
    I: IntoIterator<Item = SweepPoint>,
{
    match format {
        OutputFormat::Csv => {
            let mut count = 0;
            for point in points {
                writeln!(writer, "{point}").map_err(|e| format!("Couldn't write the output: {e}"))?;
                count += 1;
            }
            Ok(count)
        }
        OutputFormat::Json => {
            let points: Vec<SweepPoint> = points.into_iter().collect();
            serde_json::to_writer_pretty(&mut *writer, &points).map_err(|e| format!("Couldn't serialise the output {e}"))?;
            writeln!(writer).map_err(|e| format!("Couldn't write the output: {e}"))?;
            Ok(points.len())
        }
    }
}
