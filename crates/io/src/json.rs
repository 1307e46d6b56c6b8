// Graph document + build report → JSON

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lineage_engine::error::LineageError;
use lineage_engine::model::{BuildReport, Graph};
use serde::Serialize;

/// Default output file name when neither a flag nor the config names one.
pub const DEFAULT_OUTPUT_FILE: &str = "kumu_data.json";

/// Pretty-print with a 4-space indent.
pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String, LineageError> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, value)?;
    String::from_utf8(buf).map_err(|e| LineageError::Io(e.to_string()))
}

fn write_pretty<W: Write, T: Serialize>(writer: W, value: &T) -> Result<(), LineageError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| LineageError::Io(format!("JSON serialization error: {e}")))
}

/// The `{elements, connections}` document as a string.
pub fn graph_to_string(graph: &Graph) -> Result<String, LineageError> {
    to_pretty_string(graph)
}

pub fn write_graph(path: &Path, graph: &Graph) -> Result<(), LineageError> {
    write_file(path, graph)
}

pub fn write_report(path: &Path, report: &BuildReport) -> Result<(), LineageError> {
    write_file(path, report)
}

fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<(), LineageError> {
    let file = File::create(path)
        .map_err(|e| LineageError::Io(format!("cannot write {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
