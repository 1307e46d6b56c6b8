// Delimited record file → RawRecord

use std::io::Read;
use std::path::Path;

use lineage_engine::config::{Delimiter, InputConfig};
use lineage_engine::error::LineageError;
use lineage_engine::model::RawRecord;
use tracing::{debug, info};

/// Read and parse a record file. Non-UTF-8 files are decoded as Windows-1252.
pub fn read_records(path: &Path, config: &InputConfig) -> Result<Vec<RawRecord>, LineageError> {
    let content = read_file_as_utf8(path)?;
    parse_records(&content, config)
}

/// Parse records from already-decoded text. The first row is the header;
/// every configured column must be present in it. Short rows leave the
/// missing trailing fields empty.
pub fn parse_records(content: &str, config: &InputConfig) -> Result<Vec<RawRecord>, LineageError> {
    let delimiter = match config.delimiter {
        Delimiter::Byte(b) => b,
        Delimiter::Auto => {
            let sniffed = sniff_delimiter(content);
            debug!(delimiter = %(sniffed as char).escape_default(), "sniffed field delimiter");
            sniffed
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(input_error)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, LineageError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LineageError::MissingColumn { column: name.into() })
    };

    let col = &config.columns;
    let name_idx = idx(&col.name)?;
    let sex_idx = idx(&col.sex)?;
    let generation_idx = idx(&col.generation)?;
    let dates_idx = idx(&col.dates)?;
    let clan_idx = idx(&col.clan)?;
    let progeny_idx = idx(&col.progeny)?;
    let references_idx = idx(&col.references)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(input_error)?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        rows.push(RawRecord {
            name: field(name_idx),
            sex: field(sex_idx),
            generation: field(generation_idx),
            dates: field(dates_idx),
            clan: field(clan_idx),
            progeny: field(progeny_idx),
            references: field(references_idx),
        });
    }

    info!(records = rows.len(), "read record file");
    Ok(rows)
}

fn input_error(e: csv::Error) -> LineageError {
    LineageError::InputParse {
        line: e.position().map(|p| p.line()),
        message: e.to_string(),
    }
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few records.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per record.
/// The delimiter that produces the most consistent field count (>1 field) wins.
/// Records rather than lines are sampled so quoted multi-line progeny lists
/// don't skew the counts.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let mut best = b';';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes())
            .records()
            .take(10)
            .map(|r| r.map(|r| r.len()).unwrap_or(1))
            .collect();

        // Must produce >1 field on the header row to be viable
        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        // Score: (records with the header's field count) * field count.
        // Higher field count breaks ties: more columns means a more likely delimiter
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, LineageError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| LineageError::Io(format!("cannot read {}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            debug!(path = %path.display(), "input is not UTF-8; decoded as Windows-1252");
            Ok(decoded.into_owned())
        }
    }
}
