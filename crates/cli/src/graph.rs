//! `lineage build`: record file → `{elements, connections}` document.

use std::path::PathBuf;

use lineage_engine::normalize::normalize_all;
use lineage_io::json::{graph_to_string, write_graph, write_report, DEFAULT_OUTPUT_FILE};
use tracing::info;

use crate::exit_codes::EXIT_UNRESOLVED;
use crate::options::{load_config, InputArgs, ResolveArgs};
use crate::CliError;

pub struct BuildRequest {
    pub input: PathBuf,
    pub input_args: InputArgs,
    pub resolve_args: ResolveArgs,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub report: Option<PathBuf>,
    pub strict: bool,
}

pub fn cmd_build(req: BuildRequest) -> Result<(), CliError> {
    let config = load_config(&req.input_args, Some(&req.resolve_args))?;

    let raws = lineage_io::csv::read_records(&req.input, &config.input)?;
    let records = normalize_all(&raws, config.input.name_separator);
    let out = lineage_engine::build(&records, &config.build_options())?;

    // Explicit --output wins; the configured/default file is skipped when
    // the document goes to stdout.
    let output_path = req.output.clone().or_else(|| {
        if req.json {
            None
        } else {
            Some(
                config
                    .output
                    .path
                    .as_deref()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            )
        }
    });

    if let Some(ref path) = output_path {
        write_graph(path, &out.graph).map_err(|e| CliError::output(e.to_string()))?;
        info!(path = %path.display(), "graph document written");
        eprintln!("wrote {}", path.display());
    }

    if req.json {
        let json_str = graph_to_string(&out.graph).map_err(|e| CliError::output(e.to_string()))?;
        println!("{json_str}");
    }

    if let Some(ref path) = req.report {
        write_report(path, &out.report).map_err(|e| CliError::output(e.to_string()))?;
        eprintln!("wrote {}", path.display());
    }

    // Human summary to stderr
    let s = &out.report.summary;
    eprintln!(
        "graph: {} elements, {} connections ({} unresolved mentions, {} shared aliases)",
        s.elements, s.connections, s.unresolved, s.collisions
    );

    if req.strict && s.unresolved > 0 {
        return Err(CliError {
            code: EXIT_UNRESOLVED,
            message: format!("{} progeny mention(s) did not resolve", s.unresolved),
            hint: Some("run with --report <path> to list them".into()),
        });
    }

    Ok(())
}
