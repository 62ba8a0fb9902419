mod config;
mod report;

use anyhow::{bail, Context, Result};
use auv_parser::{
    parse_numbered_lines, parse_numbered_lines_parallel, prepare_lines, read_message_file,
    read_text_file, NumberedLine, ParseOutput, ParserRegistry, Protocol,
};
use clap::Parser;
use report::{log_diagnostics, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "auvparse", about = "Parse raw AUV telemetry logs into typed messages")]
struct Cli {
    /// Topic to message kind table (.json, .yaml, .yml or .toml).
    #[arg(long, short = 'p')]
    protocol: PathBuf,

    /// Parse lines on the rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Fail the run when more than this many routed lines fail to parse.
    #[arg(long, value_name = "N")]
    max_body_errors: Option<usize>,

    /// Accept input files not named `*.RAW.auv`.
    #[arg(long)]
    allow_any_extension: bool,

    /// Raw message files, read in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auvparse=info,auv_parser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(RunStatus::Passed) => ExitCode::SUCCESS,
        Ok(RunStatus::TooManyBodyErrors) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Passed,
    TooManyBodyErrors,
}

fn run(cli: &Cli) -> Result<RunStatus> {
    let registry = ParserRegistry::new();
    let missing = registry.missing_kinds();
    if !missing.is_empty() {
        bail!("no body parser registered for {:?}", missing);
    }

    let table = config::load_topic_table(&cli.protocol)?;
    let protocol = Protocol::build_with_registry(&table, &registry);

    let output = parse_inputs(cli, &protocol)?;
    info!(
        messages = output.message_count(),
        diagnostics = output.diagnostics.len(),
        "parsing finished"
    );

    let summary = RunSummary::new(&output, &protocol);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let body_errors = output.body_error_count();
    if let Some(limit) = cli.max_body_errors {
        if body_errors > limit {
            error!(body_errors, limit, "too many body parse failures");
            return Ok(RunStatus::TooManyBodyErrors);
        }
    }

    Ok(RunStatus::Passed)
}

/// Read every input, then parse each file on its own so diagnostics carry
/// the file's own line numbers. Outputs are merged in input order.
fn parse_inputs(cli: &Cli, protocol: &Protocol) -> Result<ParseOutput> {
    let mut sources: Vec<(&PathBuf, Vec<NumberedLine>)> = Vec::new();
    for input in &cli.inputs {
        let lines = if cli.allow_any_extension {
            read_text_file(input)
        } else {
            read_message_file(input)
        }
        .with_context(|| format!("failed to read {}", input.display()))?;
        sources.push((input, prepare_lines(lines)));
    }

    let total: usize = sources.iter().map(|(_, lines)| lines.len()).sum();
    if total == 0 {
        bail!("no message lines found in {} input file(s)", cli.inputs.len());
    }
    info!(lines = total, topics = protocol.len(), "parsing message lines");

    let mut output = ParseOutput::default();
    for (input, lines) in sources {
        let file_output = if cli.parallel {
            parse_numbered_lines_parallel(&lines, protocol)
        } else {
            parse_numbered_lines(lines.iter().map(|(n, line)| (*n, line)), protocol)
        };
        log_diagnostics(input, &file_output.diagnostics);
        output.merge(file_output);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn cli(protocol: PathBuf, inputs: Vec<PathBuf>) -> Cli {
        Cli {
            protocol,
            parallel: false,
            max_body_errors: None,
            allow_any_extension: false,
            inputs,
        }
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "auvparse",
            "--protocol",
            "protocol.yaml",
            "--parallel",
            "--max-body-errors",
            "3",
            "a.RAW.auv",
            "b.RAW.auv",
        ])
        .unwrap();
        assert!(cli.parallel);
        assert_eq!(cli.max_body_errors, Some(3));
        assert_eq!(cli.inputs.len(), 2);

        assert!(Cli::try_parse_from(["auvparse", "--protocol", "protocol.yaml"]).is_err());
    }

    #[test]
    fn test_run_succeeds() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let input = write_file(
            &dir,
            "20090613_0034.RAW.auv",
            "THR_PORT:  1244855390.607  RPM:0.00 A:0.0400 V:46.80 T:29.00\n\nFOO: 1.0 x\n",
        );

        assert_eq!(run(&cli(protocol, vec![input])).unwrap(), RunStatus::Passed);
    }

    #[test]
    fn test_run_fails_over_body_error_limit() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let input = write_file(
            &dir,
            "20090613_0034.RAW.auv",
            "THR_PORT: 1244855390.607 RPM:0.00\nTHR_PORT: 1244855391.607 RPM:0.00 A:0.0 V:0.0 T:0.0\n",
        );

        let mut args = cli(protocol, vec![input]);
        args.max_body_errors = Some(0);
        assert_eq!(run(&args).unwrap(), RunStatus::TooManyBodyErrors);

        args.max_body_errors = Some(1);
        args.parallel = true;
        assert_eq!(run(&args).unwrap(), RunStatus::Passed);
    }

    #[test]
    fn test_run_rejects_non_raw_input() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let input = write_file(&dir, "thrusters.log", "THR_PORT: 1.0 RPM:0 A:0 V:0 T:0\n");

        assert!(run(&cli(protocol.clone(), vec![input.clone()])).is_err());

        let mut args = cli(protocol, vec![input]);
        args.allow_any_extension = true;
        assert_eq!(run(&args).unwrap(), RunStatus::Passed);
    }

    #[test]
    fn test_run_fails_without_lines() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let input = write_file(&dir, "empty.RAW.auv", "\n  \n");

        let err = run(&cli(protocol, vec![input])).unwrap_err();
        assert!(err.to_string().contains("no message lines"));
    }

    fn thruster_protocol() -> Protocol {
        let table: config::TopicTable =
            [("THR_PORT".to_string(), "ThrusterMessage".to_string())].into_iter().collect();
        Protocol::build(&table)
    }

    #[test]
    fn test_corrupt_bytes_only_affect_their_line() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let path = dir.path().join("20090613_0034.RAW.auv");
        let mut contents = b"THR_PORT: 1.0 RPM:0 A:0 V:0 T:0\nTHR_PORT: 2.0 RPM:0".to_vec();
        contents.push(0xff);
        contents.extend_from_slice(b" A:0 V:0 T:0\nTHR_PORT: 3.0 RPM:0 A:0 V:0 T:0\n");
        std::fs::write(&path, contents).unwrap();

        let args = cli(protocol, vec![path]);
        let output = parse_inputs(&args, &thruster_protocol()).unwrap();
        let times: Vec<f64> = output
            .messages_for("THR_PORT")
            .iter()
            .map(|message| message.timestamp())
            .collect();
        assert_eq!(times, vec![1.0, 3.0]);
        assert_eq!(output.body_error_count(), 1);
        assert_eq!(output.diagnostics[0].line_number(), 2);

        assert_eq!(run(&args).unwrap(), RunStatus::Passed);
    }

    #[test]
    fn test_diagnostics_use_file_line_numbers() {
        let dir = Builder::new().tempdir().unwrap();
        let protocol = write_file(&dir, "protocol.json", r#"{"THR_PORT": "ThrusterMessage"}"#);
        let first = write_file(
            &dir,
            "a.RAW.auv",
            "THR_PORT: 1.0 RPM:0 A:0 V:0 T:0\n\n\ngarbage\n",
        );
        let second = write_file(
            &dir,
            "b.RAW.auv",
            "\nTHR_PORT: 2.0 RPM:oops A:0 V:0 T:0\nTHR_PORT: 3.0 RPM:0 A:0 V:0 T:0\n",
        );

        let mut args = cli(protocol, vec![first, second]);
        let output = parse_inputs(&args, &thruster_protocol()).unwrap();
        let line_numbers: Vec<usize> = output.diagnostics.iter().map(|d| d.line_number()).collect();
        assert_eq!(line_numbers, vec![4, 2]);
        assert_eq!(output.message_count(), 2);

        args.parallel = true;
        assert_eq!(parse_inputs(&args, &thruster_protocol()).unwrap(), output);
    }
}
