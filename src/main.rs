//! Text front end for the calibration tool.
//!
//! ```bash
//! tempered-calibration 10,9.5 20,19 30,29    # one recomputation
//! tempered-calibration apply "-c 1:2" 20 25  # correct readings
//! tempered-calibration                       # interactive form
//! ```
//!
//! Log output goes to stderr and is filtered with `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tempered_calibration::{
    CalibrationConfig, CalibrationReport, CalibrationTool, Coefficients, RawEntry,
};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let config = match take_option(&mut args, "--config")? {
        Some(path) => CalibrationConfig::load_from(Path::new(&path)),
        None => CalibrationConfig::load(),
    };

    match args.first().map(String::as_str) {
        Some("apply") => run_apply(&args[1..]),
        Some(_) => {
            let entries: Vec<RawEntry> = args.iter().map(|arg| parse_entry(arg)).collect();
            let report = tempered_calibration::calibrate(&entries);
            print_report(&report, config.show_status);
            Ok(())
        }
        None => run_shell(CalibrationTool::new(config)),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  tempered-calibration [--config PATH] ACTUAL,MEASURED...");
    println!("  tempered-calibration apply PARAMS VALUE...");
    println!("  tempered-calibration [--config PATH]    (interactive)");
}

/// Removes `flag VALUE` from `args`.
fn take_option(args: &mut Vec<String>, flag: &str) -> CliResult<Option<String>> {
    let Some(idx) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };

    if idx + 1 >= args.len() {
        return Err(format!("{flag} needs a value").into());
    }

    let value = args.remove(idx + 1);
    args.remove(idx);

    Ok(Some(value))
}

/// `ACTUAL,MEASURED`; a missing side is left empty.
fn parse_entry(arg: &str) -> RawEntry {
    match arg.split_once(',') {
        Some((actual, measured)) => RawEntry::new(actual, measured),
        None => RawEntry::new(arg, ""),
    }
}

fn print_report(report: &CalibrationReport, show_status: bool) {
    println!("Calibration parameter: {}", report.formatted);

    if show_status {
        for (slot, status) in report.statuses.iter().enumerate() {
            println!("  value set {}: {}", slot + 1, status);
        }
    }
}

fn run_apply(args: &[String]) -> CliResult<()> {
    // accept both `apply "-c 1:2" 20` and `apply -c 1:2 20`
    let (params, values) = match args {
        [flag, params, values @ ..] if flag == "-c" => (params, values),
        [params, values @ ..] => (params, values),
        [] => return Err("apply needs a parameter string".into()),
    };

    let coefficients = Coefficients::from_parameter_string(params)?;

    for value in values {
        let measured: f64 = value
            .parse()
            .map_err(|_| format!("not a temperature: {value}"))?;
        println!("{} -> {}", measured, coefficients.calibrate(measured));
    }

    Ok(())
}

fn run_shell(mut tool: CalibrationTool) -> CliResult<()> {
    println!("Temperature Calibration");
    println!("Type 'help' for commands, 'exit' to quit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => continue,
            ["exit"] | ["quit"] => break,
            ["help"] => print_shell_help(),
            ["show"] => show_form(&tool),
            ["config"] => print!("{}", toml::to_string_pretty(tool.config())?),
            ["clear"] => print_report(&tool.clear(), tool.config().show_status),
            ["clear", slot] => match parse_slot(slot) {
                Some(slot) => match tool.clear_entry(slot) {
                    Ok(report) => print_report(&report, tool.config().show_status),
                    Err(err) => println!("Error: {err}"),
                },
                None => println!("Error: value sets are numbered from 1"),
            },
            ["set", slot, values @ ..] if values.len() <= 2 => match parse_slot(slot) {
                Some(slot) => {
                    let actual = values.first().copied().unwrap_or("");
                    let measured = values.get(1).copied().unwrap_or("");
                    match tool.set_entry(slot, actual, measured) {
                        Ok(report) => print_report(&report, tool.config().show_status),
                        Err(err) => println!("Error: {err}"),
                    }
                }
                None => println!("Error: value sets are numbered from 1"),
            },
            ["apply", values @ ..] => match tool.report().coefficients {
                Some(coefficients) => {
                    for value in values {
                        match value.parse::<f64>() {
                            Ok(measured) => {
                                println!("{} -> {}", measured, coefficients.calibrate(measured))
                            }
                            Err(_) => println!("Error: not a temperature: {value}"),
                        }
                    }
                }
                None => println!("No calibration available"),
            },
            _ => println!("Unknown command: {line} (type 'help')"),
        }
    }

    Ok(())
}

/// Shell slots are one based.
fn parse_slot(slot: &str) -> Option<usize> {
    slot.parse::<usize>().ok()?.checked_sub(1)
}

fn show_form(tool: &CalibrationTool) {
    let report = tool.report();

    for (slot, (entry, status)) in tool.entries().iter().zip(&report.statuses).enumerate() {
        let texts: Vec<String> = entry
            .fields
            .iter()
            .map(|field| format!("{}={:?}", field.role, field.text))
            .collect();
        println!("  value set {}: {} [{}]", slot + 1, texts.join(" "), status);
    }

    println!("Calibration parameter: {}", report.formatted);
}

fn print_shell_help() {
    println!("Commands:");
    println!("  set N ACTUAL MEASURED   fill value set N (omitted values stay empty)");
    println!("  clear [N]               empty value set N, or all of them");
    println!("  show                    print the form and the current parameter");
    println!("  apply VALUE...          correct measured readings with the current parameter");
    println!("  config                  print the active configuration");
    println!("  exit                    quit");
}
