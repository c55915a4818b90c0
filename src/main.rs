//! Battery sizer entry point: CLI wiring, definition loading, run log.

use std::process;

use standby_sizer::cli;
use standby_sizer::config::SizingDefinition;
use standby_sizer::io::export::export_trace_csv;
use standby_sizer::io::load::{load_discharge_samples, load_duty_periods};
use standby_sizer::io::time::format_hms;
use standby_sizer::runner::run_sizing;
use standby_sizer::sizing::curve::DischargeCurve;
use standby_sizer::sizing::duty::DutyCycle;
use standby_sizer::sizing::types::SectionOutcome;

fn main() {
    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    let definition = SizingDefinition::from_json_file(&opts.definition).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let mut errors = definition.validate();
    errors.extend(definition.data_file_errors());
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    println!(
        "{}\n defined in \"{}\"",
        definition.title,
        opts.definition.display()
    );
    println!(
        " IEEE 1115-2014 sizing run started on {}",
        chrono::Local::now().format("%Y/%m/%d")
    );
    println!(
        " Starting data file: \"{}\"",
        definition.csv_file_names.starting_cycles.display()
    );
    println!(
        " Battery current data file: \"{}\"",
        definition.csv_file_names.amps_by_duration_file_name.display()
    );
    println!();

    let samples = load_discharge_samples(&definition.csv_file_names.amps_by_duration_file_name)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
    let curve = DischargeCurve::from_samples(&samples).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let periods = load_duty_periods(&definition.csv_file_names.starting_cycles).unwrap_or_else(
        |e| {
            eprintln!("error: {e}");
            process::exit(1);
        },
    );
    let duty = DutyCycle::new(periods);

    let run = run_sizing(&curve, &duty, &definition.parameters()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    if definition.verbose {
        print_trace(&run.outcomes);
    }

    println!("{}", run.report);

    if let Some(ref path) = opts.trace_out {
        if let Err(e) = export_trace_csv(&run.outcomes, path) {
            eprintln!("error: failed to write trace CSV: {e}");
            process::exit(1);
        }
        eprintln!("Trace written to {}", path.display());
    }
}

/// Prints the per-section worksheet tables in the classic column layout.
fn print_trace(outcomes: &[SectionOutcome]) {
    for outcome in outcomes {
        match outcome {
            SectionOutcome::Skipped { section } => {
                println!("Section {section} skipped\n");
            }
            SectionOutcome::Evaluated {
                section,
                trace,
                total_ah,
            } => {
                println!("Section {section}");
                println!("Period,Load,Change,Duration,Remaining,Kt,Temp Derating,Size");
                for c in trace {
                    println!(
                        "{},{:.2},{:.2},{},{},{:.4},{:.2},{:.2}",
                        c.period,
                        c.load_amps,
                        c.change_in_load_amps,
                        format_hms(c.duration_s),
                        format_hms(c.remaining_s),
                        c.kt,
                        c.temp_derating,
                        c.required_size_ah
                    );
                }
                println!("Total: {total_ah:.2} Ah\n");
            }
        }
    }
}
