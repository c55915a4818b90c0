use std::env;
use std::path::PathBuf;

pub struct CliOptions {
    pub definition: PathBuf,
    pub trace_out: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut definition = None;
    let mut trace_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--trace-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --trace-out (expected a CSV file path)".to_string()
                })?;
                if trace_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--trace-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => return Err(format!("unknown argument: {other}")),
            path => {
                if definition.replace(PathBuf::from(path)).is_some() {
                    return Err("more than one definition file given".to_string());
                }
            }
        }
        i += 1;
    }

    let definition = definition
        .ok_or_else(|| "needs a JSON definition file name as argument to start".to_string())?;

    Ok(CliOptions {
        definition,
        trace_out,
    })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  standby-sizer <definition.json> [--trace-out <path>]");
}
