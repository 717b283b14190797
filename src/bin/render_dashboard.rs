use std::path::PathBuf;

use salary_dash::data::DEFAULT_DATASET_PATH;
use salary_dash::telemetry;
use salary_dash::{Dashboard, DashboardConfig};

const USAGE: &str = "usage: salary-dash-render [--csv <path>] [--config <json>] [--out <dir>] [--year <year>] [--snapshot]";

#[derive(Debug)]
struct CliArgs {
    csv: PathBuf,
    config: Option<PathBuf>,
    out: PathBuf,
    year: Option<i32>,
    snapshot: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = telemetry::init_default_tracing();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let mut dashboard = Dashboard::load(&args.csv, config)
        .map_err(|err| format!("failed to load `{}`: {err}", args.csv.display()))?;
    if let Some(report) = dashboard.load_report() {
        println!(
            "loaded {} of {} rows from {}",
            report.rows_kept,
            report.rows_read,
            args.csv.display()
        );
    }

    if let Some(year) = args.year {
        dashboard
            .line_mut()
            .show_year(year)
            .map_err(|err| err.to_string())?;
    }
    dashboard.line_mut().settle();

    let written = dashboard
        .write_svg(&args.out)
        .map_err(|err| format!("failed to write svg into `{}`: {err}", args.out.display()))?;
    for path in &written {
        println!("wrote {}", path.display());
    }

    if args.snapshot {
        let json = dashboard
            .snapshot()
            .to_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        let path = args.out.join("snapshot.json");
        std::fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        csv: PathBuf::from(DEFAULT_DATASET_PATH),
        config: None,
        out: PathBuf::from("target/dashboard"),
        year: None,
        snapshot: false,
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--csv" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --csv".to_owned())?;
                parsed.csv = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                parsed.out = PathBuf::from(value);
            }
            "--year" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --year".to_owned())?;
                let year = value
                    .parse::<i32>()
                    .map_err(|err| format!("invalid --year `{value}`: {err}"))?;
                parsed.year = Some(year);
            }
            "--snapshot" => parsed.snapshot = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }
    Ok(parsed)
}
