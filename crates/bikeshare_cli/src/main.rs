//! Runs one bike-share replication and prints the results.

use std::process::ExitCode;

use bikeshare_core::scenario::ScenarioParams;

use bikeshare_cli::report::run_replication;

struct CliArgs {
    params: ScenarioParams,
    horizon: f64,
    json: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut params = ScenarioParams::default();
    let mut horizon = 1000.0;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} expects a value"))
        };
        match flag.as_str() {
            "--mean" => {
                params.mean_interarrival = value("--mean")?
                    .parse()
                    .map_err(|e| format!("--mean: {e}"))?;
            }
            "--posts" => {
                params.posts_per_station = value("--posts")?
                    .parse()
                    .map_err(|e| format!("--posts: {e}"))?;
            }
            "--bikes" => {
                params.bikes_per_station = value("--bikes")?
                    .parse()
                    .map_err(|e| format!("--bikes: {e}"))?;
            }
            "--horizon" => {
                horizon = value("--horizon")?
                    .parse()
                    .map_err(|e| format!("--horizon: {e}"))?;
            }
            "--seed" => {
                params.seed = Some(
                    value("--seed")?
                        .parse()
                        .map_err(|e| format!("--seed: {e}"))?,
                );
            }
            "--json" => json = true,
            other => return Err(format!("unknown flag: {other}")),
        }
    }

    Ok(CliArgs {
        params,
        horizon,
        json,
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!(
                "usage: bikeshare_cli [--mean M] [--posts N] [--bikes N] \
                 [--horizon T] [--seed S] [--json]"
            );
            return ExitCode::FAILURE;
        }
    };

    let report = match run_replication(args.params, args.horizon) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("failed to serialize report: {error}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{report}");
    }

    ExitCode::SUCCESS
}
