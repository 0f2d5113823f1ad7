//! Thin binary entrypoint: parse args, read the input file, build the AAF,
//! compute the grounded labeling, dispatch to the engine, print the result.
//! No search semantics live here — see `taas_aaf::engine`.

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use clap::Parser;

use taas_aaf::cli::{self, Cli};
use taas_aaf::engine::{self, Config};
use taas_aaf::{Aaf, Error, Grounded, Outcome};

fn main() {
    taas_aaf::logging::init();
    let cli = Cli::parse();

    if cli.formats {
        println!("{}", cli::formats_text());
        return;
    }
    if cli.problems {
        println!("{}", cli::problems_text());
        return;
    }
    if cli.wants_solver_information() {
        println!("{}", cli::solver_information());
        return;
    }

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        println!("NO");
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let track = cli.track.as_deref().expect("checked by wants_solver_information");
    if track != "SE-ST" {
        return Err(Error::UnsupportedTrack { track: track.to_string() }.into());
    }

    let file_config = match &cli.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Config::from_toml_str(&text)?
        }
        None => Config::default(),
    };
    let cli_config = Config::from_option_pairs(&cli.option_pairs()?)?;
    let cfg = file_config.merge(cli_config);

    let path = cli.file.as_ref().expect("checked by wants_solver_information");
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    );
    let aaf = Aaf::from_reader(reader)?;
    let grounded = Grounded::compute(&aaf);

    match engine::solve(&aaf, &grounded, &cfg) {
        Outcome::Stable(labeling) => {
            let names = labeling.printable_in_order(&aaf);
            println!("[{}]", names.join(","));
        }
        Outcome::Unsatisfiable | Outcome::Timeout => {
            println!("NO");
        }
    }
    Ok(())
}
