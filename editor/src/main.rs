mod app;
mod config;

use std::path::PathBuf;

use anyhow::Result;

use app::App;
use config::Config;

const HELP: &str = "\
editor

USAGE:
  editor [OPTIONS]

OPTIONS:
  -c, --config <PATH>   toml file with the shapes and output paths
  --json <PATH>         where to save the json file
  --xml <PATH>          where to save the xml file
  -h, --help            print this help
";

struct Args {
    config: Option<PathBuf>,
    json: Option<PathBuf>,
    xml: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    let parsed = Args {
        config: args.opt_value_from_str(["-c", "--config"])?,
        json: args.opt_value_from_str("--json")?,
        xml: args.opt_value_from_str("--xml")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        anyhow::bail!("unexpected arguments: {:?}", rest);
    }
    Ok(Some(parsed))
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let args = match parse_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(json) = args.json {
        config.json = json;
    }
    if let Some(xml) = args.xml {
        config.xml = xml;
    }
    log::debug!("{:?}", config);

    let stdout = std::io::stdout();
    match App::new(config, stdout.lock()).run() {
        Ok(()) => Ok(()),
        // bad shapes are reported, broken files and io end the process
        Err(e) => match e.downcast_ref::<shapes::Error>() {
            Some(err) if err.is_domain() => {
                println!("Ошибка: {}", err);
                Ok(())
            }
            _ => Err(e),
        },
    }
}
