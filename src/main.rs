use clap::{Parser, Subcommand};
use pnm_shell::config::{self, DEFAULT_CONFIG_FILE};
use pnm_shell::shell::Shell;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pnm-shell")]
#[command(about = "Interactive interpreter for plain-text Netpbm images")]
#[command(long_about = "\
Interactive interpreter for plain-text Netpbm images

Reads one command per line from a script or standard input:

  i <path> as $h        import a P2 (grayscale) or P3 (colour) file
  e $h as <path>        export; refuses to overwrite
  r $h clockwise <n>    rotate n quarter turns (negative = counter-clockwise)
  s $h by <factor>      resize with a 2x2 box filter
  g $h | y $h | c $h    convert to grayscale / luma-chroma / colour
  m $h                  mirror left-right
  n $h                  invert brightness
  z $h                  histogram equalization
  d $h                  delete handle
  l                     list handles
  q                     quit

Set RUST_LOG=debug for a trace of every command.
Run 'pnm-shell gen-config' to generate a documented pnm-shell.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults apply when it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Execute commands from a script, or standard input when omitted
    Run {
        script: Option<PathBuf>,
    },
    /// Print a stock pnm-shell.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let script = match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Some(Command::Run { script }) => script,
        None => None,
    };

    let shell_config = config::load_config(&cli.config)?;
    log::debug!("loaded config from {}", cli.config.display());
    let mut shell = Shell::new(shell_config);
    let mut stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let reader = BufReader::new(File::open(&path)?);
            shell.run(reader, &mut stdout, false)?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell.run(stdin.lock(), &mut stdout, interactive)?;
        }
    }

    Ok(())
}
