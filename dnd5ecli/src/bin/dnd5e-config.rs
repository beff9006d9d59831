use std::{env, io};

use clap::Parser;

use dnd5ecli::{run, Opts};

fn main() -> Result<(), anyhow::Error> {
  if env::var("DND5E_LOG").is_err() {
    env::set_var("DND5E_LOG", "warn,dnd5e=info");
  }
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(tracing_subscriber::EnvFilter::from_env("DND5E_LOG"))
    .init();

  let opts = Opts::parse();
  let stdout = io::stdout();
  run(opts, &mut stdout.lock())
}
