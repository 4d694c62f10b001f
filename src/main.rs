use clap::Parser;
use go_dep_report::{run, Config};
use tracing_subscriber::EnvFilter;

fn main() {
  init_logging();

  let config = match Config::try_parse() {
    Ok(config) => config,
    Err(e) => {
      // --help and --version land here too and must still succeed
      let _ = e.print();
      std::process::exit(if e.use_stderr() { 1 } else { 0 });
    }
  };

  match run(config) {
    Ok(report) => println!("Report generated at: {}", report.display()),
    Err(e) => {
      eprintln!("{e}");
      std::process::exit(1);
    }
  }
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
