use shellboot::args::usage;
use shellboot::config::ShellConfig;
use shellboot::logging::init_tracing;
use shellboot::{Bootstrap, ShellIo};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ShellConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let bootstrap = Bootstrap::new(config).with_term(std::env::var("TERM").ok());

    match bootstrap.run(&args, ShellIo::std()) {
        Ok(summary) => {
            tracing::info!(mode = ?summary.mode, "Shell finished");
            Ok(())
        }
        Err(e) => {
            if e.is_usage() {
                eprint!("{}", usage());
            }
            Err(anyhow::Error::from(e))
        }
    }
}
