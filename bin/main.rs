use clap::Parser;
use tracing::Level;

mod cli;
mod io;

fn main() -> anyhow::Result<()> {
    let args = cli::Automaflow::parse();

    let level = if args.verbose {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = automaflow::store::Store::open(&args.store)?;
    args.command.run(&store)
}
