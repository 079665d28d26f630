use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use ebom::cli::{Cli, Commands, GlobalOpts};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command {
        Commands::Bom(args) => ebom::cli::commands::bom::run(args, &global),
        Commands::Catalog(cmd) => ebom::cli::commands::catalog::run(cmd, &global),
        Commands::Validate(args) => ebom::cli::commands::validate::run(args, &global),
        Commands::Config(cmd) => ebom::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => ebom::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `EBOM_LOG` overrides the level picked from the flags
fn init_logging(global: &GlobalOpts) {
    let level = if global.verbose {
        "ebom=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("EBOM_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
