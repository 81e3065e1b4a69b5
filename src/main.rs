use clap::Parser;
use wpmobile_core::cli::{self, AppContext, Cli};
use wpmobile_core::utils::{i18n, logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.log_level.as_deref() {
        Some(level) => logger::init_with_level(level),
        None => logger::init(),
    }

    let ctx = match AppContext::load(cli.config_dir.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    i18n::set_language(Some(&ctx.settings.language));
    tracing::debug!(
        "Config directory: {:?}, language: {}",
        ctx.config.config_dir(),
        i18n::current_language()
    );

    match cli.command {
        Some(command) if !cli.interactive => {
            if let Err(e) = cli::run(&ctx, command) {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        }
        _ => cli::run_interactive(&ctx)?,
    }

    Ok(())
}
