mod cli;
mod commands;
mod context;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "backdrop=info";

fn init_logging(log_level: Option<&str>) {
    let directive = log_level
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
    let filter = match directive {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("Backdrop v{} starting...", env!("CARGO_PKG_VERSION"));

    let session = match context::Session::open(&args) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::dispatch(session, args.command).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
