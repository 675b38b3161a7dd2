use {clap::Parser, std::process::ExitCode, swap_deposit::arguments::Arguments};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine, everything can be passed explicitly.
    dotenv::dotenv().ok();
    let args = Arguments::parse();

    let config = observe::Config::new(
        &args.log_filter,
        args.log_stderr_threshold,
        args.use_json_logs,
    );
    observe::tracing::initialize(&config);
    tracing::info!("running swap-deposit with validated arguments:\n{}", args);

    match swap_deposit::start(args).await {
        Ok(summary) => {
            tracing::info!(?summary, "swapped and deposited");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(?err, "swap-deposit failed");
            ExitCode::FAILURE
        }
    }
}
