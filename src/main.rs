use {
    clap::Parser,
    std::panic,
    volume_spike_scanner::{Cli, config::ScanConfig, run},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    };

    // RUST_LOG, when set, wins over the defaults above.
    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("volume_spike_scanner"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let config = ScanConfig::from_cli(&args)?;
    log::debug!("{:?}", config);

    run(config).await?;
    Ok(())
}
