mod config;
mod cycle;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use watch_engine::{NotifySettings, PollSettings, ReqwestPoller, TelegramNotifier};
use watch_logging::{watch_error, watch_info, watch_warn};

use config::{LogSettings, WatchConfig};
use cycle::PollCycle;
use logging::LogDestination;

fn main() -> ExitCode {
    config::load_dotenv();

    let log_settings = LogSettings::from_lookup(config::process_env);
    let (destination, level) = match &log_settings {
        Ok(settings) => (settings.destination, settings.level),
        Err(_) => (LogDestination::Terminal, log::LevelFilter::Info),
    };
    logging::initialize(destination, level);
    if let Err(err) = log_settings {
        watch_warn!("ignoring logging configuration: {}", err);
    }

    let config = match WatchConfig::from_lookup(config::process_env) {
        Ok(config) => config,
        Err(err) => {
            watch_error!("startup aborted: {}", err);
            eprintln!("homework_watch: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            watch_error!("fatal: {:#}", err);
            eprintln!("homework_watch: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: WatchConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let poller = ReqwestPoller::new(
        PollSettings {
            endpoint: config.endpoint.to_string(),
            connect_timeout: config.connect_timeout,
            request_timeout: config.request_timeout,
            ..PollSettings::default()
        },
        &config.credentials.api_token,
    )
    .context("failed to build review poller")?;
    let notifier = TelegramNotifier::new(
        NotifySettings {
            api_base: config.telegram_api.to_string(),
            request_timeout: config.request_timeout,
        },
        &config.credentials.notifier_token,
    )
    .context("failed to build notifier")?;

    let cycle = PollCycle::new(
        poller,
        notifier,
        config.credentials.chat_id.clone(),
        config.retry_period,
    );

    runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    watch_info!("interrupt received, stopping after the current poll");
                    on_signal.cancel();
                }
                Err(err) => watch_warn!("cannot listen for interrupts: {}", err),
            }
        });

        watch_info!(
            "watching {} every {}s",
            config.endpoint,
            config.retry_period.as_secs()
        );
        if config.greeting {
            cycle.greet().await;
        }
        cycle.run(cancel).await;
    });

    Ok(())
}
