use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Installs the global subscriber, writing to stderr so stdout stays parseable.
///
/// `RUST_LOG` wins over `debug`. Library crates log through `log`, which
/// `LogTracer` forwards here.
pub fn init_tracing(debug: bool, json: bool) -> anyhow::Result<()> {
    LogTracer::init()?;

    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let bunyan = json.then(|| {
        BunyanFormattingLayer::new(env!("CARGO_PKG_NAME").to_string(), std::io::stderr)
    });
    let human = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(json.then_some(JsonStorageLayer))
        .with(bunyan)
        .with(human);
    set_global_default(subscriber)?;
    Ok(())
}
