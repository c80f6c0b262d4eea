use clap::Parser;
use emergency_dispatch::{
    config::{Config, OutputFormat},
    console::{parse_command, ConsoleCommand, HELP},
    render::{render_event, renderer_for},
    session::{Session, UiAction},
    tracker::TrackerSettings,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "emergency-dispatch")]
#[command(about = "Emergency incident dispatch console", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Resource pool balance at session start
    #[arg(short, long)]
    initial_resources: Option<i64>,

    /// Output format: text or html
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Keep state after resolving an incident instead of resetting the session
    #[arg(long)]
    no_reset: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path, true)?,
        None => Config::load()?,
    };
    if let Some(initial_resources) = cli.initial_resources {
        config.tracker.initial_resources = initial_resources;
    }
    if let Some(format) = cli.format {
        config.console.format = format;
    }
    if cli.no_reset {
        config.tracker.reset_on_resolve = false;
    }
    config.validate_settings()?;

    init_tracing(&config);

    tracing::info!("Starting emergency dispatch console v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        initial_resources = config.tracker.initial_resources,
        reset_on_resolve = config.tracker.reset_on_resolve,
        format = %config.console.format,
        "Configuration loaded"
    );

    let (session, handle) = Session::new(TrackerSettings::from(&config.tracker));
    let mut events = handle.subscribe();
    let session_task = tokio::spawn(session.run());

    let renderer = renderer_for(config.console.format);
    let render_task = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(output) = render_event(renderer.as_ref(), &event) {
                        if let Err(e) = write_output(&mut stdout, &output).await {
                            tracing::error!(error = %e, "Failed to write rendered output");
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer lagged behind session events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{}", HELP);
    handle.dispatch(UiAction::ShowDashboard)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(ConsoleCommand::Action(action))) => handle.dispatch(action)?,
            Ok(Some(ConsoleCommand::Help)) => println!("{}", HELP),
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    drop(handle);
    session_task.await?;
    render_task.await?;

    tracing::info!("Emergency dispatch console stopped");
    Ok(())
}

async fn write_output<W>(out: &mut W, output: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(output.as_bytes()).await?;
    out.flush().await
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("emergency_dispatch={}", config.observability.log_level).into()
    });

    // Logs go to stderr so rendered views on stdout stay clean
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct FailingFlush(Vec<u8>);

    impl AsyncWrite for FailingFlush {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            self.0.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdout closed",
            )))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_write_output_flushes() {
        let mut out = Vec::new();
        write_output(&mut out, "Formulario cerrado.\n").await.unwrap();
        assert_eq!(out, b"Formulario cerrado.\n");
    }

    #[tokio::test]
    async fn test_write_output_reports_flush_failure() {
        let mut out = FailingFlush(Vec::new());
        let err = write_output(&mut out, "Sesión reiniciada.\n").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
