use anyhow::Result;
use spp_printer::auth::PermissionGate;
use spp_printer::command::{CommandExecutor, HandlerContext};
use spp_printer::connection::ConnectionManager;
use spp_printer::protocol::Outbound;
use spp_printer::transport::BluetoothStack;
use spp_printer::{Bridge, BridgeMessage, Config};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the bridge protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config_path = Config::locate(std::env::args().nth(1));
    let config = Config::load(config_path.as_deref())?;

    info!("Printer bridge starting");
    info!("  Transport: {:?}", config.transport.mode);
    if let Some(path) = &config_path {
        info!("  Config: {}", path.display());
    }

    let stack = BluetoothStack::from_config(&config.transport);
    let manager = ConnectionManager::new(
        stack.adapter,
        stack.connector,
        config.transport.connect_timeout(),
    );
    let executor = CommandExecutor::new(
        manager,
        HandlerContext {
            default_receipt_title: config.receipt.default_title.clone(),
        },
    );
    let mut bridge = Bridge::new(
        executor,
        PermissionGate::new(config.auth.require_authorization),
    );

    // Spawn host input reader
    let inbound = bridge.get_sender();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match BridgeMessage::from_line(&line) {
                    Ok(message) => {
                        if inbound.send(message).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Ignoring malformed host message: {}", e),
                },
                Ok(None) => {
                    debug!("Host closed input");
                    break;
                }
                Err(e) => {
                    error!("Failed to read host input: {}", e);
                    break;
                }
            }
        }
        let _ = inbound.send(BridgeMessage::Shutdown).await;
    });

    // Main event loop
    let mut stdout = tokio::io::stdout();
    while let Some(outbound) = bridge.recv().await {
        write_event(&mut stdout, &outbound).await?;
    }

    info!("Printer bridge stopped");
    Ok(())
}

async fn write_event(stdout: &mut tokio::io::Stdout, outbound: &Outbound) -> Result<()> {
    let mut line = serde_json::to_vec(outbound)?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
