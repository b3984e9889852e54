use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use codeshare_client::services::channel_services::channel_client_service::ChannelCallbacks;
use codeshare_client::services::channel_services::reconnect_service::SupervisedChannel;
use codeshare_client::services::helper_services::config_service::init_global_config;

/// Terminal client for a shared coding session: joins a session, mirrors
/// the remote buffer to stdout and broadcasts locally typed lines. Mostly a
/// smoke tool for the relay contract.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = init_global_config();
    let session_id = match std::env::args().nth(1) {
        Some(id) => id,
        None => {
            let generated = uuid::Uuid::new_v4().to_string();
            println!("No session id given, starting new session {}", generated);
            generated
        }
    };

    let callbacks = ChannelCallbacks::new(
        |code| {
            println!("--- remote buffer ---");
            println!("{}", code);
        },
        |language| {
            println!("--- language: {} ---", language.as_str());
        },
    );

    let channel = SupervisedChannel::connect(
        config.relay.clone(),
        config.reconnect.clone(),
        session_id.clone(),
        callbacks,
    )
    .await?;
    println!(
        "Joined session {}; type lines to broadcast, Ctrl-C to quit",
        session_id
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = String::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    buffer.push_str(&line);
                    buffer.push('\n');
                    channel.send(&buffer).await;
                }
                None => break,
            },
        }
    }

    channel.close().await;
    Ok(())
}
