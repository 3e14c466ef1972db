//! Terminal client for the hold'em table view.
//!
//! Joins the table, paints the current state, then keeps the view in sync
//! with pushed broadcasts while forwarding player actions typed on stdin.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use table_view::domain::{ActionRequest, ActionType, PlayerId};
use table_view::sync::fetch::{SnapshotSource, StateClient};
use table_view::sync::realtime::{RealtimeClient, RealtimeClientConfig};
use table_view::sync::synchronizer::TableSynchronizer;
use table_view::view::display::TerminalDisplay;

const LOG_TARGET: &str = "bin::table_client";

#[derive(Debug, Parser)]
#[command(name = "table_client")]
#[command(about = "Join a hold'em table and mirror its state in the terminal", long_about = None)]
struct Args {
    /// Base HTTP endpoint of the table server
    #[arg(long, env = "TABLE_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    server_url: Url,

    /// Websocket endpoint for state broadcasts; derived from the server
    /// url when omitted
    #[arg(long, env = "TABLE_REALTIME_URL")]
    realtime_url: Option<Url>,

    /// Nickname to join the table under
    #[arg(long)]
    nickname: String,

    /// Toggle structured (JSON) tracing output
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn derive_realtime_url(server_url: &Url) -> Result<Url> {
    let mut url = server_url.join("ws")?;
    let scheme = match server_url.scheme() {
        "https" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|_| anyhow!("cannot derive websocket scheme from {server_url}"))?;
    Ok(url)
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Action(ActionType, i64),
    Quit,
}

/// Parses one line of player input. `raise` takes a positive chip amount;
/// every other action carries zero.
fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");
    match verb {
        "fold" => Ok(Command::Action(ActionType::Fold, 0)),
        "call" => Ok(Command::Action(ActionType::Call, 0)),
        "check" => Ok(Command::Action(ActionType::Check, 0)),
        "raise" => {
            let amount: i64 = parts
                .next()
                .ok_or("raise needs an amount, e.g. `raise 50`")?
                .parse()
                .map_err(|_| "raise amount must be a number")?;
            if amount <= 0 {
                return Err("raise amount must be positive".to_string());
            }
            Ok(Command::Action(ActionType::Raise, amount))
        }
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command `{other}`")),
    }
}

async fn action_loop(
    local_id: PlayerId,
    actions: mpsc::Sender<ActionRequest>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("commands: fold | call | check | raise <amount> | quit");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                info!(target = LOG_TARGET, "interrupt received");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Action(action_type, amount)) => {
                        let request = ActionRequest {
                            player_id: local_id.clone(),
                            action_type,
                            amount,
                        };
                        // fire-and-forget; the next broadcast reflects it
                        if actions.send(request).await.is_err() {
                            warn!(target = LOG_TARGET, "action channel closed");
                            break;
                        }
                    }
                    Err(reason) => println!("{reason}"),
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    let state_client = StateClient::new(args.server_url.clone());
    let local_id = state_client
        .join(&args.nickname)
        .await
        .context("join handshake failed")?;
    info!(target = LOG_TARGET, player = %local_id, "joined table");

    let realtime_url = match args.realtime_url {
        Some(url) => url,
        None => derive_realtime_url(&args.server_url)?,
    };

    let cancel = CancellationToken::new();
    let (realtime, state_rx) =
        RealtimeClient::new(RealtimeClientConfig::new(realtime_url), cancel.clone());
    let actions = realtime.action_sender();
    let realtime_task = tokio::spawn(realtime.run());

    let mut synchronizer = TableSynchronizer::new(local_id.clone(), TerminalDisplay);
    // initial paint before the first push lands; a failure here just
    // leaves the table blank until a broadcast arrives
    match state_client.fetch_state().await {
        Ok(state) => synchronizer.apply_snapshot(&state),
        Err(err) => warn!(
            target = LOG_TARGET,
            error = %err,
            "initial state fetch failed, waiting for first broadcast"
        ),
    }
    let sync_task = tokio::spawn(synchronizer.run(state_rx, cancel.clone()));

    let result = action_loop(local_id, actions, cancel.clone()).await;

    cancel.cancel();
    let _ = sync_task.await;
    let _ = realtime_task.await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_to_actions() {
        assert_eq!(
            parse_command("fold"),
            Ok(Command::Action(ActionType::Fold, 0))
        );
        assert_eq!(
            parse_command("raise 50"),
            Ok(Command::Action(ActionType::Raise, 50))
        );
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn bad_input_is_rejected_with_a_reason() {
        assert!(parse_command("raise").is_err());
        assert!(parse_command("raise -5").is_err());
        assert!(parse_command("shove").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn realtime_url_derives_from_http_server_url() {
        let server: Url = "http://127.0.0.1:8080".parse().unwrap();
        assert_eq!(
            derive_realtime_url(&server).unwrap().as_str(),
            "ws://127.0.0.1:8080/ws"
        );

        let secure: Url = "https://table.example".parse().unwrap();
        assert_eq!(
            derive_realtime_url(&secure).unwrap().as_str(),
            "wss://table.example/ws"
        );
    }
}
