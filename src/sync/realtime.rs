//! Pub/sub ingest for game-state snapshots, plus the outbound action lane.
//!
//! The client keeps one websocket to the table server's broadcast channel.
//! Inbound `state` frames are forwarded unchanged on a broadcast channel:
//! no transformation, no sequence numbers, last write wins. The transport
//! is assumed to preserve per-subscriber order; this component does not
//! detect or correct reordering. Outbound actions ride the same socket
//! fire-and-forget, with no ack tracking and no retry.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, sleep, timeout, MissedTickBehavior};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{ActionRequest, GameState};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const LOG_TARGET: &str = "sync::realtime";

#[derive(Debug, Clone)]
pub struct RealtimeClientConfig {
    pub url: Url,
    pub topic: String,
    pub handshake_timeout: Duration,
    pub heartbeat_interval: Duration,
    pub reconnect_delay: Duration,
    pub broadcast_capacity: usize,
    pub action_capacity: usize,
}

impl RealtimeClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            topic: "game-state".to_string(),
            handshake_timeout: Duration::from_secs(10),
            heartbeat_interval: Duration::from_secs(15),
            reconnect_delay: Duration::from_secs(5),
            broadcast_capacity: 64,
            action_capacity: 32,
        }
    }
}

pub struct RealtimeClient {
    cfg: RealtimeClientConfig,
    tx: broadcast::Sender<GameState>,
    action_tx: mpsc::Sender<ActionRequest>,
    action_rx: mpsc::Receiver<ActionRequest>,
    stop: CancellationToken,
}

impl RealtimeClient {
    pub fn new(
        cfg: RealtimeClientConfig,
        stop: CancellationToken,
    ) -> (Self, broadcast::Receiver<GameState>) {
        let (tx, rx) = broadcast::channel(cfg.broadcast_capacity);
        let (action_tx, action_rx) = mpsc::channel(cfg.action_capacity);
        (
            Self {
                cfg,
                tx,
                action_tx,
                action_rx,
                stop,
            },
            rx,
        )
    }

    /// Additional receivers for the snapshot broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<GameState> {
        self.tx.subscribe()
    }

    /// Handle for publishing player actions over the socket.
    pub fn action_sender(&self) -> mpsc::Sender<ActionRequest> {
        self.action_tx.clone()
    }

    /// Connects and pumps until cancelled, reconnecting after transient
    /// failures. Queued actions survive a reconnect.
    pub async fn run(self) -> Result<()> {
        let Self {
            cfg,
            tx,
            action_tx,
            mut action_rx,
            stop,
        } = self;
        // held so the action channel never reads as closed mid-session
        let _action_tx = action_tx;

        info!(target = LOG_TARGET, url = %cfg.url, topic = %cfg.topic, "starting realtime client");
        while !stop.is_cancelled() {
            match connect(&cfg).await {
                Ok(stream) => {
                    if let Err(err) = pump(&cfg, &tx, &mut action_rx, &stop, stream).await {
                        warn!(target = LOG_TARGET, error = %err, "realtime stream ended with error");
                    }
                }
                Err(err) => {
                    warn!(target = LOG_TARGET, error = %err, "failed to connect to realtime endpoint");
                }
            }

            if stop.is_cancelled() {
                break;
            }

            debug!(
                target = LOG_TARGET,
                delay_secs = cfg.reconnect_delay.as_secs_f32(),
                "waiting before reconnect attempt"
            );
            sleep(cfg.reconnect_delay).await;
        }

        info!(target = LOG_TARGET, "realtime client stopped");
        Ok(())
    }
}

async fn connect(cfg: &RealtimeClientConfig) -> Result<WsStream> {
    let connect_fut = connect_async(cfg.url.to_string());
    let (stream, _) = timeout(cfg.handshake_timeout, connect_fut)
        .await
        .context("realtime handshake timed out")?
        .context("realtime handshake failed")?;
    Ok(stream)
}

async fn pump(
    cfg: &RealtimeClientConfig,
    tx: &broadcast::Sender<GameState>,
    actions: &mut mpsc::Receiver<ActionRequest>,
    stop: &CancellationToken,
    stream: WsStream,
) -> Result<()> {
    let (mut sink, mut source) = stream.split();

    let subscribe = subscribe_frame(&cfg.topic)?;
    sink.send(Message::Text(subscribe))
        .await
        .context("failed to send subscribe frame")?;

    let mut heartbeat = interval(cfg.heartbeat_interval);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let heartbeat_msg = heartbeat_frame(&cfg.topic)?;

    loop {
        tokio::select! {
            _ = stop.cancelled() => {
                debug!(target = LOG_TARGET, "shutdown signal received");
                break;
            }
            _ = heartbeat.tick() => {
                if let Err(err) = sink.send(Message::Text(heartbeat_msg.clone())).await {
                    warn!(target = LOG_TARGET, error = %err, "heartbeat send failed, ending loop");
                    break;
                }
            }
            action = actions.recv() => {
                let Some(request) = action else { continue };
                // fire-and-forget: a dropped publish is logged, and the
                // server's next state broadcast resynchronizes the view
                match action_frame(&cfg.topic, &request) {
                    Ok(frame) => {
                        if let Err(err) = sink.send(Message::Text(frame)).await {
                            warn!(target = LOG_TARGET, error = %err, "action publish failed");
                            break;
                        }
                        debug!(target = LOG_TARGET, action = ?request.action_type, "action published");
                    }
                    Err(err) => {
                        warn!(target = LOG_TARGET, error = %err, "failed to encode action");
                    }
                }
            }
            msg = source.next() => {
                match msg {
                    Some(Ok(Message::Text(txt))) => {
                        if let Err(err) = handle_text(&cfg.topic, tx, &txt) {
                            warn!(target = LOG_TARGET, error = %err, "failed to handle realtime frame");
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        sink.send(Message::Pong(payload)).await.ok();
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!(target = LOG_TARGET, ?frame, "socket closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(target = LOG_TARGET, error = %err, "websocket error");
                        break;
                    }
                    None => {
                        debug!(target = LOG_TARGET, "websocket stream ended");
                        break;
                    }
                }
            }
        }
    }

    if let Ok(unsubscribe) = unsubscribe_frame(&cfg.topic) {
        sink_send_quiet(&mut sink, unsubscribe).await;
    }
    let _ = sink.close().await;

    Ok(())
}

async fn sink_send_quiet(sink: &mut SplitSink<WsStream, Message>, frame: String) {
    let _ = sink.send(Message::Text(frame)).await;
}

/// Decodes one inbound frame and forwards `state` payloads on the
/// broadcast channel. Malformed payloads are reported to the caller for
/// logging; they never tear the connection down.
fn handle_text(topic: &str, tx: &broadcast::Sender<GameState>, txt: &str) -> Result<()> {
    let frame: InboundFrame =
        serde_json::from_str(txt).context("failed to deserialize realtime frame")?;

    if frame.topic != topic {
        debug!(target = LOG_TARGET, topic = %frame.topic, "ignoring frame for other topic");
        return Ok(());
    }

    match frame.event.as_str() {
        "state" => {
            let payload = frame
                .payload
                .ok_or_else(|| anyhow!("state frame missing payload"))?;
            let state: GameState = serde_json::from_value(payload)
                .context("failed to decode game-state payload")?;
            // no subscribers is fine; the synchronizer may not be up yet
            let _ = tx.send(state);
        }
        "subscribed" => {
            debug!(target = LOG_TARGET, "subscription acknowledged");
        }
        other => {
            debug!(target = LOG_TARGET, event = other, "ignoring realtime event");
        }
    }

    Ok(())
}

fn subscribe_frame(topic: &str) -> Result<String> {
    encode_frame(&OutboundFrame::<()> {
        topic,
        event: "subscribe",
        payload: None,
    })
}

fn heartbeat_frame(topic: &str) -> Result<String> {
    encode_frame(&OutboundFrame::<()> {
        topic,
        event: "heartbeat",
        payload: None,
    })
}

fn unsubscribe_frame(topic: &str) -> Result<String> {
    encode_frame(&OutboundFrame::<()> {
        topic,
        event: "unsubscribe",
        payload: None,
    })
}

fn action_frame(topic: &str, request: &ActionRequest) -> Result<String> {
    encode_frame(&OutboundFrame {
        topic,
        event: "action",
        payload: Some(request),
    })
}

fn encode_frame<T: serde::Serialize>(frame: &OutboundFrame<'_, T>) -> Result<String> {
    serde_json::to_string(frame).context("failed to serialize realtime frame")
}

#[derive(serde::Serialize)]
struct OutboundFrame<'a, T> {
    topic: &'a str,
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
}

#[derive(Debug, serde::Deserialize)]
struct InboundFrame {
    topic: String,
    event: String,
    #[serde(default)]
    payload: Option<Value>,
}
