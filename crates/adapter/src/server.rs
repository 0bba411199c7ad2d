//! TCP server hosting a `BoardEngine`.
//!
//! Each connection is served by its own task; requests on a connection are
//! answered in order.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use tui_match_core::BoardEngine;
use tui_match_types::MoveRequest;

use crate::protocol::{ErrorCode, Request, Response};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl ServerConfig {
    /// Create from `MATCH_ENGINE_HOST` / `MATCH_ENGINE_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("MATCH_ENGINE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("MATCH_ENGINE_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Accept connections until the listener fails. `ready_tx` receives the bound
/// address (useful with port 0).
pub async fn run_server<E>(
    config: ServerConfig,
    engine: Arc<E>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()>
where
    E: BoardEngine + ?Sized + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "engine server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %peer, "client connected");

        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            if let Err(err) = handle_client(socket, engine.as_ref()).await {
                warn!(client_id, %err, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

async fn handle_client<E>(socket: TcpStream, engine: &E) -> anyhow::Result<()>
where
    E: BoardEngine + ?Sized,
{
    socket.set_nodelay(true)?;
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut out = Vec::with_capacity(1024);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = respond(engine, &line).await;

        out.clear();
        serde_json::to_writer(&mut out, &response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }
    Ok(())
}

async fn respond<E>(engine: &E, line: &str) -> Response
where
    E: BoardEngine + ?Sized,
{
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(err) => {
            let seq = extract_seq_best_effort(line).unwrap_or(0);
            debug!(seq, %err, "unparsable request");
            return Response::error(seq, ErrorCode::InvalidRequest, err.to_string());
        }
    };

    let seq = request.seq();
    let result = match request {
        Request::GenerateBoard { .. } => engine.generate_board().await,
        Request::MoveTile {
            x1,
            y1,
            x2,
            y2,
            board,
            score,
            ..
        } => {
            engine
                .move_tile(MoveRequest {
                    x1,
                    y1,
                    x2,
                    y2,
                    board,
                    score,
                })
                .await
        }
    };

    match result {
        Ok(state) => Response::state(seq, state),
        Err(err) => {
            warn!(seq, %err, "engine failed");
            Response::error(seq, ErrorCode::EngineFailed, err.to_string())
        }
    }
}

/// Pull `"seq": N` out of a line that failed to parse, so the error can still
/// be matched to its request.
fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let rest = s[start + 5..].trim_start().strip_prefix(':')?.trim_start();
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_recovered_from_bad_lines() {
        assert_eq!(extract_seq_best_effort(r#"{"type":"nope","seq": 42}"#), Some(42));
        assert_eq!(extract_seq_best_effort(r#"{"seq":7,"type":1"#), Some(7));
        assert_eq!(extract_seq_best_effort(r#"{"type":"nope"}"#), None);
        assert_eq!(extract_seq_best_effort(r#"{"seq":"x"}"#), None);
    }

    #[test]
    fn config_from_lookup() {
        let cfg = ServerConfig::from_lookup(|key| match key {
            "MATCH_ENGINE_PORT" => Some("9000".to_string()),
            "MATCH_ENGINE_HOST" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.socket_addr().unwrap().port(), 9000);

        let bad = ServerConfig::from_lookup(|key| {
            (key == "MATCH_ENGINE_PORT").then(|| "seventy".to_string())
        });
        assert_eq!(bad.port, 7878);
    }
}
