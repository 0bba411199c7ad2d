//! `BoardEngine` client for an engine served by [`crate::run_server`].

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use tui_match_core::{BoardEngine, EngineError, ResponseError};
use tui_match_types::{GameState, MoveRequest};

use crate::protocol::{Request, Response};

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Connection {
    fn new(stream: TcpStream) -> Self {
        let (read_half, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer,
        }
    }
}

/// Remote engine. Connects lazily and reconnects after any failed exchange.
pub struct RemoteEngine {
    addr: String,
    timeout: Duration,
    next_seq: AtomicU64,
    conn: Mutex<Option<Connection>>,
}

impl RemoteEngine {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            next_seq: AtomicU64::new(1),
            conn: Mutex::new(None),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn round_trip(&self, request: Request) -> Result<GameState, EngineError> {
        let seq = request.seq();
        let mut slot = self.conn.lock().await;

        let exchanged =
            tokio::time::timeout(self.timeout, exchange(&mut slot, &self.addr, &request)).await;
        let result = match exchanged {
            Err(_) => Err(EngineError::Timeout(self.timeout.as_millis() as u64)),
            Ok(Err(err)) => Err(err),
            Ok(Ok(line)) => decode(seq, &line),
        };

        if let Err(err) = &result {
            // The stream may hold a late or partial reply; start over next time.
            warn!(addr = %self.addr, seq, %err, "engine exchange failed, dropping connection");
            *slot = None;
        }
        result
    }
}

async fn exchange(
    slot: &mut Option<Connection>,
    addr: &str,
    request: &Request,
) -> Result<String, EngineError> {
    if slot.is_none() {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        debug!(%addr, "connected to engine");
        *slot = Some(Connection::new(stream));
    }
    let Some(conn) = slot.as_mut() else {
        return Err(io::Error::from(io::ErrorKind::NotConnected).into());
    };

    let mut line = serde_json::to_vec(request).map_err(io::Error::other)?;
    line.push(b'\n');
    conn.writer.write_all(&line).await?;
    conn.writer.flush().await?;

    let mut reply = String::new();
    if conn.reader.read_line(&mut reply).await? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "engine closed the connection").into());
    }
    Ok(reply)
}

fn decode(seq: u64, line: &str) -> Result<GameState, EngineError> {
    let response: Response = serde_json::from_str(line.trim_end())
        .map_err(|err| ResponseError::Decode(err.to_string()))?;
    if response.seq() != seq {
        return Err(ResponseError::SeqMismatch {
            expected: seq,
            actual: response.seq(),
        }
        .into());
    }
    match response {
        Response::State { board, score, .. } => Ok(GameState::new(board, score)),
        Response::Error { code, message, .. } => Err(EngineError::Engine {
            code: code.to_string(),
            message,
        }),
    }
}

#[async_trait]
impl BoardEngine for RemoteEngine {
    async fn generate_board(&self) -> Result<GameState, EngineError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.round_trip(Request::GenerateBoard { seq }).await
    }

    async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.round_trip(Request::move_tile(seq, request)).await
    }
}
