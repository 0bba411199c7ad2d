//! Remote board engine over TCP with a JSON-line protocol.
//!
//! The board engine contract has two asynchronous operations. This crate
//! carries them across a socket so the rules engine can live in another
//! process:
//!
//! - [`RemoteEngine`] implements `BoardEngine` by sending requests to a server.
//! - [`run_server`] hosts any `BoardEngine` behind a listener.
//!
//! # Protocol Overview
//!
//! One JSON object per line, in both directions. Every request carries a
//! client-chosen `seq` that the response echoes.
//!
//! ## Client → Server
//!
//! - **generate_board**: `{"type":"generate_board","seq":1}`
//! - **move_tile**: `{"type":"move_tile","seq":2,"x1":0,"y1":0,"x2":1,"y2":0,"board":[[1,2],[2,1]],"score":0}`
//!
//! ## Server → Client
//!
//! - **state**: `{"type":"state","seq":2,"board":[[2,1],[2,1]],"score":0}`
//! - **error**: `{"type":"error","seq":2,"code":"engine_failed","message":"..."}`
//!
//! Requests on one connection are answered in order. A response that does
//! not decode, or answers a different `seq`, is treated as malformed by the
//! client.

pub mod protocol;
pub mod remote;
pub mod server;

pub use tui_match_types as types;

pub use protocol::{ErrorCode, Request, Response};
pub use remote::RemoteEngine;
pub use server::{run_server, ServerConfig};
