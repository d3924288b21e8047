//! Wire format: newline-delimited JSON
//!
//! One request per line, one response per line, in request order:
//!
//! ```text
//! -> {"id":1,"command":{"method":"Search","value":5}}
//! <- {"status":"ok","id":1,"output":{"type":"Records","records":[{"index":0,"value":5}]}}
//! -> {"id":2,"command":{"method":"Update","records":[{"index":9,"value":1}]}}
//! <- {"status":"error","id":2,"code":"OutOfRange","message":"index 9 out of range for 4 records"}
//! ```

use seqdb_executor::{Command, Error, Output};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// A request line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Caller-chosen id echoed in the response
    #[serde(default)]
    pub id: u64,
    /// The command to run
    pub command: Command,
}

/// Caller-visible failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// An Update or Delete index was out of bounds
    OutOfRange,
    /// An Add would exceed the store's index space
    CapacityExceeded,
    /// The request line was not a valid request
    InvalidRequest,
    /// The request line exceeded the frame limit
    FrameTooLarge,
    /// The server failed to run the command
    Internal,
}

impl From<&Error> for ErrorCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::IndexOutOfRange { .. } => ErrorCode::OutOfRange,
            Error::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            Error::Internal { .. } => ErrorCode::Internal,
        }
    }
}

/// A response line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// The command succeeded
    Ok {
        /// Id of the request this answers
        id: u64,
        /// Command result
        output: Output,
    },
    /// The command or the request itself failed
    Error {
        /// Id of the request this answers, `0` if it could not be read
        id: u64,
        /// Failure category
        code: ErrorCode,
        /// Human-readable detail
        message: String,
    },
}

impl Response {
    /// Build the response to request `id` from an executor result
    pub fn from_result(id: u64, result: seqdb_executor::Result<Output>) -> Self {
        match result {
            Ok(output) => Response::Ok { id, output },
            Err(err) => Response::error(id, ErrorCode::from(&err), err.to_string()),
        }
    }

    /// Build an error response
    pub fn error(id: u64, code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Error {
            id,
            code,
            message: message.into(),
        }
    }

    /// Id of the request this answers
    pub fn id(&self) -> u64 {
        match self {
            Response::Ok { id, .. } | Response::Error { id, .. } => *id,
        }
    }
}

/// Outcome of reading one line
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    /// A complete line is in the buffer, without its terminator
    Line,
    /// The peer closed the stream with no pending data
    Eof,
    /// The line exceeded the limit; the stream position is mid-line
    TooLarge,
}

/// Read one `\n`-terminated line of at most `max` bytes into `buf`
///
/// `buf` is cleared first. A final unterminated line before EOF counts as a
/// line.
pub async fn read_frame<R>(reader: &mut R, max: usize, buf: &mut Vec<u8>) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;

    if read == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        return Ok(Frame::Line);
    }
    if read > max {
        return Ok(Frame::TooLarge);
    }
    Ok(Frame::Line)
}

/// Serialize `message` as one line and flush it
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut bytes = serde_json::to_vec(message)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await
}

/// Best-effort recovery of the `id` field from a line that failed to decode
pub(crate) fn salvage_id(line: &[u8]) -> u64 {
    serde_json::from_slice::<serde_json::Value>(line)
        .ok()
        .and_then(|v| v.get("id").and_then(serde_json::Value::as_u64))
        .unwrap_or(0)
}
