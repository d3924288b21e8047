//! Async client for one SeqDB connection.
//!
//! Calls are sequential: each method sends one request and waits for its
//! response. Open one client per concurrent caller.
//!
//! Responses are unbounded by default: a Search may return every record in
//! the store. A failed call that leaves the stream out of step with the
//! server poisons the client, and every later call fails with
//! [`ClientError::Broken`].

use seqdb_core::Record;
use seqdb_executor::{Command, Output, StoreInfo};
use thiserror::Error;
use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::wire::{self, ErrorCode, Frame, Request, Response};

/// Client-side failures
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server's response could not be decoded
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server closed the connection before answering
    #[error("connection closed by server")]
    Closed,

    /// The response exceeded the limit set with [`Client::with_max_frame_bytes`]
    #[error("response exceeds {0} bytes")]
    FrameTooLarge(usize),

    /// An earlier call left the connection unusable
    #[error("connection unusable after an earlier failure")]
    Broken,

    /// The server answered with an error
    #[error("{code:?}: {message}")]
    Remote {
        /// Failure category
        code: ErrorCode,
        /// Server-provided detail
        message: String,
    },

    /// The response answered a different request
    #[error("response id {got} does not match request id {expected}")]
    IdMismatch {
        /// Id that was sent
        expected: u64,
        /// Id that came back
        got: u64,
    },

    /// The server returned an output of the wrong kind
    #[error("unexpected output for {method}")]
    UnexpectedOutput {
        /// Method that was called
        method: &'static str,
    },
}

impl ClientError {
    /// Error code if the server rejected the call
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True if the stream may hold unread bytes of a previous response
    fn poisons_connection(&self) -> bool {
        matches!(
            self,
            ClientError::Io(_)
                | ClientError::Closed
                | ClientError::FrameTooLarge(_)
                | ClientError::IdMismatch { .. }
                | ClientError::Broken
        )
    }
}

/// Result type for client calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// A connection to a SeqDB server
#[derive(Debug)]
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    next_id: u64,
    max_frame_bytes: usize,
    buf: Vec<u8>,
    broken: bool,
}

impl Client {
    /// Connect to `addr`
    pub async fn connect(addr: impl ToSocketAddrs) -> ClientResult<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
            next_id: 1,
            max_frame_bytes: usize::MAX,
            buf: Vec::new(),
            broken: false,
        })
    }

    /// Cap the size of one response line
    ///
    /// A response over the cap fails the call and poisons the client.
    pub fn with_max_frame_bytes(mut self, max: usize) -> Self {
        self.max_frame_bytes = max;
        self
    }

    /// True once a failed call has left the connection out of step
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Send one command and wait for its output
    pub async fn call(&mut self, command: Command) -> ClientResult<Output> {
        if self.broken {
            return Err(ClientError::Broken);
        }
        let result = self.exchange(command).await;
        if let Err(err) = &result {
            self.broken = err.poisons_connection();
        }
        result
    }

    async fn exchange(&mut self, command: Command) -> ClientResult<Output> {
        let id = self.next_id;
        self.next_id += 1;

        wire::write_frame(&mut self.writer, &Request { id, command }).await?;

        match wire::read_frame(&mut self.reader, self.max_frame_bytes, &mut self.buf).await? {
            Frame::Line => {}
            Frame::Eof => return Err(ClientError::Closed),
            Frame::TooLarge => return Err(ClientError::FrameTooLarge(self.max_frame_bytes)),
        }

        let response: Response = serde_json::from_slice(&self.buf)?;
        if response.id() != id {
            return Err(ClientError::IdMismatch {
                expected: id,
                got: response.id(),
            });
        }
        match response {
            Response::Ok { output, .. } => Ok(output),
            Response::Error { code, message, .. } => Err(ClientError::Remote { code, message }),
        }
    }

    /// Find every record holding `value`
    pub async fn search(&mut self, value: i32) -> ClientResult<Vec<Record>> {
        match self.call(Command::Search { value }).await? {
            Output::Records { records } => Ok(records),
            _ => Err(ClientError::UnexpectedOutput { method: "Search" }),
        }
    }

    /// Append values
    pub async fn add(&mut self, values: Vec<i32>) -> ClientResult<()> {
        self.expect_unit(Command::Add { values }).await
    }

    /// Overwrite positions
    pub async fn update(&mut self, records: Vec<Record>) -> ClientResult<()> {
        self.expect_unit(Command::Update { records }).await
    }

    /// Remove positions
    pub async fn delete(&mut self, indexes: Vec<i32>) -> ClientResult<()> {
        self.expect_unit(Command::Delete { indexes }).await
    }

    /// Check liveness; returns the server version
    pub async fn ping(&mut self) -> ClientResult<String> {
        match self.call(Command::Ping).await? {
            Output::Pong { version } => Ok(version),
            _ => Err(ClientError::UnexpectedOutput { method: "Ping" }),
        }
    }

    /// Get store size and settings
    pub async fn info(&mut self) -> ClientResult<StoreInfo> {
        match self.call(Command::Info).await? {
            Output::Info(info) => Ok(info),
            _ => Err(ClientError::UnexpectedOutput { method: "Info" }),
        }
    }

    async fn expect_unit(&mut self, command: Command) -> ClientResult<()> {
        let method = command.name();
        match self.call(command).await? {
            Output::Unit => Ok(()),
            _ => Err(ClientError::UnexpectedOutput { method }),
        }
    }
}
