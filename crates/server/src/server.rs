//! TCP server.
//!
//! Each accepted connection gets its own task. Requests on a connection are
//! handled one at a time, so responses come back in request order; separate
//! connections run concurrently. Store calls block on the store lock and on
//! full scans, so they run on tokio's blocking pool rather than on a
//! reactor thread.

use std::future::Future;
use std::net::SocketAddr;

use seqdb_executor::{Executor, Output};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::wire::{self, ErrorCode, Frame, Request, Response};
use crate::{Result, ServerConfig};

/// Build the multi-threaded runtime the server runs on
pub fn build_runtime(worker_threads: usize) -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .thread_name("seqdb-worker")
        .enable_all()
        .build()
}

/// A bound SeqDB server
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    executor: Executor,
    max_frame_bytes: usize,
}

impl Server {
    /// Bind to `config.listen_addr`
    pub async fn bind(config: &ServerConfig, executor: Executor) -> Result<Self> {
        config.validate()?;
        let listener = TcpListener::bind(config.listen_addr).await?;
        Ok(Self {
            listener,
            executor,
            max_frame_bytes: config.max_frame_bytes,
        })
    }

    /// Address actually bound, useful when the configured port was 0
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process exits
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` completes
    ///
    /// Stops accepting on shutdown. Connections already open keep running
    /// until their peers disconnect.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(%addr, records = self.executor.store().len(), "listening");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(%addr, "shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let executor = self.executor.clone();
                            let max = self.max_frame_bytes;
                            tokio::spawn(async move {
                                handle_connection(stream, peer, executor, max).await;
                            });
                        }
                        // Per-connection accept failures (e.g. EMFILE) are not fatal
                        Err(err) => warn!(error = %err, "accept failed"),
                    }
                }
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, executor: Executor, max: usize) {
    info!(%peer, "connection opened");
    if let Err(err) = stream.set_nodelay(true) {
        debug!(%peer, error = %err, "set_nodelay failed");
    }

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();

    loop {
        let frame = match wire::read_frame(&mut reader, max, &mut line).await {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%peer, error = %err, "read failed");
                break;
            }
        };

        let response = match frame {
            Frame::Eof => break,
            Frame::TooLarge => {
                warn!(%peer, max, "request exceeds frame limit");
                let response = Response::error(
                    0,
                    ErrorCode::FrameTooLarge,
                    format!("request line exceeds {} bytes", max),
                );
                // The stream is mid-line, so the connection cannot continue
                if let Err(err) = wire::write_frame(&mut write_half, &response).await {
                    debug!(%peer, error = %err, "write failed");
                }
                break;
            }
            Frame::Line if line.iter().all(u8::is_ascii_whitespace) => continue,
            Frame::Line => match serde_json::from_slice::<Request>(&line) {
                Ok(request) => dispatch(&executor, request).await,
                Err(err) => {
                    warn!(%peer, error = %err, "malformed request");
                    Response::error(wire::salvage_id(&line), ErrorCode::InvalidRequest, err.to_string())
                }
            },
        };

        if let Err(err) = wire::write_frame(&mut write_half, &response).await {
            warn!(%peer, error = %err, "write failed");
            break;
        }
    }

    info!(%peer, "connection closed");
}

async fn dispatch(executor: &Executor, request: Request) -> Response {
    let Request { id, command } = request;
    let method = command.name();
    let executor = executor.clone();

    let result = tokio::task::spawn_blocking(move || executor.execute(command)).await;
    match result {
        Ok(result) => {
            if let Ok(Output::Records { records }) = &result {
                debug!(id, method, matches = records.len(), "request served");
            } else {
                debug!(id, method, ok = result.is_ok(), "request served");
            }
            Response::from_result(id, result)
        }
        Err(err) => {
            error!(id, method, error = %err, "store task failed");
            Response::error(id, ErrorCode::Internal, format!("{} failed: {}", method, err))
        }
    }
}
