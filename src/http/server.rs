//! Sequential HTTP server.
//!
//! # Responsibilities
//! - Accept one connection at a time
//! - Parse the request, dispatch it, write the response, close
//! - Keep the listener alive when a single connection fails
//! - Stop on the shutdown signal, even mid-connection
//!
//! # Design Decisions
//! - The connection is handled inside the accept loop body, so only
//!   one request is ever in flight and the store needs no lock
//! - Per-connection errors are logged with the connection id and
//!   never propagate out of the loop
//! - A read timeout bounds how long a stalled client holds the loop

use std::io::Write;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::Instrument;

use crate::config::AppConfig;
use crate::http::request::{ParseError, ParsedRequest, RequestParser};
use crate::http::response::JsonResponse;
use crate::lifecycle::ShutdownSignal;
use crate::net::{ConnectionId, Listener};
use crate::routing::Router;
use crate::users::UserStore;

/// Printed once the accept loop has stopped.
pub const SHUTDOWN_MESSAGE: &str = "Server shutting down...";

/// Failure while serving a single connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to parse request: {0}")]
    Parse(#[from] ParseError),

    #[error("client did not finish the request within {0:?}")]
    Timeout(Duration),

    #[error("failed to write response: {0}")]
    Write(#[source] std::io::Error),
}

/// What happened on a connection that was served without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The peer closed before sending a request line.
    Empty,
    /// A request was answered with this status.
    Responded(StatusCode),
}

/// The toy users server.
pub struct HttpServer {
    router: Router,
    parser: RequestParser,
    store: UserStore,
    read_timeout: Option<Duration>,
}

impl HttpServer {
    /// Create a server with the seeded user store.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(config, UserStore::seeded())
    }

    /// Create a server around an existing store.
    pub fn with_store(config: &AppConfig, store: UserStore) -> Self {
        let read_timeout = match config.server.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self {
            router: Router::new(),
            parser: RequestParser::new(config.limits.clone()),
            store,
            read_timeout,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Run the accept loop until `shutdown` fires, printing to stdout.
    ///
    /// Returns the store so callers can inspect the final state.
    pub async fn run(
        self,
        listener: Listener,
        shutdown: ShutdownSignal,
    ) -> Result<UserStore, std::io::Error> {
        self.run_with_console(listener, shutdown, std::io::stdout()).await
    }

    /// Like [`run`](Self::run), with the welcome and shutdown text written
    /// to `console`.
    ///
    /// Shutdown is observed while idle and while a connection is in flight;
    /// an unfinished connection is dropped without a response.
    pub async fn run_with_console<W>(
        mut self,
        listener: Listener,
        mut shutdown: ShutdownSignal,
        mut console: W,
    ) -> Result<UserStore, std::io::Error>
    where
        W: Write + Send,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");
        print_welcome(&mut console, addr.port())?;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait() => break,
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::error!(error = %e, "Accept failed");
                            tokio::time::sleep(Duration::from_millis(100)).await;
                            continue;
                        }
                    };

                    let id = ConnectionId::new();
                    let span = tracing::debug_span!("connection", connection_id = %id, peer = %peer);

                    tokio::select! {
                        biased;

                        _ = shutdown.wait() => {
                            tracing::warn!(connection_id = %id, "Dropping in-flight connection");
                            break;
                        }
                        served = self.serve_connection(stream, id).instrument(span) => match served {
                            Ok(outcome) => tracing::debug!(?outcome, "Connection closed"),
                            Err(e) => tracing::warn!(connection_id = %id, error = %e, "Connection failed"),
                        },
                    }
                }
            }
        }

        writeln!(console, "\n\n{SHUTDOWN_MESSAGE}")?;
        console.flush()?;
        drop(listener);
        tracing::info!("HTTP server stopped");
        Ok(self.store)
    }

    /// Serve exactly one request on `stream`, then shut the stream down.
    pub async fn serve_connection<S>(
        &mut self,
        stream: S,
        id: ConnectionId,
    ) -> Result<ConnectionOutcome, ConnectionError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (read_half, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(read_half);

        let parsed = match self.read_request(&mut reader).await {
            Ok(parsed) => parsed,
            Err(e) => {
                if let Some(response) = error_response(&e) {
                    write_response(&mut writer, &response).await?;
                }
                return Err(e);
            }
        };

        let Some(request) = parsed else {
            return Ok(ConnectionOutcome::Empty);
        };

        let response = self.handle(&request);
        tracing::info!(
            connection_id = %id,
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Request served"
        );

        write_response(&mut writer, &response).await?;
        Ok(ConnectionOutcome::Responded(response.status))
    }

    /// Dispatch a parsed request against the store.
    pub fn handle(&mut self, request: &ParsedRequest) -> JsonResponse {
        self.router.dispatch(
            &request.method,
            &request.path,
            request.body.as_deref(),
            &mut self.store,
        )
    }

    async fn read_request<R>(&self, reader: &mut R) -> Result<Option<ParsedRequest>, ConnectionError>
    where
        R: tokio::io::AsyncBufRead + Unpin,
    {
        match self.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.parser.parse(reader)).await {
                Ok(parsed) => Ok(parsed?),
                Err(_) => Err(ConnectionError::Timeout(limit)),
            },
            None => Ok(self.parser.parse(reader).await?),
        }
    }
}

/// The response owed to the peer for a failed read, if any.
fn error_response(err: &ConnectionError) -> Option<JsonResponse> {
    match err {
        ConnectionError::Parse(e) if e.is_client_error() => {
            Some(JsonResponse::error(StatusCode::BAD_REQUEST, "Bad request"))
        }
        ConnectionError::Timeout(_) => Some(JsonResponse::error(
            StatusCode::REQUEST_TIMEOUT,
            "Request timeout",
        )),
        _ => None,
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonResponse) -> Result<(), ConnectionError>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(&response.to_bytes())
        .await
        .map_err(ConnectionError::Write)?;
    writer.flush().await.map_err(ConnectionError::Write)?;
    // Peer may already be gone; the response has been handed to the kernel
    let _ = writer.shutdown().await;
    Ok(())
}

fn print_welcome<W: Write>(console: &mut W, port: u16) -> std::io::Result<()> {
    writeln!(console, "\nServer started on http://localhost:{port}")?;
    writeln!(console, "Try these commands in another terminal:")?;
    writeln!(console, "  curl http://localhost:{port}/api/users")?;
    writeln!(console, "  curl http://localhost:{port}/api/users/1")?;
    writeln!(
        console,
        "  curl -X POST http://localhost:{port}/api/users -H 'Content-Type: application/json' -d '{{\"name\":\"New User\",\"email\":\"new@example.com\"}}'"
    )?;
    writeln!(console, "\nPress Ctrl+C to stop the server\n")?;
    console.flush()
}
