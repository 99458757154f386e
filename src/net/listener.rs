//! TCP listener for the sequential server.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept one connection at a time
//! - Surface bind/accept failures as typed errors

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(#[source] std::io::Error),
}

/// A plain TCP listener. No connection limit: the server never has
/// more than one connection in flight.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to `host:port` from the server configuration.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ListenerError> {
        let address = config.bind_address();
        let inner = TcpListener::bind(&address)
            .await
            .map_err(|source| ListenerError::Bind {
                address: address.clone(),
                source,
            })?;

        let local_addr = inner.local_addr().map_err(|source| ListenerError::Bind {
            address: address.clone(),
            source,
        })?;

        tracing::info!(address = %local_addr, "Listener bound");
        Ok(Self { inner })
    }

    /// Accept the next connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        tracing::debug!(peer_addr = %addr, "Connection accepted");
        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            read_timeout_secs: 0,
        };
        let listener = Listener::bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn bind_error_names_address() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: taken.local_addr().unwrap().port(),
            read_timeout_secs: 0,
        };
        let err = Listener::bind(&config).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
        assert!(err.to_string().contains(&config.bind_address()));
    }
}
