//! Server Façade
//!
//! The wallet talks to a webcash server through a host-supplied
//! [`ServerConnector`]; HTTP, TLS, and retry policy are all the host's
//! business. The façade tracks connection state: a connection is a
//! one-way trip, and once disconnected the façade is spent.

use std::mem;

use tracing::debug;
use wbc_core::{Error, Result};

/// Host-provided server transport.
///
/// `connect` is the required operation. `disconnect` defaults to
/// dropping the handle, for transports that need no explicit goodbye.
/// Implementations report their own failures through the library error
/// type; `Error::ConnectFailed` is the conventional connect failure.
pub trait ServerConnector {
    /// Opaque connection handle.
    type Conn;

    /// Establish a connection to the server at `url`.
    fn connect(&mut self, url: &str) -> Result<Self::Conn>;

    /// Tear down a connection.
    fn disconnect(&mut self, conn: Self::Conn) -> Result<()> {
        drop(conn);
        Ok(())
    }

    /// Fetch the server's current terms of service.
    fn fetch_terms(&mut self, conn: &mut Self::Conn) -> Result<String>;
}

enum ConnectionState<T> {
    Unconnected,
    Connected(T),
    Disconnected,
}

/// Owning façade over a [`ServerConnector`].
pub struct Server<C: ServerConnector> {
    connector: C,
    state: ConnectionState<C::Conn>,
}

impl<C: ServerConnector> Server<C> {
    /// Wrap a connector. The façade starts unconnected.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            state: ConnectionState::Unconnected,
        }
    }

    /// Connect to the server at `url`.
    ///
    /// Valid only from the unconnected state; a connector failure is
    /// propagated and leaves the façade unconnected.
    pub fn connect(&mut self, url: &str) -> Result<()> {
        match self.state {
            ConnectionState::Unconnected => {}
            _ => return Err(Error::InvalidArgument),
        }
        let conn = self.connector.connect(url)?;
        self.state = ConnectionState::Connected(conn);
        Ok(())
    }

    /// Disconnect from the server. Terminal: the façade cannot reconnect.
    ///
    /// Disconnecting a façade that never connected is a no-op that still
    /// spends it; disconnecting twice is `Error::InvalidArgument`.
    pub fn disconnect(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, ConnectionState::Disconnected) {
            ConnectionState::Connected(conn) => self.connector.disconnect(conn),
            ConnectionState::Unconnected => Ok(()),
            ConnectionState::Disconnected => Err(Error::InvalidArgument),
        }
    }

    /// Whether the façade currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected(_))
    }

    /// Fetch the server's current terms of service.
    pub fn get_terms(&mut self) -> Result<String> {
        match &mut self.state {
            ConnectionState::Connected(conn) => self.connector.fetch_terms(conn),
            _ => Err(Error::NotConnected),
        }
    }
}

impl<C: ServerConnector> Drop for Server<C> {
    fn drop(&mut self) {
        if let ConnectionState::Connected(conn) =
            mem::replace(&mut self.state, ConnectionState::Disconnected)
        {
            if let Err(err) = self.connector.disconnect(conn) {
                debug!(?err, "server teardown reported an error on drop");
            }
        }
    }
}
