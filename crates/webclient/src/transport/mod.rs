//! Plain or TLS wrapped byte stream to a [`ConnectionTarget`].

mod tls;

use std::{
    io::{self, Read, Write},
    net::{TcpStream, ToSocketAddrs},
    sync::Arc,
    time::Duration,
};

use rustls::{ClientConfig, ClientConnection, StreamOwned};
pub use tls::default_client_config;

use crate::{
    error::{Error, Result},
    url::{ConnectionTarget, Scheme},
};

/// An open, connected stream. Dropping it closes the socket.
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Transport {
    /// One attempt, no retry. `timeout` also bounds every later read/write;
    /// `None` blocks for as long as the peer stalls.
    pub fn connect(
        target: &ConnectionTarget,
        tls_config: &Arc<ClientConfig>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let authority = target.authority();
        let sock = open_tcp(target, timeout).map_err(|e| Error::connection(&authority, e))?;
        log::info!(
            "connected to {authority} ({})",
            sock.peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "unknown peer".into())
        );

        match target.scheme {
            Scheme::Http => Ok(Transport::Plain(sock)),
            Scheme::Https => {
                let stream = tls::handshake(tls_config.clone(), &target.host, sock)
                    .map_err(|e| Error::connection(&authority, e))?;
                Ok(Transport::Tls(Box::new(stream)))
            }
        }
    }
}

fn open_tcp(target: &ConnectionTarget, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let host = target.host.as_str();
    let sock = match timeout {
        None => TcpStream::connect((host, target.port))?,
        Some(timeout) => {
            let mut last_err = None;
            let mut connected = None;
            for addr in (host, target.port).to_socket_addrs()? {
                match TcpStream::connect_timeout(&addr, timeout) {
                    Ok(sock) => {
                        connected = Some(sock);
                        break;
                    }
                    Err(e) => {
                        log::debug!("connect {addr} failed: {e}");
                        last_err = Some(e);
                    }
                }
            }
            match connected {
                Some(sock) => sock,
                None => {
                    return Err(last_err.unwrap_or_else(|| {
                        io::Error::new(io::ErrorKind::NotFound, "no address resolved")
                    }));
                }
            }
        }
    };
    sock.set_read_timeout(timeout)?;
    sock.set_write_timeout(timeout)?;
    Ok(sock)
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => match s.read(buf) {
                // peer dropped TCP without close_notify
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::debug!("tls stream closed without close_notify");
                    Ok(0)
                }
                res => res,
            },
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        match self {
            Transport::Plain(_) => log::debug!("closing connection"),
            Transport::Tls(s) => {
                log::debug!("closing tls connection");
                s.conn.send_close_notify();
                while s.conn.wants_write() {
                    if s.conn.write_tls(&mut s.sock).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    fn target(url: &str) -> ConnectionTarget {
        ConnectionTarget::parse(url).unwrap()
    }

    #[test]
    fn test_connect_plain() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = default_client_config().unwrap();

        let transport = Transport::connect(
            &target(&format!("http://127.0.0.1:{port}/")),
            &config,
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert!(matches!(transport, Transport::Plain(_)));
    }

    #[test]
    fn test_connect_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let config = default_client_config().unwrap();

        let err = Transport::connect(&target(&format!("http://127.0.0.1:{port}/")), &config, None)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Connection { .. }), "{err}");
    }

    #[test]
    fn test_tls_handshake_failure_is_connection_error() {
        // a plain TCP peer that answers the ClientHello with garbage
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = std::thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = [0_u8; 512];
            let _ = sock.read(&mut buf);
            let _ = sock.write_all(b"HTTP/1.1 400 Bad Request\r\n\r\n");
        });
        let config = default_client_config().unwrap();

        let err = Transport::connect(
            &target(&format!("https://127.0.0.1:{port}/")),
            &config,
            Some(Duration::from_secs(5)),
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::Connection { .. }), "{err}");
        server.join().unwrap();
    }
}
