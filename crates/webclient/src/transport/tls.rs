use std::{io, net::TcpStream, sync::Arc};

use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned, pki_types::ServerName};

/// Default client context: ring provider, safe protocol versions, the
/// Mozilla root set, no client auth.
pub fn default_client_config() -> io::Result<Arc<ClientConfig>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(io::Error::other)?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Wrap `sock` and drive the handshake to completion, so certificate and
/// negotiation failures show up here rather than on the first read.
pub(crate) fn handshake(
    config: Arc<ClientConfig>,
    host: &str,
    mut sock: TcpStream,
) -> io::Result<StreamOwned<ClientConnection, TcpStream>> {
    let server_name = ServerName::try_from(host.to_owned())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut conn = ClientConnection::new(config, server_name).map_err(io::Error::other)?;

    while conn.is_handshaking() {
        conn.complete_io(&mut sock)?;
    }
    log::debug!(
        "tls handshake with {host} done: {:?} {:?}",
        conn.protocol_version(),
        conn.negotiated_cipher_suite().map(|s| s.suite())
    );

    Ok(StreamOwned::new(conn, sock))
}
