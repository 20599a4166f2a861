use crate::r#const::{CRLF, HTTP_VERSION};

/// The exact bytes put on the wire. Built once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    text: String,
}

impl RawRequest {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

pub struct ReqBuilder {
    req: String,
}

impl ReqBuilder {
    /// Start a request with the line `GET <path> HTTP/1.1`.
    pub fn get(path: &str) -> Self {
        let mut req = String::with_capacity(64 + path.len());
        req.push_str("GET ");
        push_ascii(&mut req, path);
        req.push(' ');
        req.push_str(HTTP_VERSION);
        req.push_str(CRLF);
        Self { req }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        push_ascii(&mut self.req, name);
        self.req.push_str(": ");
        push_ascii(&mut self.req, value);
        self.req.push_str(CRLF);
        self
    }

    /// Terminate the head with the blank line. No body is ever sent.
    pub fn build(mut self) -> RawRequest {
        self.req.push_str(CRLF);
        RawRequest { text: self.req }
    }
}

/// Single byte per character: anything outside ASCII becomes `?`.
fn push_ascii(buf: &mut String, s: &str) {
    buf.extend(s.chars().map(|c| if c.is_ascii() { c } else { '?' }));
}

/// `GET <path> HTTP/1.1`, `Host` and `Connection: close`, nothing else.
pub fn encode_get(host: &str, path: &str) -> RawRequest {
    ReqBuilder::get(path)
        .header("Host", host)
        .header("Connection", "close")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_get() {
        let req = encode_get("example.com", "/a/b.txt");
        assert_eq!(
            req.as_bytes(),
            b"GET /a/b.txt HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_query_is_passed_through() {
        let req = encode_get("h", "/search?q=a b&x=%20");
        assert!(req.as_str().starts_with("GET /search?q=a b&x=%20 HTTP/1.1\r\n"));
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        let req = encode_get("h", "/caf\u{e9}");
        assert!(req.as_bytes().is_ascii());
        assert!(req.as_str().starts_with("GET /caf? HTTP/1.1\r\n"));
    }
}
