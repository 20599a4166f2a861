use std::io::{self, Read};

use crate::error::{Error, Result};

/// Read one CR LF terminated line, one byte at a time.
///
/// Never pulls a byte past the terminator, so whatever follows the head
/// stays on the stream for the body reader no matter how the transport
/// buffers. Returns `Ok(None)` when the stream ends before a terminator.
/// The terminator and any trailing whitespace are stripped.
pub(crate) fn read_line<R: Read + ?Sized>(stream: &mut R, max: usize) -> Result<Option<String>> {
    let mut buf: Vec<u8> = Vec::with_capacity(128);
    let mut byte = [0_u8; 1];

    loop {
        match stream.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io("failed to read response head", e)),
        }

        buf.push(byte[0]);
        if buf.ends_with(b"\r\n") {
            buf.truncate(buf.len() - 2);
            break;
        }
        // one extra byte of slack for a pending CR
        if buf.len() > max + 1 {
            return Err(Error::protocol(format!(
                "response head larger than {max} bytes"
            )));
        }
    }

    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end().to_owned()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_line_stops_at_crlf() {
        let mut cursor = Cursor::new(b"first line  \r\nsecond\r\nrest".to_vec());
        assert_eq!(read_line(&mut cursor, 64).unwrap().as_deref(), Some("first line"));
        assert_eq!(read_line(&mut cursor, 64).unwrap().as_deref(), Some("second"));
        assert_eq!(cursor.position(), 22);

        let mut rest = String::new();
        cursor.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "rest");
    }

    #[test]
    fn test_lone_lf_does_not_terminate() {
        let mut cursor = Cursor::new(b"a\nb\r\n".to_vec());
        assert_eq!(read_line(&mut cursor, 64).unwrap().as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_empty_line() {
        let mut cursor = Cursor::new(b"\r\nbody".to_vec());
        assert_eq!(read_line(&mut cursor, 64).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_eof_before_terminator() {
        let mut cursor = Cursor::new(b"partial".to_vec());
        assert!(read_line(&mut cursor, 64).unwrap().is_none());

        let mut cursor = Cursor::new(Vec::new());
        assert!(read_line(&mut cursor, 64).unwrap().is_none());
    }

    #[test]
    fn test_line_too_long() {
        let mut data = vec![b'x'; 100];
        data.extend_from_slice(b"\r\n");
        let mut cursor = Cursor::new(data);
        let err = read_line(&mut cursor, 16).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)), "{err}");
    }
}
