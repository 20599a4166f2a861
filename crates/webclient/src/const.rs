pub const HTTP_VERSION: &str = "HTTP/1.1";
pub const CRLF: &str = "\r\n";

/// Upper bound for the status line plus all header lines. A single line may
/// use the whole budget.
pub const MAX_HEAD_BYTES: usize = 1024 * 1024;

pub const INDEX_FILE_NAME: &str = "index.html";
