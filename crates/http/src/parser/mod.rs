//! Single-pass, zero-copy HTTP/1.1 request-line and header parser.
//!
//! This is the hand-rolled replacement for a generic parsing library: it walks
//! the receive buffer exactly once and records byte *offsets* — never heap
//! copies — for the method, path, query, and every header name/value. The
//! caller (the [`crate::codec::header::HeaderDecoder`]) is responsible for
//! slicing the buffer by these offsets once it knows the bytes are stable
//! (i.e. after `split_to`).
//!
//! No allocation is proportional to body size; header-offset storage is
//! bounded by `max_headers`, a caller-supplied cap (not a compile-time
//! constant), so the connection driver can enforce its own configured limits
//! without this module knowing about configuration at all.

mod method;

pub use method::MethodCode;

use std::fmt;

/// Byte range `(start, end)` into the buffer that was parsed, half-open.
pub type Span = (usize, usize);

/// One header's name and value as offsets into the parsed buffer.
#[derive(Debug, Clone, Copy)]
pub struct HeaderOffset {
    pub name: Span,
    pub value: Span,
}

/// `HTTP/1.0` vs `HTTP/1.1` — the only two versions this parser accepts
/// syntactically (§4.1: other tokens are accepted syntactically too, but we
/// only need to distinguish these two for the keep-alive default in §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    Http11,
}

/// The request-line portion of a parse.
#[derive(Debug)]
pub struct RequestLine {
    pub method: MethodCode,
    pub method_range: Span,
    pub path: Span,
    /// `None` when the request target carried no `?`.
    pub query: Option<Span>,
    pub version: HttpVersion,
}

/// Everything a complete parse yields: offsets only, no owned bytes.
#[derive(Debug)]
pub struct ParseResult {
    pub request_line: RequestLine,
    pub headers: Vec<HeaderOffset>,
    /// Offset of the first byte after the blank line terminating the header
    /// block — spec's `body_start`.
    pub body_start: usize,
    /// Set when both `transfer-encoding` and `content-length` headers were
    /// present. Per §4.1.3/§9 this is *not* an error: chunked wins and the
    /// driver surfaces the annotation as a warning, it never rejects the
    /// request on this basis alone.
    pub transfer_encoding_and_content_length_both_present: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    MalformedRequestLine,
    UnsupportedVersion,
    MalformedHeader,
    TooManyHeaders,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedRequestLine => write!(f, "malformed request line"),
            ParseError::UnsupportedVersion => write!(f, "unsupported http version"),
            ParseError::MalformedHeader => write!(f, "malformed header line"),
            ParseError::TooManyHeaders => write!(f, "too many headers"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `buf` per §4.1. Returns:
/// - `Ok(None)` — the buffer does not yet contain a complete header block
///   (`Incomplete` in spec terms); the caller should wait for more bytes.
/// - `Ok(Some(result))` — a complete request line + header block (`Complete`).
/// - `Err(_)` — the bytes are malformed (`Error`); never panics.
///
/// `max_headers` bounds the offset table; exceeding it is `TooManyHeaders`
/// rather than silently truncating, so the driver can map it to a response.
pub fn parse(buf: &[u8], max_headers: usize) -> Result<Option<ParseResult>, ParseError> {
    let Some((request_line_bytes, rest)) = next_line(buf) else { return Ok(None) };
    let Some((method, method_range, after_method)) = parse_method(request_line_bytes) else {
        return Ok(None);
    };
    let Some((path, query, after_target)) = parse_target(after_method) else { return Ok(None) };
    // `parse_target` computes `path`/`query` relative to `after_method`; translate
    // them to absolute buffer offsets the same way the header loop below does
    // (offset + local position), since `after_method` starts right past the
    // method token and its trailing space.
    let target_base = method_range.1 + 1;
    let path = (path.0 + target_base, path.1 + target_base);
    let query = query.map(|(s, e)| (s + target_base, e + target_base));
    let version = match parse_version(after_target) {
        Ok(Some(v)) => v,
        Ok(None) => return Ok(None),
        Err(e) => return Err(e),
    };

    let base = buf.len() - rest.len();
    let mut headers = Vec::new();
    let mut cursor = rest;
    let mut offset = base;

    loop {
        let Some((line, after_line)) = next_line(cursor) else { return Ok(None) };
        if line.is_empty() {
            let body_start = buf.len() - after_line.len();
            return Ok(Some(ParseResult {
                request_line: RequestLine { method, method_range, path, query, version },
                transfer_encoding_and_content_length_both_present: has_conflicting_length_headers(buf, &headers),
                headers,
                body_start,
            }));
        }

        let Some(colon) = find(line, b':') else { return Err(ParseError::MalformedHeader) };
        let name = &line[..colon];
        if name.is_empty() || !name.iter().copied().all(is_valid_header_name_byte) {
            return Err(ParseError::MalformedHeader);
        }
        let value = trim_ows(&line[colon + 1..]);
        if value.iter().copied().any(|b| b == 0x7f || (b < 0x20 && b != b'\t')) {
            return Err(ParseError::MalformedHeader);
        }

        if headers.len() >= max_headers {
            return Err(ParseError::TooManyHeaders);
        }

        let name_start = offset + (name.as_ptr() as usize - cursor.as_ptr() as usize);
        let value_start = offset + (value.as_ptr() as usize - cursor.as_ptr() as usize);
        headers.push(HeaderOffset { name: (name_start, name_start + name.len()), value: (value_start, value_start + value.len()) });

        offset += cursor.len() - after_line.len();
        cursor = after_line;
    }
}

/// Splits off the next line at `\n`, tolerating a bare `\n` as well as the
/// standard `\r\n` (real-world clients occasionally send LF-only line
/// endings; the donor's fixtures rely on this leniency). Returns `None` when
/// `buf` doesn't yet contain a complete line.
#[inline]
fn next_line(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let nl = find(buf, b'\n')?;
    let line = if nl > 0 && buf[nl - 1] == b'\r' { &buf[..nl - 1] } else { &buf[..nl] };
    Some((line, &buf[nl + 1..]))
}

fn has_conflicting_length_headers(buf: &[u8], headers: &[HeaderOffset]) -> bool {
    let mut has_te = false;
    let mut has_cl = false;
    for h in headers {
        let name = &buf[h.name.0..h.name.1];
        if name.eq_ignore_ascii_case(b"transfer-encoding") {
            has_te = true;
        } else if name.eq_ignore_ascii_case(b"content-length") {
            has_cl = true;
        }
    }
    has_te && has_cl
}

#[inline]
fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

#[inline]
fn trim_ows(mut bytes: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = bytes {
        bytes = rest;
    }
    bytes
}

/// `METHOD SP` — up to 16 uppercase ASCII letters, per §4.1.1. Operates on an
/// already-complete request line, so absence of a space is a malformed line,
/// not an incompleteness signal.
fn parse_method(line: &[u8]) -> Option<(MethodCode, Span, &[u8])> {
    let sp = find(line, b' ')?;
    if sp == 0 || sp > 16 {
        return None;
    }
    let token = &line[..sp];
    if !token.iter().copied().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Some((MethodCode::classify(token), (0, sp), &line[sp + 1..]))
}

/// Request target up to the next space. The `?` byte, if present before the
/// space, splits `path` from `query` (§4.1.1).
fn parse_target(line: &[u8]) -> Option<(Span, Option<Span>, &[u8])> {
    let sp = find(line, b' ')?;
    let target = &line[..sp];
    if target.is_empty() || !target.iter().copied().all(is_valid_target_byte) {
        return None;
    }
    let (path_end, query) = match find(target, b'?') {
        Some(q) => (q, Some((q + 1, sp))),
        None => (sp, None),
    };
    Some(((0, path_end), query, &line[sp + 1..]))
}

/// `HTTP/1.0` or `HTTP/1.1`. Per §4.1 other version tokens are accepted
/// syntactically too; since only the 1.0/1.1 distinction affects keep-alive
/// defaults (§4.6), anything of the shape `HTTP/<digit>.<digit>` that isn't
/// exactly `1.0` is treated as the `1.1` (keep-alive-by-default) case. The
/// request line is already known complete by the time this runs, so any
/// mismatch is a hard error rather than "need more bytes".
fn parse_version(rest_of_line: &[u8]) -> Result<Option<HttpVersion>, ParseError> {
    const PREFIX: &[u8] = b"HTTP/";
    let Some(rest) = rest_of_line.strip_prefix(PREFIX) else { return Err(ParseError::UnsupportedVersion) };
    let [major, b'.', minor] = rest else { return Err(ParseError::UnsupportedVersion) };
    if !major.is_ascii_digit() || !minor.is_ascii_digit() {
        return Err(ParseError::UnsupportedVersion);
    }
    let version = if *major == b'1' && *minor == b'0' { HttpVersion::Http10 } else { HttpVersion::Http11 };
    Ok(Some(version))
}

const fn make_byte_mask(valid: &[u8]) -> [bool; 256] {
    let mut mask = [false; 256];
    let mut i = 0;
    while i < valid.len() {
        mask[valid[i] as usize] = true;
        i += 1;
    }
    mask
}

static TARGET_BYTE_MASK: [bool; 256] =
    make_byte_mask(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~:/?#[]@!$&'()*+,;=%");

static HEADER_NAME_BYTE_MASK: [bool; 256] =
    make_byte_mask(b"!#$%&'*+-.^_`|~ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789");

#[inline(always)]
fn is_valid_target_byte(b: u8) -> bool {
    TARGET_BYTE_MASK[b as usize]
}

#[inline(always)]
fn is_valid_header_name_byte(b: u8) -> bool {
    HEADER_NAME_BYTE_MASK[b as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_without_trailing_blank_line() {
        let buf = b"GET /hello HTTP/1.1\r\nHost: x\r\n";
        assert!(matches!(parse(buf, 64), Ok(None)));
    }

    #[test]
    fn complete_simple_get() {
        let buf = b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n";
        let result = parse(buf, 64).unwrap().unwrap();
        assert_eq!(result.request_line.method, MethodCode::Get);
        let (s, e) = result.request_line.path;
        assert_eq!(&buf[s..e], b"/hello");
        assert!(result.request_line.query.is_none());
        assert_eq!(result.request_line.version, HttpVersion::Http11);
        assert_eq!(result.headers.len(), 1);
        let h = &result.headers[0];
        assert_eq!(&buf[h.name.0..h.name.1], b"Host");
        assert_eq!(&buf[h.value.0..h.value.1], b"x");
        assert_eq!(result.body_start, buf.len());
    }

    #[test]
    fn splits_path_and_query() {
        let buf = b"GET /index/?a=1&b=2 HTTP/1.1\r\n\r\n";
        let result = parse(buf, 64).unwrap().unwrap();
        let (ps, pe) = result.request_line.path;
        assert_eq!(&buf[ps..pe], b"/index/");
        let (qs, qe) = result.request_line.query.unwrap();
        assert_eq!(&buf[qs..qe], b"a=1&b=2");
    }

    #[test]
    fn offsets_are_sound_for_every_header() {
        let buf = b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello";
        let result = parse(buf, 64).unwrap().unwrap();
        assert_eq!(result.headers.len(), 2);
        assert_eq!(&buf[result.headers[0].name.0..result.headers[0].name.1], b"Host");
        assert_eq!(&buf[result.headers[0].value.0..result.headers[0].value.1], b"example.com");
        assert_eq!(&buf[result.headers[1].name.0..result.headers[1].name.1], b"Content-Length");
        assert_eq!(&buf[result.headers[1].value.0..result.headers[1].value.1], b"5");
        assert_eq!(&buf[result.body_start..], b"hello");
    }

    #[test]
    fn malformed_header_line_is_error_not_panic() {
        let buf = b"GET / HTTP/1.1\r\nbad header no colon\r\n\r\n";
        assert_eq!(parse(buf, 64), Err(ParseError::MalformedHeader));
    }

    #[test]
    fn other_version_tokens_are_accepted_syntactically() {
        let buf = b"GET / HTTP/2.0\r\n\r\n";
        let result = parse(buf, 64).unwrap().unwrap();
        assert_eq!(result.request_line.version, HttpVersion::Http11);
    }

    #[test]
    fn garbage_version_token_is_error() {
        let buf = b"GET / XTTP/1.1\r\n\r\n";
        assert_eq!(parse(buf, 64), Err(ParseError::UnsupportedVersion));
    }

    #[test]
    fn too_many_headers_is_error() {
        let mut buf = b"GET / HTTP/1.1\r\n".to_vec();
        for i in 0..10 {
            buf.extend_from_slice(format!("X-{i}: v\r\n").as_bytes());
        }
        buf.extend_from_slice(b"\r\n");
        assert_eq!(parse(&buf, 4), Err(ParseError::TooManyHeaders));
    }

    #[test]
    fn chunked_and_content_length_both_present_is_annotated_not_rejected() {
        let buf = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\nContent-Length: 10\r\n\r\n";
        let result = parse(buf, 64).unwrap().unwrap();
        assert!(result.transfer_encoding_and_content_length_both_present);
    }
}
