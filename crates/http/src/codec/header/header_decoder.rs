//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! This module provides functionality for decoding HTTP request headers from raw bytes into
//! structured header representations. It handles parsing of HTTP method, URI, version and
//! header fields according to HTTP/1.1 semantics.
//!
//! # Features
//!
//! - Zero-copy header parsing via [`crate::parser`] — offsets only, no owned bytes
//!   until the moment a `HeaderValue`/`HeaderName` is actually built
//! - Support for HTTP/1.0 and HTTP/1.1
//! - Built-in protection against oversized headers
//! - Automatic payload size selection based on headers
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header size: 8KB
//! - Only supports HTTP/1.0 and HTTP/1.1 (HTTP/2 and HTTP/3 currently not supported)
//!
//! # Implementation Details
//!
//! 1. Parse raw bytes via [`crate::parser::parse`], yielding byte offsets
//! 2. Convert offsets into a typed `http::Request` structure
//! 3. Determine payload size based on headers

use bytes::BytesMut;
use http::{HeaderName, HeaderValue, Request};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::parser::{self, HttpVersion};
use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Default maximum number of headers allowed in a request (§6: `max_header_size_bytes`
/// governs byte size; the header *count* cap is this crate's own bound on the offset
/// table, kept well above the spec's "at least 64").
pub const DEFAULT_MAX_HEADER_NUM: usize = 64;

/// Default maximum size in bytes allowed for the entire header section (§6 default).
pub const DEFAULT_MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decoder for HTTP request headers implementing the [`Decoder`] trait.
///
/// This decoder parses raw bytes into a structured [`RequestHeader`] and determines the
/// appropriate [`PayloadSize`] based on the Content-Length and Transfer-Encoding headers.
pub struct HeaderDecoder {
    max_header_bytes: usize,
    max_headers: usize,
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self { max_header_bytes: DEFAULT_MAX_HEADER_BYTES, max_headers: DEFAULT_MAX_HEADER_NUM }
    }
}

impl HeaderDecoder {
    /// Builds a decoder that enforces caller-supplied header limits instead of the
    /// crate defaults — lets [`crate::connection::ConnectionConfig`] drive §6's
    /// `max_header_size_bytes` end to end.
    pub fn new(max_header_bytes: usize, max_headers: usize) -> Self {
        Self { max_header_bytes, max_headers }
    }
}

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode HTTP headers from the provided bytes buffer.
    ///
    /// - `Ok(Some((header, size)))` if a complete header was successfully parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Fast path: return early if buffer is too small to possibly hold a request line
        if src.len() < 14 {
            // Minimum valid HTTP request needs at least "GET / HTTP/1.1\r\n\r\n"
            return Ok(None);
        }

        let parsed = match parser::parse(src, self.max_headers) {
            Ok(Some(p)) => p,
            Ok(None) => {
                // still waiting on the blank line terminating the header block;
                // a buffer this large without one is an oversize header, not patience.
                ensure!(src.len() <= self.max_header_bytes, ParseError::too_large_header(src.len(), self.max_header_bytes));
                return Ok(None);
            }
            Err(parser::ParseError::TooManyHeaders) => return Err(ParseError::too_many_headers(self.max_headers)),
            Err(e) => return Err(e.into()),
        };

        trace!(body_start = parsed.body_start, "parsed body offset");
        ensure!(parsed.body_start <= self.max_header_bytes, ParseError::too_large_header(parsed.body_start, self.max_header_bytes));

        let version = match parsed.request_line.version {
            HttpVersion::Http10 => http::Version::HTTP_10,
            HttpVersion::Http11 => http::Version::HTTP_11,
        };

        let method_bytes = &src[parsed.request_line.method_range.0..parsed.request_line.method_range.1];
        let method = http::Method::from_bytes(method_bytes).map_err(|_| ParseError::InvalidMethod)?;

        let (ps, pe) = parsed.request_line.path;
        let target = match parsed.request_line.query {
            Some((qs, qe)) => {
                let mut buf = Vec::with_capacity(pe - ps + 1 + (qe - qs));
                buf.extend_from_slice(&src[ps..pe]);
                buf.push(b'?');
                buf.extend_from_slice(&src[qs..qe]);
                http::Uri::try_from(buf).map_err(|_| ParseError::InvalidUri)?
            }
            None => http::Uri::try_from(src[ps..pe].to_vec()).map_err(|_| ParseError::InvalidUri)?,
        };

        let mut header_builder = Request::builder().method(method).uri(target).version(version);

        let header_count = parsed.headers.len();
        let headers_offsets = parsed.headers;
        let body_start = parsed.body_start;
        let both_present = parsed.transfer_encoding_and_content_length_both_present;

        let header_bytes = src.split_to(body_start).freeze();

        let headers = header_builder.headers_mut().unwrap();
        headers.reserve(header_count);
        for h in &headers_offsets {
            // sound by construction: the parser only ever records ranges validated
            // as header-name/value bytes during the same pass.
            let name = HeaderName::from_bytes(&header_bytes[h.name.0..h.name.1]).map_err(|_| ParseError::invalid_header("bad header name"))?;
            let value = unsafe { HeaderValue::from_maybe_shared_unchecked(header_bytes.slice(h.value.0..h.value.1)) };
            headers.append(name, value);
        }

        if both_present {
            trace!("transfer-encoding and content-length both present; chunked wins");
        }

        let header = RequestHeader::from(header_builder.body(()).unwrap());
        let payload_decoder = parse_payload(&header)?;

        Ok(Some((header, payload_decoder)))
    }
}

/// Determines the appropriate payload size based on the request headers.
///
/// Per §4.1.3: when both `Transfer-Encoding` and `Content-Length` are present,
/// chunked wins — this is not rejected as a conflict.
fn parse_payload(header: &RequestHeader) -> Result<PayloadSize, ParseError> {
    if !header.need_body() {
        return Ok(PayloadSize::new_empty());
    }

    let te_header = header.headers().get(http::header::TRANSFER_ENCODING);
    let cl_header = header.headers().get(http::header::CONTENT_LENGTH);

    if is_chunked(te_header) {
        return Ok(PayloadSize::new_chunked());
    }

    match cl_header {
        None => Ok(PayloadSize::new_empty()),
        Some(cl_value) => {
            let cl_str = cl_value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;
            let length =
                cl_str.trim().parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;
            Ok(PayloadSize::new_length(length))
        }
    }
}

/// Checks if the Transfer-Encoding header indicates chunked encoding.
///
/// According to RFC 7230, chunked must be the last encoding if present.
fn is_chunked(header_value: Option<&HeaderValue>) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    if let Some(value) = header_value {
        if let Some(bytes) = value.as_bytes().rsplit(|b| *b == b',').next() {
            return bytes.trim_ascii() == CHUNKED;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, Method, Version};
    use indoc::indoc;

    #[test]
    fn check_is_chunked() {
        {
            let headers = HeaderMap::new();
            assert!(!is_chunked(headers.get(http::header::TRANSFER_ENCODING)))
        }

        {
            let mut headers = HeaderMap::new();
            headers.insert("Accept", "foo".parse().unwrap());
            headers.insert("Transfer-Encoding", "gzip, chunked".parse().unwrap());
            headers.insert("Host", "bar".parse().unwrap());
            assert!(is_chunked(headers.get(http::header::TRANSFER_ENCODING)));
        }

        {
            let mut headers = HeaderMap::new();
            headers.insert("Accept", "foo".parse().unwrap());
            headers.insert("Transfer-Encoding", "chunked, gzip".parse().unwrap());
            headers.insert("Host", "bar".parse().unwrap());
            assert!(!is_chunked(headers.get(http::header::TRANSFER_ENCODING)));
        }

        {
            let mut headers = HeaderMap::new();
            headers.insert("Accept", "foo".parse().unwrap());
            headers.insert("Transfer-Encoding", "gzip".parse().unwrap());
            headers.insert("Host", "bar".parse().unwrap());
            assert!(!is_chunked(headers.get(http::header::TRANSFER_ENCODING)));
        }
    }

    #[test]
    fn test_bytes_mut_lens() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        123"##};

        let mut bytes = BytesMut::from(str);

        assert_eq!(bytes.len(), str.len());

        let mut header_decoder = HeaderDecoder::default();

        let result = header_decoder.decode(&mut bytes).unwrap();

        assert!(result.is_some());

        assert_eq!(bytes.len(), 3);
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let mut buf = BytesMut::from(str);

        let (header, payload_decoder) = HeaderDecoder::default().decode(&mut buf).unwrap().unwrap();

        assert!(payload_decoder.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().host(), None);
        assert_eq!(header.uri().path(), "/index.html");
        assert_eq!(header.uri().scheme(), None);
        assert_eq!(header.uri().query(), None);

        assert_eq!(header.headers().len(), 3);

        assert_eq!(header.headers().get(http::header::ACCEPT), Some(&HeaderValue::from_str("*/*").unwrap()));

        assert_eq!(header.headers().get(http::header::HOST), Some(&HeaderValue::from_str("127.0.0.1:8080").unwrap()));

        assert_eq!(header.headers().get(http::header::USER_AGENT), Some(&HeaderValue::from_str("curl/7.79.1").unwrap()));
    }

    #[test]
    fn from_edge() {
        let str = indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        sec-ch-ua-mobile: ?0
        sec-ch-ua-platform: "macOS"
        Upgrade-Insecure-Requests: 1
        User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9
        Sec-Fetch-Site: none
        Sec-Fetch-Mode: navigate
        Sec-Fetch-User: ?1
        Sec-Fetch-Dest: document
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let mut buf = BytesMut::from(str);

        let (header, payload_decoder) = HeaderDecoder::default().decode(&mut buf).unwrap().unwrap();

        assert!(payload_decoder.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().host(), None);
        assert_eq!(header.uri().path(), "/index/");
        assert_eq!(header.uri().scheme(), None);
        assert_eq!(header.uri().query(), Some("a=1&b=2&a=3"));

        assert_eq!(header.headers().len(), 15);

        assert_eq!(header.headers().get(http::header::CONNECTION), Some(&HeaderValue::from_str("keep-alive").unwrap()));

        assert_eq!(header.headers().get(http::header::CACHE_CONTROL), Some(&HeaderValue::from_str("max-age=0").unwrap()));

        assert_eq!(
            header.headers().get("sec-ch-ua"),
            Some(&HeaderValue::from_str(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##).unwrap())
        );

        assert_eq!(header.headers().get("sec-ch-ua-mobile"), Some(&HeaderValue::from_str("?0").unwrap()));

        assert_eq!(header.headers().get("sec-ch-ua-platform"), Some(&HeaderValue::from_str("\"macOS\"").unwrap()));

        assert_eq!(header.headers().get(http::header::UPGRADE_INSECURE_REQUESTS), Some(&HeaderValue::from_str("1").unwrap()));

        assert_eq!(header.headers().get(http::header::USER_AGENT),
                   Some(&HeaderValue::from_str("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52").unwrap()));

        assert_eq!(header.headers().get("Sec-Fetch-Site"), Some(&HeaderValue::from_str("none").unwrap()));

        assert_eq!(header.headers().get("Sec-Fetch-Mode"), Some(&HeaderValue::from_str("navigate").unwrap()));

        assert_eq!(header.headers().get("Sec-Fetch-User"), Some(&HeaderValue::from_str("?1").unwrap()));

        assert_eq!(header.headers().get("Sec-Fetch-Dest"), Some(&HeaderValue::from_str("document").unwrap()));

        assert_eq!(header.headers().get(http::header::ACCEPT_ENCODING), Some(&HeaderValue::from_str("gzip, deflate, br").unwrap()));

        assert_eq!(
            header.headers().get(http::header::ACCEPT_LANGUAGE),
            Some(&HeaderValue::from_str("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7").unwrap())
        );
    }
}
