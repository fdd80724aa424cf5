//! HTTP method classification into the small, spec-mandated method code table.
//!
//! The wire bytes of the method token are always kept around (as an offset into
//! the receive buffer) even when the method is recognized, so callers that only
//! need the raw bytes never pay for a classification they didn't ask for.

/// One of the seven standard methods the router expands wildcard routes into,
/// plus an `Unknown` fallback that remains routable by its raw byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCode {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Unknown,
}

impl MethodCode {
    /// The seven standard methods a wildcard-method route expands into.
    pub const STANDARD: [MethodCode; 7] =
        [MethodCode::Get, MethodCode::Post, MethodCode::Put, MethodCode::Delete, MethodCode::Patch, MethodCode::Head, MethodCode::Options];

    #[inline]
    pub fn classify(bytes: &[u8]) -> Self {
        match bytes {
            b"GET" => MethodCode::Get,
            b"POST" => MethodCode::Post,
            b"PUT" => MethodCode::Put,
            b"DELETE" => MethodCode::Delete,
            b"PATCH" => MethodCode::Patch,
            b"HEAD" => MethodCode::Head,
            b"OPTIONS" => MethodCode::Options,
            _ => MethodCode::Unknown,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            MethodCode::Get => "GET",
            MethodCode::Post => "POST",
            MethodCode::Put => "PUT",
            MethodCode::Delete => "DELETE",
            MethodCode::Patch => "PATCH",
            MethodCode::Head => "HEAD",
            MethodCode::Options => "OPTIONS",
            MethodCode::Unknown => "",
        }
    }

    /// Methods that, per §4.1, typically do not carry a request body.
    #[inline]
    pub fn carries_no_body(self) -> bool {
        matches!(self, MethodCode::Get | MethodCode::Head | MethodCode::Delete | MethodCode::Options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_standard_methods() {
        assert_eq!(MethodCode::classify(b"GET"), MethodCode::Get);
        assert_eq!(MethodCode::classify(b"POST"), MethodCode::Post);
        assert_eq!(MethodCode::classify(b"PATCH"), MethodCode::Patch);
    }

    #[test]
    fn unknown_method_is_still_routable() {
        assert_eq!(MethodCode::classify(b"PROPFIND"), MethodCode::Unknown);
    }
}
