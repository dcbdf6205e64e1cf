//! Scheme-qualified buffer handles.

use compact_str::CompactString;
use std::fmt;

/// Default scheme for body-pane buffers.
pub const BODY_SCHEME: &str = "outline";

/// Addresses one virtual buffer as `scheme:/gnx`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle {
    scheme: CompactString,
    gnx: CompactString,
}

impl BufferHandle {
    pub fn new(scheme: &str, gnx: &str) -> Self {
        Self {
            scheme: CompactString::from(scheme),
            gnx: CompactString::from(gnx),
        }
    }

    pub fn body(gnx: &str) -> Self {
        Self::new(BODY_SCHEME, gnx)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn gnx(&self) -> &str {
        &self.gnx
    }

    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme.as_str() == scheme
    }

    pub fn uri(&self) -> String {
        format!("{}:/{}", self.scheme, self.gnx)
    }

    pub fn parse(uri: &str) -> Option<Self> {
        let (scheme, gnx) = uri.split_once(":/")?;
        if scheme.is_empty() {
            return None;
        }
        Some(Self::new(scheme, gnx))
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/{}", self.scheme, self.gnx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_round_trip() {
        let handle = BufferHandle::body("42");
        assert_eq!(handle.uri(), "outline:/42");
        assert_eq!(BufferHandle::parse("outline:/42"), Some(handle));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(BufferHandle::parse("no-scheme"), None);
        assert_eq!(BufferHandle::parse(":/gnx"), None);
    }

    #[test]
    fn scheme_check() {
        let handle = BufferHandle::new("scratch", "1");
        assert!(handle.has_scheme("scratch"));
        assert!(!handle.has_scheme(BODY_SCHEME));
    }
}
