use std::fmt;

use bytes::Bytes;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// The body of an outgoing request.
///
/// A body is owned by exactly one [`RequestOptions`](super::RequestOptions).
/// Replacing it drops the previous value, which releases any underlying
/// stream; a [`RequestBody::Reader`] is otherwise dropped once the request
/// has been sent or has failed.
pub enum RequestBody {
    /// In-memory content.
    Bytes(Bytes),

    /// Streamed content, read while the request is being sent.
    Reader(Box<dyn AsyncRead + Send + Sync + Unpin + 'static>),
}

impl RequestBody {
    /// Creates a streamed body from any async reader.
    pub fn reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + Unpin + 'static,
    {
        Self::Reader(Box::new(reader))
    }

    pub(super) fn into_reqwest(self) -> reqwest::Body {
        match self {
            Self::Bytes(bytes) => reqwest::Body::from(bytes),
            Self::Reader(reader) => reqwest::Body::wrap_stream(ReaderStream::new(reader)),
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.debug_tuple("Reader").finish_non_exhaustive(),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<&'static str> for RequestBody {
    fn from(value: &'static str) -> Self {
        Self::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

impl From<&'static [u8]> for RequestBody {
    fn from(value: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(value))
    }
}
