//! Trait abstractions over the hardware byte sources to enable testing

use async_trait::async_trait;
use std::io;
use tokio::io::AsyncReadExt;

/// Byte stream source for the charge controller's serial line
///
/// Reads deliver whatever the link has available, with no framing guarantee
/// across calls.
#[async_trait]
pub trait ByteSource: Send {
    /// Read available bytes into `buf`, returning the count
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Bus transfer source for the depth instrument
///
/// Each transfer returns the bytes captured since the previous call, which
/// may be empty or split a display frame at any position.
#[async_trait]
pub trait BusTransfer: Send {
    /// Perform one bus transfer and return the captured bytes
    async fn transfer(&mut self) -> io::Result<Vec<u8>>;
}

/// Wrapper around `tokio_serial::SerialStream` implementing [`ByteSource`]
pub struct SerialByteSource {
    port: tokio_serial::SerialStream,
}

impl SerialByteSource {
    pub fn new(port: tokio_serial::SerialStream) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ByteSource for SerialByteSource {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf).await
    }
}

/// [`BusTransfer`] backend reading from the device node exposing the
/// instrument's slave bus
pub struct FileBusTransfer {
    device: tokio::fs::File,
}

impl FileBusTransfer {
    /// Open the bus device node
    pub async fn open(path: &str) -> io::Result<Self> {
        Ok(Self {
            device: tokio::fs::File::open(path).await?,
        })
    }
}

#[async_trait]
impl BusTransfer for FileBusTransfer {
    async fn transfer(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = [0u8; 64];
        let read = self.device.read(&mut buf).await?;
        Ok(buf[..read].to_vec())
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// Mock serial source serving queued chunks; errors when exhausted so
    /// tests cannot hang in an acquisition loop
    #[derive(Debug)]
    pub struct MockByteSource {
        chunks: VecDeque<Vec<u8>>,
    }

    impl MockByteSource {
        pub fn new(chunks: Vec<Vec<u8>>) -> Self {
            Self {
                chunks: chunks.into(),
            }
        }
    }

    #[async_trait]
    impl ByteSource for MockByteSource {
        async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    assert!(chunk.len() <= buf.len(), "mock chunk larger than read buffer");
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "mock byte source exhausted",
                )),
            }
        }
    }

    /// Mock bus serving queued transfer results; errors when exhausted
    #[derive(Debug)]
    pub struct MockBusTransfer {
        transfers: VecDeque<Vec<u8>>,
    }

    impl MockBusTransfer {
        pub fn new(transfers: Vec<Vec<u8>>) -> Self {
            Self {
                transfers: transfers.into(),
            }
        }
    }

    #[async_trait]
    impl BusTransfer for MockBusTransfer {
        async fn transfer(&mut self) -> io::Result<Vec<u8>> {
            self.transfers.pop_front().ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "mock bus exhausted")
            })
        }
    }
}
