//! Shared helpers: a tiny HTTP server and a recording editor.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use outpaint::{EditRequest, EditResult, ImageEditor, OutpaintError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// When set, the body is sent in two halves with this pause in between.
    pub stall: Option<Duration>,
    /// When set, advertises this many extra bytes the body never delivers.
    pub missing: usize,
}

impl Reply {
    pub fn png(width: u32, height: u32) -> Self {
        Self {
            status: 200,
            content_type: "image/png",
            body: png_bytes(width, height),
            stall: None,
            missing: 0,
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            stall: None,
            missing: 0,
        }
    }

    pub fn bytes(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            content_type: "application/octet-stream",
            body: body.to_vec(),
            stall: None,
            missing: 0,
        }
    }

    pub fn stalled(mut self, pause: Duration) -> Self {
        self.stall = Some(pause);
        self
    }

    /// Closes the connection `missing` bytes short of the advertised length.
    pub fn cut_short(mut self, missing: usize) -> Self {
        self.missing = missing;
        self
    }
}

/// Serves the given replies, one per connection, in order.
pub struct TestServer {
    base: String,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl TestServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await.unwrap_or_default();
                recorded.lock().unwrap().push(request);
                let _ = write_reply(&mut stream, &reply).await;
            }
        });

        Self { base, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Raw requests received so far.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(buf);
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());

    let done = |buf: &[u8]| match content_length {
        Some(len) => buf.len() >= header_end + len,
        None if head.contains("transfer-encoding: chunked") => buf.ends_with(b"0\r\n\r\n"),
        None => true,
    };

    while !done(&buf) {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(buf)
}

async fn write_reply(stream: &mut TcpStream, reply: &Reply) -> std::io::Result<()> {
    let head = format!(
        "HTTP/1.1 {} OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reply.content_type,
        reply.body.len() + reply.missing
    );
    stream.write_all(head.as_bytes()).await?;

    match reply.stall {
        Some(pause) => {
            let (first, rest) = reply.body.split_at(reply.body.len() / 2);
            stream.write_all(first).await?;
            stream.flush().await?;
            tokio::time::sleep(pause).await;
            stream.write_all(rest).await?;
        }
        None => stream.write_all(&reply.body).await?,
    }
    stream.flush().await?;
    stream.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Encodes a blank RGBA image as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::new_rgba8(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// HTTP client that never goes through a proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Editor that records requests and answers with one URL per requested image.
pub struct RecordingEditor {
    urls: Vec<String>,
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<EditRequest>>,
}

impl RecordingEditor {
    /// Answers the n-th result with `urls[n % urls.len()]`.
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with a service error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<EditRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEditor for RecordingEditor {
    async fn edit(&self, request: &EditRequest) -> outpaint::Result<Vec<EditResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            return Err(OutpaintError::Api {
                status: 500,
                message: "server error".into(),
            });
        }
        Ok((0..request.count as usize)
            .map(|idx| EditResult::new(self.urls[idx % self.urls.len()].clone()))
            .collect())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
