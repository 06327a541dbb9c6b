//! Minimal HTTP/1.1 stub server for exercising the autocomplete client offline.
//!
//! Each connection is served on its own thread, so delayed responses can overlap
//! the way real in-flight requests do.
//!
//! ```no_run
//! use typeahead_test_utils::stub::{StubResponse, StubServer};
//!
//! let server = StubServer::start(|req| {
//!     if req.query_param("q").as_deref() == Some("a") {
//!         StubResponse::ok(r#"{"autocomplete": []}"#)
//!     } else {
//!         StubResponse::status(500)
//!     }
//! });
//! println!("endpoint: {}", server.url("/autocomplete"));
//! ```

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use url::Url;

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, as sent on the request line
    pub target: String,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    fn parsed(&self) -> Option<Url> {
        Url::parse("http://stub.invalid").ok()?.join(&self.target).ok()
    }

    pub fn path(&self) -> String {
        self.parsed()
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }

    /// Decoded value of the first query parameter called `name`
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.parsed()?
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    /// Held back this long before answering
    pub delay: Duration,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Handler = dyn Fn(&RecordedRequest) -> StubResponse + Send + Sync;

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Start serving on an ephemeral localhost port; runs until the test process exits
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> StubResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || serve(stream, &*handler, &recorded));
            }
        });

        Self { addr, requests }
    }

    /// Answer every request with `200 OK` and `body`
    pub fn json(body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| StubResponse::ok(body.clone()))
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("stub request log").clone()
    }
}

fn serve(stream: TcpStream, handler: &Handler, recorded: &Mutex<Vec<RecordedRequest>>) {
    let Some(request) = read_request(&stream) else {
        return;
    };
    let response = handler(&request);
    recorded.lock().expect("stub request log").push(request);

    if !response.delay.is_zero() {
        thread::sleep(response.delay);
    }

    let reason = if response.status == 200 { "OK" } else { "Stub" };
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.body.len(),
        response.body
    );
    let mut stream = stream;
    let _ = stream.write_all(raw.as_bytes());
    let _ = stream.flush();
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
    })
}
