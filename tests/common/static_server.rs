//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by request path; unknown paths get 404. Records the
//! path and User-Agent of every request.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Content-Length to announce; defaults to the body length
    pub declared_len: Option<usize>,
    /// Send the body in pieces of this size with a pause before each one
    pub trickle: Option<(usize, Duration)>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            declared_len: None,
            trickle: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::ok(Vec::new())
        }
    }

    /// Announces `declared_len` bytes, sends `body`, then closes the connection
    pub fn truncated(body: impl Into<Vec<u8>>, declared_len: usize) -> Self {
        Self {
            declared_len: Some(declared_len),
            ..Self::ok(body)
        }
    }

    /// Sends `body` in `piece`-sized writes, sleeping `pause` before each
    pub fn trickle(body: impl Into<Vec<u8>>, piece: usize, pause: Duration) -> Self {
        Self {
            trickle: Some((piece.max(1), pause)),
            ..Self::ok(body)
        }
    }
}

/// (path, user agent) per request, in arrival order
pub type RequestLog = Arc<Mutex<Vec<(String, Option<String>)>>>;

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the request log.
pub fn start(routes: Vec<(&str, Route)>) -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let server_log = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&server_log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });

    (format!("http://127.0.0.1:{}", port), log)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>, log: &RequestLog) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let request = String::from_utf8_lossy(&request);
    let (path, user_agent) = parse_request(&request);
    log.lock().unwrap().push((path.clone(), user_agent));

    let route = routes.get(&path).cloned().unwrap_or(Route::status(404));
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.declared_len.unwrap_or(route.body.len())
    );
    let _ = stream.write_all(header.as_bytes());

    match route.trickle {
        Some((piece, pause)) => {
            let _ = stream.flush();
            for part in route.body.chunks(piece) {
                thread::sleep(pause);
                if stream.write_all(part).and_then(|_| stream.flush()).is_err() {
                    return;
                }
            }
        }
        None => {
            let _ = stream.write_all(&route.body);
        }
    }
}

fn parse_request(request: &str) -> (String, Option<String>) {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let user_agent = lines
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim().to_string());

    (path, user_agent)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
