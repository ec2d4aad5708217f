//! Minimal blocking HTTP/1.1 server for integration tests.
//!
//! Serves a fixed body at `/`, a `302` hop at `/redirect`, and `404` at
//! `/missing`. Selected request headers are echoed back as `X-Echo-*`
//! response headers so tests can assert what actually reached the server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Starts a server in a background thread serving `body`. Returns the base
/// URL (e.g. `http://127.0.0.1:12345/`). Runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8]) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, echo_headers) = parse_request(request);

    match path.as_str() {
        "/redirect" => {
            let _ = stream.write_all(
                b"HTTP/1.1 302 Found\r\nLocation: /\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
        "/missing" => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
        _ => {
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                body.len(),
                echo_headers
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
        }
    }
}

/// Returns the request path and the `X-Echo-*` response header lines for the
/// request headers we mirror back (Cookie and X-Token).
fn parse_request(request: &str) -> (String, String) {
    let mut path = "/".to_string();
    let mut echo = String::new();
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            if let Some(p) = line.split_whitespace().nth(1) {
                path = p.to_string();
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("cookie") {
                echo.push_str(&format!("X-Echo-Cookie: {}\r\n", value));
            }
            if name.eq_ignore_ascii_case("x-token") {
                echo.push_str(&format!("X-Echo-Token: {}\r\n", value));
            }
        }
    }
    (path, echo)
}
