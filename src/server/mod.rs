// Server module entry point
// Listener creation, accept loop and per-connection serving

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config, ConfigOverrides};
    use crate::test_util::TempDir;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::task::JoinHandle;

    async fn spawn_server(dir: &TempDir) -> (SocketAddr, JoinHandle<()>) {
        let mut cfg = Config::load_from(None, &ConfigOverrides::default()).unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(cfg, dir.path().to_path_buf()));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(start_server_loop(listener, state));
        (addr, handle)
    }

    /// Send raw bytes and read until the server closes the connection
    async fn roundtrip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        response
    }

    fn get(path: &str) -> Vec<u8> {
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").into_bytes()
    }

    /// Split a raw response into lowercased head and body
    fn split(response: &[u8]) -> (String, Vec<u8>) {
        let end = response
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("no header terminator");
        let head = String::from_utf8_lossy(&response[..end]).to_ascii_lowercase();
        (head, response[end + 4..].to_vec())
    }

    #[tokio::test]
    async fn test_serves_wasm_over_tcp() {
        let dir = TempDir::new("server-wasm");
        let wasm: Vec<u8> = (0u8..=255).cycle().take(70_000).collect();
        dir.write("pkg/n_body_bg.wasm", &wasm);
        let (addr, handle) = spawn_server(&dir).await;

        let (head, body) = split(&roundtrip(addr, &get("/pkg/n_body_bg.wasm")).await);
        assert!(head.starts_with("http/1.1 200 ok"), "{head}");
        assert!(head.contains("content-type: application/wasm"), "{head}");
        assert!(head.contains("content-length: 70000"), "{head}");
        assert!(head.contains("last-modified: "), "{head}");
        assert_eq!(body, wasm);

        handle.abort();
    }

    #[tokio::test]
    async fn test_status_codes_over_tcp() {
        let dir = TempDir::new("server-status");
        dir.write("index.html", b"<title>n-body</title>");
        dir.mkdir("pkg");
        let (addr, handle) = spawn_server(&dir).await;

        let (head, body) = split(&roundtrip(addr, &get("/")).await);
        assert!(head.starts_with("http/1.1 200 ok"), "{head}");
        assert_eq!(body, b"<title>n-body</title>");

        let (head, _) = split(&roundtrip(addr, &get("/missing.js")).await);
        assert!(head.starts_with("http/1.1 404"), "{head}");

        let (head, _) = split(&roundtrip(addr, &get("/pkg")).await);
        assert!(head.starts_with("http/1.1 301"), "{head}");
        assert!(head.contains("location: /pkg/"), "{head}");

        let post = b"POST /index.html HTTP/1.1\r\nHost: localhost\r\nContent-Length: 2\r\nConnection: close\r\n\r\nhi";
        let (head, body) = split(&roundtrip(addr, post).await);
        assert!(head.starts_with("http/1.1 405"), "{head}");
        assert!(!String::from_utf8_lossy(&body).contains("n-body"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_bad_request_does_not_stop_server() {
        let dir = TempDir::new("server-bad");
        dir.write("app.js", b"console.log('ok')");
        let (addr, handle) = spawn_server(&dir).await;

        let garbage = roundtrip(addr, b"NOT HTTP AT ALL\r\n\r\n").await;
        assert!(String::from_utf8_lossy(&garbage).starts_with("HTTP/1.1 400"));

        let (head, body) = split(&roundtrip(addr, &get("/app.js")).await);
        assert!(head.contains("content-type: application/javascript"), "{head}");
        assert_eq!(body, b"console.log('ok')");

        handle.abort();
    }

    #[tokio::test]
    async fn test_head_over_tcp() {
        let dir = TempDir::new("server-head");
        dir.write("app.js", b"12345");
        let (addr, handle) = spawn_server(&dir).await;

        let request = b"HEAD /app.js HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";
        let (head, body) = split(&roundtrip(addr, request).await);
        assert!(head.starts_with("http/1.1 200 ok"), "{head}");
        assert!(head.contains("content-type: application/javascript"), "{head}");
        assert!(body.is_empty());

        handle.abort();
    }
}
