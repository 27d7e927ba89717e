// src/test_support.rs
// =============================================================================
// A throwaway HTTP server that serves fake directory listings.
//
// Only compiled for tests. Each server binds 127.0.0.1:0, counts how often
// every path was requested and answers 404 for paths it does not know. It
// shuts down when dropped.
// =============================================================================

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct ListingServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    shutdown: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListingServer {
    /// Serves `pages` (path -> body); every other path is a 404
    pub fn start(pages: Vec<(&str, String)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());

        let pages: HashMap<String, String> = pages
            .into_iter()
            .map(|(path, body)| (path.to_string(), body))
            .collect();
        let hits = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();

        let counter = hits.clone();
        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(20)) {
                Ok(Some(request)) => request,
                Ok(None) => continue,
                Err(_) => break,
            };

            let url = request.url().to_string();
            let path = url.split('?').next().unwrap_or(&url).to_string();
            *counter.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

            let response = match pages.get(&path) {
                Some(body) => tiny_http::Response::from_string(body.clone())
                    .with_header(
                        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..])
                            .unwrap(),
                    )
                    .with_status_code(200),
                None => tiny_http::Response::from_string("not found").with_status_code(404),
            };
            let _ = request.respond(response);
        });

        ListingServer {
            base_url,
            hits,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Absolute URL of `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// How many times `path` was requested
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

impl Drop for ListingServer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// An Apache-style listing page linking to `hrefs`
///
/// Comes with the usual noise a real listing has: sort links and a
/// "Parent Directory" link.
pub fn listing(hrefs: &[&str]) -> String {
    let mut html = String::from(
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\">\n<html><head><title>Index of /</title></head><body>\n<h1>Index of /</h1>\n<pre><a href=\"?C=N;O=D\">Name</a> <a href=\"?C=M;O=A\">Last modified</a><hr>\n<a href=\"/\">Parent Directory</a>\n",
    );
    for href in hrefs {
        html.push_str(&format!("<a href=\"{0}\">{0}</a>\n", href));
    }
    html.push_str("</pre></body></html>\n");
    html
}
