#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;

/// 12 complete records.
pub const GOOD_DATA: &str = include_str!("../fixtures/good.jsonl");
/// 16 records: one without RECORD_ID, one without DATA_SOURCE, two malformed.
pub const BAD_DATA: &str = include_str!("../fixtures/bad.jsonl");

pub fn write_temp(contents: &[u8], suffix: &str) -> NamedTempFile {
  let mut file = tempfile::Builder::new()
    .prefix("jsonl-validate-")
    .suffix(suffix)
    .tempfile()
    .expect("create temp file");
  file.write_all(contents).expect("write temp file");
  file.flush().expect("flush temp file");
  file
}

pub fn file_url(file: &NamedTempFile) -> String {
  format!("file://{}", file.path().display())
}

pub fn gzip(contents: &[u8]) -> Vec<u8> {
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(contents).expect("gzip write");
  encoder.finish().expect("gzip finish")
}

/// One-shot HTTP server on loopback. Answers the first request with `status`,
/// a Content-Length of `declared_len` (defaults to the body length) and `body`,
/// then closes the connection.
pub struct OneShotServer {
  pub port: u16,
  handle: JoinHandle<()>,
}

impl OneShotServer {
  pub fn start(status: &str, body: Vec<u8>, declared_len: Option<usize>) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    let status = status.to_string();
    let handle = thread::spawn(move || {
      let (mut stream, _) = match listener.accept() {
        Ok(conn) => conn,
        Err(_) => return,
      };
      let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
      let mut line = String::new();
      // Drain request headers.
      while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
        if line == "\r\n" {
          break;
        }
        line.clear();
      }
      let len = declared_len.unwrap_or(body.len());
      let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, len
      );
      let _ = stream.write_all(head.as_bytes());
      let _ = stream.write_all(&body);
      let _ = stream.flush();
    });
    Self { port, handle }
  }

  pub fn url(&self, name: &str) -> String {
    format!("http://127.0.0.1:{}/{}", self.port, name)
  }

  pub fn join(self) {
    let _ = self.handle.join();
  }
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
  listener.local_addr().expect("local addr").port()
}
