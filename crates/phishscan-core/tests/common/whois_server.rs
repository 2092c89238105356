//! Canned WHOIS server for integration tests.
//!
//! Reads one query line, answers with the reply registered for that query
//! (or a "No match" reply) and closes, as port-43 servers do.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Starts the server in a background thread. Returns its `host:port`.
pub fn start(replies: Vec<(&str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    let replies: Arc<HashMap<String, String>> = Arc::new(
        replies
            .into_iter()
            .map(|(q, r)| (q.to_ascii_lowercase(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let replies = Arc::clone(&replies);
            thread::spawn(move || handle(stream, &replies));
        }
    });
    addr.to_string()
}

fn handle(stream: std::net::TcpStream, replies: &HashMap<String, String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut reader = BufReader::new(&stream);
    let mut line = String::new();
    if reader.read_line(&mut line).is_err() {
        return;
    }
    let query = line.trim().to_ascii_lowercase();
    let reply = replies
        .get(&query)
        .cloned()
        .unwrap_or_else(|| format!("No match for \"{}\".\r\n", query.to_ascii_uppercase()));
    let mut stream = &stream;
    let _ = stream.write_all(reply.as_bytes());
    let _ = stream.flush();
}
