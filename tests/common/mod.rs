#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{Local, NaiveDateTime, SubsecRound, TimeDelta};
use serde_json::Value;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub const ISO: &str = "%Y-%m-%dT%H:%M:%S";

pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn days_ago(days: i64) -> String {
    (now() - TimeDelta::days(days)).format(ISO).to_string()
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub collection: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct FakeState {
    collections: HashMap<String, Vec<Value>>,
    requests: Vec<Recorded>,
    failing: Vec<(String, String)>,
}

fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl FakeState {
    fn handle(&mut self, req: Recorded) -> (u16, Value) {
        self.requests.push(req.clone());
        if self
            .failing
            .iter()
            .any(|(m, c)| *m == req.method && *c == req.collection)
        {
            return (500, serde_json::json!({"message": "boom"}));
        }
        let records = self.collections.entry(req.collection.clone()).or_default();
        match req.method.as_str() {
            "GET" => {
                let hits: Vec<Value> = records
                    .iter()
                    .filter(|r| matches_query(r, &req))
                    .cloned()
                    .collect();
                (200, Value::Array(hits))
            }
            "POST" => {
                let id = req.param("_id").unwrap_or_default().to_string();
                let target = records
                    .iter_mut()
                    .find(|r| text(r.get("_id")).as_deref() == Some(id.as_str()));
                if let (Some(Value::Object(record)), Some(Value::Object(patch))) =
                    (target, req.body.as_ref())
                {
                    for (k, v) in patch {
                        record.insert(k.clone(), v.clone());
                    }
                }
                (200, serde_json::json!({"status": "updated"}))
            }
            "PUT" => {
                if let Some(body) = req.body {
                    records.push(body);
                }
                (200, serde_json::json!({"status": "created"}))
            }
            _ => (405, Value::Null),
        }
    }
}

fn matches_query(record: &Value, req: &Recorded) -> bool {
    let mut handled: Vec<String> = vec!["time_field".into(), "epoch".into()];
    if let (Some(field), Some(epoch)) = (req.param("time_field"), req.param("epoch")) {
        match text(record.get(field)) {
            Some(v) if v.as_str() >= epoch => {}
            _ => return false,
        }
    }
    for (key, value) in &req.query {
        let Some(field) = key.strip_suffix("_operator") else {
            continue;
        };
        if value != "between" {
            continue;
        }
        let from = req.param(&format!("{}_0", field)).unwrap_or_default();
        let to = req.param(&format!("{}_1", field)).unwrap_or_default();
        match text(record.get(field)) {
            Some(v) if from <= v.as_str() && v.as_str() <= to => {}
            _ => return false,
        }
        handled.extend([
            field.to_string(),
            format!("{}_0", field),
            format!("{}_1", field),
            key.clone(),
        ]);
    }
    req.query
        .iter()
        .filter(|(k, _)| !handled.contains(k))
        .all(|(k, v)| text(record.get(k)).as_deref() == Some(v.as_str()))
}

fn serve(stream: TcpStream, state: &Mutex<FakeState>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((k, v)) = header.split_once(':') {
            if k.eq_ignore_ascii_case("content-length") {
                content_length = v.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut raw_body = vec![0u8; content_length];
    reader.read_exact(&mut raw_body)?;

    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
    let req = Recorded {
        method,
        collection: path.trim_start_matches('/').to_string(),
        query: url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        body: serde_json::from_slice(&raw_body).ok(),
    };
    let (status, payload) = state.lock().expect("fake state lock").handle(req);
    let payload = payload.to_string();
    let reason = match status {
        200 => "OK",
        500 => "Internal Server Error",
        _ => "Unexpected",
    };
    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        payload.len(),
        payload
    )?;
    stream.flush()
}

/// Metadata service stand-in: one request per connection, answered in order.
pub struct FakeMetadata {
    pub url: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakeMetadata {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake metadata");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let state = Arc::new(Mutex::new(FakeState::default()));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                if let Ok(stream) = stream {
                    let _ = serve(stream, &shared);
                }
            }
        });
        Self { url, state }
    }

    pub fn insert(&self, collection: &str, record: Value) {
        self.state
            .lock()
            .expect("fake state lock")
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub fn fail(&self, method: &str, collection: &str) {
        self.state
            .lock()
            .expect("fake state lock")
            .failing
            .push((method.to_string(), collection.to_string()));
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .expect("fake state lock")
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().expect("fake state lock").requests.clone()
    }

    pub fn requests_with(&self, method: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub metadata: FakeMetadata,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).expect("create isolated home");
        Self {
            _tmp: tmp,
            home,
            metadata: FakeMetadata::start(),
        }
    }

    /// Binary with an isolated HOME and no ambient metadata settings.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("data-release");
        cmd.env("HOME", &self.home)
            .env_remove("METADATA_ENDPOINT")
            .env_remove("METADATA_PORT")
            .env_remove("ADMIN_USER_ID")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--endpoint").arg(&self.metadata.url);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
