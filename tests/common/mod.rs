#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub struct Sidecar {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: BufReader<ChildStdout>,
    next_id: u64,
}

impl Sidecar {
    pub fn spawn() -> Self {
        let exe = env!("CARGO_BIN_EXE_assignmated");
        let mut child = Command::new(exe)
            .env_remove("ASSIGNMATE_WORKSPACE")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn assignmated");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = child.stdout.take().expect("child stdout");
        Self {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
            next_id: 0,
        }
    }

    pub fn send_raw(&mut self, line: &str) -> serde_json::Value {
        let stdin = self.stdin.as_mut().expect("stdin open");
        writeln!(stdin, "{}", line).expect("write request");
        stdin.flush().expect("flush request");

        let mut out = String::new();
        self.reader.read_line(&mut out).expect("read response line");
        assert!(!out.trim().is_empty(), "empty response for {}", line);
        serde_json::from_str(out.trim()).expect("parse response json")
    }

    pub fn request(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        self.next_id += 1;
        let id = self.next_id.to_string();
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });
        let value = self.send_raw(&payload.to_string());
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        value
    }

    pub fn request_ok(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let value = self.request(method, params);
        assert!(
            value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            "{} failed: {}",
            method,
            value
        );
        value.get("result").cloned().unwrap_or_else(|| json!({}))
    }

    /// Sends a request that must fail and returns its error code.
    pub fn request_err(&mut self, method: &str, params: serde_json::Value) -> String {
        let value = self.request(method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} unexpectedly succeeded: {}",
            method,
            value
        );
        value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string()
    }

    pub fn select_workspace(&mut self, path: &std::path::Path) {
        let _ = self.request_ok("workspace.select", json!({ "path": path.to_string_lossy() }));
    }

    pub fn register_teacher(&mut self, user_id: &str, subject: &str) {
        let _ = self.request_ok(
            "accounts.register",
            json!({
                "role": "teacher",
                "userId": user_id,
                "password": "pw",
                "confirmPassword": "pw",
                "subject": subject
            }),
        );
    }

    pub fn register_student(&mut self, user_id: &str, full_name: &str) {
        let _ = self.request_ok(
            "accounts.register",
            json!({
                "role": "student",
                "userId": user_id,
                "password": "pw",
                "confirmPassword": "pw",
                "fullName": full_name,
                "email": format!("{user_id}@school.test")
            }),
        );
    }

    pub fn login(&mut self, user_id: &str, role: &str) -> serde_json::Value {
        self.request_ok(
            "session.login",
            json!({ "userId": user_id, "password": "pw", "role": role }),
        )
    }

    pub fn close(mut self) {
        drop(self.stdin.take());
        let _ = self.child.wait();
    }
}
