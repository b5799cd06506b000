use crate::demo::dom::Document;
use std::collections::VecDeque;
use std::time::Instant;

const LOG_CAP: usize = 200;

/// Snapshot of everything the TUI renders: the live document plus the demo's
/// console log ring.
#[derive(Debug, Clone)]
pub struct AppState {
    pub document: Document,
    pub banner: Option<String>,
    pub logs: VecDeque<LogEntry>,
    pub start_time: Instant,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn new(mount_id: &str) -> Self {
        Self {
            document: Document::with_mount_point(mount_id),
            banner: None,
            logs: VecDeque::with_capacity(LOG_CAP),
            start_time: Instant::now(),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        if self.logs.len() >= LOG_CAP {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_ring_caps() {
        let mut state = AppState::new("root");
        for i in 0..(LOG_CAP + 10) {
            state.push_log("INFO", format!("entry {}", i));
        }
        assert_eq!(state.logs.len(), LOG_CAP);
        assert_eq!(state.logs.back().unwrap().message, format!("entry {}", LOG_CAP + 9));
    }
}
