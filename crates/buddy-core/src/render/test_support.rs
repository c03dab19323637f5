//! Instrumented sink and indicator shared by the render tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::spinner::ThinkingIndicator;

/// One observable step, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A chunk reached the sink.
    Write(String),
    /// The indicator went from stopped to running.
    Start,
    /// The indicator went from running to stopped and `stop` returned.
    Stop,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

/// In-memory sink recording each `write` call as one chunk.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    log: EventLog,
}

impl Capture {
    pub fn with_log(log: EventLog) -> Self {
        Self { log }
    }

    pub fn chunks(&self) -> Vec<String> {
        self.log
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write(chunk) => Some(chunk),
                _ => None,
            })
            .collect()
    }

    pub fn contents(&self) -> String {
        self.chunks().concat()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log
            .push(Event::Write(String::from_utf8_lossy(buf).into_owned()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that accepts `budget` writes and then fails with `BrokenPipe`.
pub struct FailingSink {
    pub inner: Capture,
    pub budget: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        self.budget -= 1;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Indicator with the same idempotence rules as the real spinner that logs
/// its effective transitions and counts every call.
#[derive(Debug)]
pub struct RecordingIndicator {
    log: EventLog,
    running: bool,
    start_calls: usize,
    stop_calls: usize,
    starts: usize,
    stops: usize,
}

impl RecordingIndicator {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            running: false,
            start_calls: 0,
            stop_calls: 0,
            starts: 0,
            stops: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls
    }

    /// Stopped -> Running transitions.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Running -> Stopped transitions.
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl ThinkingIndicator for RecordingIndicator {
    fn start(&mut self) {
        self.start_calls += 1;
        if !self.running {
            self.running = true;
            self.starts += 1;
            self.log.push(Event::Start);
        }
    }

    async fn stop(&mut self) {
        self.stop_calls += 1;
        if self.running {
            self.running = false;
            self.stops += 1;
            self.log.push(Event::Stop);
        }
    }
}
