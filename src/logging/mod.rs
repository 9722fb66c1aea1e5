//! Log output that stays off the countdown screen.
//!
//! While the terminal is in countdown mode, anything written to stderr lands
//! on top of the big digits. [`DeferredStderr`] is the subscriber's writer:
//! it passes output straight through, except while a [`Hold`] is alive, when
//! output is kept back and written out as the hold drops.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Upper bound on output kept back during one hold.
pub const MAX_HELD_BYTES: usize = 1 << 20;

struct State {
    sink: Box<dyn Write + Send>,
    held: bool,
    pending: Vec<u8>,
    dropped: usize,
}

impl State {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        if !self.held {
            return self.sink.write_all(buf);
        }
        if self.pending.len() + buf.len() > MAX_HELD_BYTES {
            self.dropped += buf.len();
        } else {
            self.pending.extend_from_slice(buf);
        }
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        self.held = false;
        let pending = std::mem::take(&mut self.pending);
        self.sink.write_all(&pending)?;
        if self.dropped > 0 {
            writeln!(self.sink, "({} バイトのログを破棄しました)", self.dropped)?;
            self.dropped = 0;
        }
        self.sink.flush()
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

// ============================================================================
// DeferredStderr
// ============================================================================

/// Writer for the tracing subscriber that can be held back.
#[derive(Clone)]
pub struct DeferredStderr {
    state: Arc<Mutex<State>>,
}

impl DeferredStderr {
    /// Creates a writer for stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(io::stderr())
    }

    /// Creates a writer for an arbitrary sink.
    #[must_use]
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                sink: Box::new(sink),
                held: false,
                pending: Vec::new(),
                dropped: 0,
            })),
        }
    }

    /// Keeps output back until the returned guard drops. Holds do not nest.
    #[must_use]
    pub fn hold(&self) -> Hold {
        lock(&self.state).held = true;
        Hold {
            state: Arc::clone(&self.state),
        }
    }

    /// Returns true while output is being kept back.
    #[must_use]
    pub fn is_held(&self) -> bool {
        lock(&self.state).held
    }
}

impl Default for DeferredStderr {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MakeWriter<'a> for DeferredStderr {
    type Writer = DeferredWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DeferredWriter {
            state: Arc::clone(&self.state),
        }
    }
}

/// Per-event writer handed out by [`DeferredStderr`].
pub struct DeferredWriter {
    state: Arc<Mutex<State>>,
}

impl Write for DeferredWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.state).write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = lock(&self.state);
        if state.held {
            Ok(())
        } else {
            state.sink.flush()
        }
    }
}

// ============================================================================
// Hold
// ============================================================================

/// Guard returned by [`DeferredStderr::hold`].
#[must_use = "output is released as soon as the hold drops"]
pub struct Hold {
    state: Arc<Mutex<State>>,
}

impl Drop for Hold {
    fn drop(&mut self) {
        // Nowhere left to report a failed write to stderr.
        let _ = lock(&self.state).release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer() -> (DeferredStderr, SharedBuf) {
        let buf = SharedBuf::default();
        (DeferredStderr::with_sink(buf.clone()), buf)
    }

    // ------------------------------------------------------------------------
    // Writer Tests
    // ------------------------------------------------------------------------

    mod writer_tests {
        use super::*;

        #[test]
        fn test_passes_through_when_not_held() {
            let (out, buf) = writer();
            out.make_writer().write_all(b"before\n").unwrap();
            assert_eq!(buf.contents(), "before\n");
            assert!(!out.is_held());
        }

        #[test]
        fn test_hold_defers_until_drop() {
            let (out, buf) = writer();

            let hold = out.hold();
            assert!(out.is_held());
            out.make_writer().write_all(b"one\n").unwrap();
            out.make_writer().write_all(b"two\n").unwrap();
            assert_eq!(buf.contents(), "");

            drop(hold);
            assert_eq!(buf.contents(), "one\ntwo\n");
            assert!(!out.is_held());

            out.make_writer().write_all(b"after\n").unwrap();
            assert_eq!(buf.contents(), "one\ntwo\nafter\n");
        }

        #[test]
        fn test_excess_output_is_counted() {
            let (out, buf) = writer();

            let hold = out.hold();
            let chunk = vec![b'x'; MAX_HELD_BYTES];
            out.make_writer().write_all(&chunk).unwrap();
            out.make_writer().write_all(b"lost\n").unwrap();
            drop(hold);

            let contents = buf.contents();
            assert!(contents.starts_with(&"x".repeat(MAX_HELD_BYTES)));
            assert!(!contents.contains("lost"));
            assert!(contents.contains("5 バイト"));
        }
    }

    // ------------------------------------------------------------------------
    // Subscriber Tests
    // ------------------------------------------------------------------------

    mod subscriber_tests {
        use super::*;
        use crate::alarm::{Alarm, SystemAlarm};
        use crate::notification::{create_timer_complete_content, MockNotificationSender};

        fn subscriber(out: &DeferredStderr) -> impl tracing::Subscriber + Send + Sync {
            tracing_subscriber::fmt()
                .with_writer(out.clone())
                .with_ansi(false)
                .without_time()
                .finish()
        }

        #[test]
        fn test_warning_during_hold_appears_after() {
            let (out, buf) = writer();

            tracing::subscriber::with_default(subscriber(&out), || {
                let hold = out.hold();
                tracing::warn!("fallback glyph does not fit");
                assert_eq!(buf.contents(), "");
                drop(hold);
            });

            assert!(buf.contents().contains("fallback glyph does not fit"));
        }

        #[test]
        fn test_alarm_failure_stays_off_screen() {
            let (out, buf) = writer();
            let sender = Arc::new(MockNotificationSender::new());
            sender.set_should_fail(true);
            let alarm = SystemAlarm::new(create_timer_complete_content(""))
                .with_notifier(Box::new(Arc::clone(&sender)));

            tracing::subscriber::with_default(subscriber(&out), || {
                let hold = out.hold();
                alarm.ring();
                assert_eq!(buf.contents(), "");
                drop(hold);
            });

            assert!(buf.contents().contains("Notification failed"));
        }
    }
}
