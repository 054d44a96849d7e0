//! Ring buffer of recent control-loop events.
//!
//! The control loop pushes one line per notable event (startup, faults, band
//! changes, unit toggles, shutdown). The desktop monitor shows the lines in its
//! status panel; the firmware reports the same events through defmt.
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.push("Monitor started");
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of lines kept.
pub const EVENT_LOG_SIZE: usize = 6;

/// Maximum characters per line (longer messages are truncated).
pub const EVENT_LINE_LENGTH: usize = 48;

/// One log line.
pub type EventLine = String<EVENT_LINE_LENGTH>;

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Last [`EVENT_LOG_SIZE`] messages, oldest first.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    buffer: Deque<EventLine, EVENT_LOG_SIZE>,
}

impl EventLog {
    /// Empty log.
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Append a message, dropping the oldest when full.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line = EventLine::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(line).ok();
    }

    /// Messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Most recent message.
    pub fn latest(&self) -> Option<&str> { self.buffer.back().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}
