//! Last-query-wins bookkeeping for asynchronous catalog lookups.
//!
//! Every outgoing request is tagged with a serial number drawn from one
//! monotonically increasing counter. Only the most recently issued serial of a
//! channel is current; a response carrying any other serial is discarded, no
//! matter in which order responses arrive.

use std::collections::BTreeMap;
use std::fmt;

const CHANNEL_KEY: &str = "tierboard.channel";
const SERIAL_KEY: &str = "tierboard.serial";

/// Independent result streams. A detail lookup never supersedes a search, and
/// a search never supersedes the category listing shown when the query is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Search,
    Browse,
    Detail,
}

impl Channel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Browse => "browse",
            Self::Detail => "detail",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Browse => 1,
            Self::Detail => 2,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "browse" => Some(Self::Browse),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub channel: Channel,
    pub serial: u64,
}

impl RequestTag {
    /// Encodes the tag into a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CHANNEL_KEY.to_string(), self.channel.as_str().to_string()),
            (SERIAL_KEY.to_string(), self.serial.to_string()),
        ])
    }

    /// Reads a tag back from a web request context map.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let channel = context.get(CHANNEL_KEY).and_then(|c| Channel::parse(c))?;
        let serial = context.get(SERIAL_KEY).and_then(|s| s.parse().ok())?;
        Some(Self { channel, serial })
    }
}

/// Tracks the latest request per channel.
#[derive(Debug, Clone, Default)]
pub struct QueryTracker {
    next_serial: u64,
    latest: [Option<u64>; 3],
}

impl QueryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn latest_mut(&mut self, channel: Channel) -> &mut Option<u64> {
        &mut self.latest[channel.slot()]
    }

    const fn latest(&self, channel: Channel) -> Option<u64> {
        self.latest[channel.slot()]
    }

    /// Issues a new tag, superseding every earlier request of the channel.
    pub fn issue(&mut self, channel: Channel) -> RequestTag {
        self.next_serial += 1;
        let serial = self.next_serial;
        *self.latest_mut(channel) = Some(serial);
        RequestTag { channel, serial }
    }

    /// Whether a response carrying `tag` should be applied.
    #[must_use]
    pub const fn is_current(&self, tag: &RequestTag) -> bool {
        matches!(self.latest(tag.channel), Some(serial) if serial == tag.serial)
    }

    /// Marks the response for `tag` as consumed. Returns `false` for superseded
    /// or already-consumed tags, which the caller must drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierboard::catalog::{Channel, QueryTracker};
    ///
    /// let mut tracker = QueryTracker::new();
    /// let old = tracker.issue(Channel::Search);
    /// let new = tracker.issue(Channel::Search);
    ///
    /// assert!(tracker.accept(&new));
    /// assert!(!tracker.accept(&old));
    /// ```
    pub fn accept(&mut self, tag: &RequestTag) -> bool {
        if !self.is_current(tag) {
            tracing::debug!(channel = %tag.channel, serial = tag.serial, "discarding superseded response");
            return false;
        }
        *self.latest_mut(tag.channel) = None;
        true
    }

    /// Drops interest in every in-flight request of `channel`.
    pub fn invalidate(&mut self, channel: Channel) {
        *self.latest_mut(channel) = None;
    }

    /// Whether a request of `channel` is still awaited.
    #[must_use]
    pub const fn is_pending(&self, channel: Channel) -> bool {
        self.latest(channel).is_some()
    }
}
