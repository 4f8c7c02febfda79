//! # MessageList Component
//!
//! Scrollable view of the message log.
//!
//! ## Responsibilities
//!
//! - Display every log entry, oldest first
//! - Keep the newest entry visible whenever the log grows
//! - Let the user scroll back between appends
//! - Cache entry heights (entries are immutable, so a height never changes
//!   unless the width does)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&'a MessageLog` (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::messages::{Message, MessageLog};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageLine;
use crate::tui::event::TuiEvent;

/// Clamp a row count or position to what a ratatui `Rect` can hold.
fn to_rows(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
///
/// `offset` counts rows from the top of the whole log and is unbounded.
/// The `ScrollView` only ever holds a window of entries around the
/// viewport, so `scroll_state` is relative to that window.
pub struct MessageListState {
    /// First log row shown at the top of the viewport
    pub offset: usize,
    /// Scroll position inside the current render window
    scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on render
    pub stick_to_bottom: bool,
    /// Log length at the previous render; growth re-pins to the bottom
    pub seen_count: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            seen_count: 0,
            viewport_height: 0,
        }
    }

    pub fn max_offset(&self) -> usize {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height as usize)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_offset = self.max_offset();
        if self.offset >= max_offset {
            self.stick_to_bottom = true;
            self.offset = max_offset;
        }
    }

    /// Note the current log length. Returns true if it grew since last time.
    pub fn observe(&mut self, count: usize) -> bool {
        let grew = count > self.seen_count;
        self.seen_count = count;
        grew
    }

    fn page(&self) -> usize {
        (self.viewport_height as usize).max(1)
    }
}

/// Scrollable log view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub log: &'a MessageLog,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, log: &'a MessageLog) -> Self {
        Self { state, log }
    }

    /// Scrollbar over the whole log, not just the render window.
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let max_offset = self.state.max_offset();
        if max_offset == 0 {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total rows
        let mut scrollbar_state = ScrollbarState::new(max_offset)
            .position(self.state.offset)
            .viewport_content_length(area.height as usize);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar column
        let log = self.log;
        let entries = log.entries();

        // 1. Update layout cache
        self.state.layout.update(entries, content_width);

        // 2. New entries always bring the view back to the bottom
        if self.state.observe(entries.len()) {
            self.state.stick_to_bottom = true;
        }

        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.offset = self.state.max_offset();
        } else {
            self.state.clamp_scroll();
        }

        // 3. Render the window of entries around the viewport into a ScrollView
        let layout = &self.state.layout;
        let window = layout.visible_range(self.state.offset, area.height);
        let window_top = layout.top_of(window.start);
        let window_height = to_rows(layout.top_of(window.end) - window_top);

        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in window {
            let y = to_rows(layout.top_of(i) - window_top);
            let rect = Rect::new(0, y, content_width, to_rows(layout.heights[i]));
            scroll_view.render_widget(MessageLine::new(&entries[i]), rect);
        }

        let y = to_rows(self.state.offset - window_top);
        self.state.scroll_state.set_offset(Position { x: 0, y });
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        self.render_scrollbar(frame, area);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is
/// recreated each frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(1);
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.offset = self.offset.saturating_add(1);
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.offset = self.offset.saturating_sub(self.page());
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.offset = self.offset.saturating_add(self.page());
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements, in rows from the top of the log.
pub struct LayoutCache {
    pub heights: Vec<usize>,
    pub prefix_heights: Vec<usize>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for `entry_count` entries at `content_width`.
    pub fn reusable_count(&self, entry_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer entries than cached means a different log
        if entry_count < self.heights.len() {
            return 0;
        }
        self.heights.len()
    }

    /// Measure entries not yet cached and extend prefix sums.
    pub fn update(&mut self, entries: &[Message], content_width: u16) {
        let reusable = self.reusable_count(entries.len(), content_width);
        self.heights.truncate(reusable);
        self.prefix_heights.truncate(reusable);
        for entry in entries.iter().skip(reusable) {
            self.heights
                .push(MessageLine::calculate_height(entry, content_width));
        }
        self.content_width = content_width;
        self.extend_prefix_heights();
    }

    fn extend_prefix_heights(&mut self) {
        let mut acc = self.total_height();
        for &h in &self.heights[self.prefix_heights.len()..] {
            acc += h;
            self.prefix_heights.push(acc);
        }
    }

    pub fn total_height(&self) -> usize {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Log row where entry `index` starts. `index == len` gives the total height.
    pub fn top_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(self.total_height())
        }
    }

    /// Entries overlapping the viewport, plus half a screen either side.
    pub fn visible_range(&self, scroll_offset: usize, viewport_height: u16) -> std::ops::Range<usize> {
        let viewport_height = viewport_height as usize;
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
