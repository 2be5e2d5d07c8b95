//! Page render coalescing and prev/next navigation.
//!
//! A page render is asynchronous and only one may run at a time. Requests that
//! arrive meanwhile collapse into a single pending slot: the newest wins and
//! intermediate pages are never painted.

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;

/// At most one render in flight plus at most one superseding request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderQueue {
    in_flight: Option<u32>,
    pending: Option<u32>,
}

impl RenderQueue {
    /// Ask for `page` to be painted. Returns the page to start now, or `None`
    /// when a render is already running (the request is parked as pending,
    /// replacing any older pending request).
    pub fn request(&mut self, page: u32) -> Option<u32> {
        if self.in_flight.is_some() {
            self.pending = Some(page);
            return None;
        }
        self.in_flight = Some(page);
        Some(page)
    }

    /// Mark the running render done. Returns the pending page, which is now
    /// in flight, if there was one.
    pub fn finish(&mut self) -> Option<u32> {
        self.in_flight = self.pending.take();
        self.in_flight
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    #[must_use]
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }
}

/// Text and button states for the page controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControls {
    /// `"current / total"`.
    pub label: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Result of a finished render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Painted {
    /// The page that just finished painting.
    pub page: u32,
    /// The page to start rendering next, if one was queued.
    pub next: Option<u32>,
}

/// Current page of a single-canvas viewer plus its render queue.
#[derive(Clone, Debug)]
pub struct PageNavigator {
    current: u32,
    total: u32,
    queue: RenderQueue,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self { current: 1, total: 0, queue: RenderQueue::default() }
    }
}

impl PageNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with `total` pages was loaded. Returns the first page to
    /// render, or `None` for an empty document.
    pub fn open(&mut self, total: u32) -> Option<u32> {
        self.total = total;
        self.current = 1;
        self.queue = RenderQueue::default();
        if total == 0 {
            return None;
        }
        self.queue.request(self.current)
    }

    /// Step forward. Returns the page to start rendering now, if any.
    pub fn next(&mut self) -> Option<u32> {
        if self.current >= self.total {
            return None;
        }
        self.current += 1;
        self.queue.request(self.current)
    }

    /// Step back. Returns the page to start rendering now, if any.
    pub fn prev(&mut self) -> Option<u32> {
        if self.current <= 1 || self.total == 0 {
            return None;
        }
        self.current -= 1;
        self.queue.request(self.current)
    }

    /// Record that the in-flight render completed.
    ///
    /// Returns `None` if nothing was rendering.
    pub fn render_finished(&mut self) -> Option<Painted> {
        let page = self.queue.in_flight()?;
        let next = self.queue.finish();
        Some(Painted { page, next })
    }

    /// Control state after `page` was painted.
    #[must_use]
    pub fn controls_for(&self, page: u32) -> PageControls {
        PageControls {
            label: format!("{page} / {}", self.total),
            prev_disabled: page <= 1,
            next_disabled: page >= self.total,
        }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }
}
