//! Frame scheduling
//!
//! [`FrameLoop`] decides when the next display frame is requested from the
//! host. While running, each frame requests exactly one successor. Pausing
//! cancels the outstanding request, resuming issues a new one, and
//! cancelling is terminal.

/// Token for a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Something that can call us back on the next display frame
pub trait FrameHost {
    /// Ask for one callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<H: FrameHost + ?Sized> FrameHost for Box<H> {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Never started
    Idle,
    Running,
    /// Paused; no frame is pending
    Suspended,
    /// Torn down for good
    Cancelled,
}

/// Explicit state machine around a [`FrameHost`]
#[derive(Debug)]
pub struct FrameLoop<H> {
    host: H,
    state: LoopState,
    pending: Option<FrameHandle>,
}

impl<H: FrameHost> FrameLoop<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: LoopState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Outstanding request, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Idle → Running, requesting the first frame
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        self.request();
        true
    }

    /// Called at the top of a frame callback. Returns whether the frame
    /// should be processed.
    pub fn begin_frame(&mut self) -> bool {
        // The request being serviced is no longer pending
        self.pending = None;
        self.state == LoopState::Running
    }

    /// Called at the end of a processed frame; requests the next one
    pub fn finish_frame(&mut self) {
        if self.state == LoopState::Running && self.pending.is_none() {
            self.request();
        }
    }

    /// Running → Suspended
    pub fn suspend(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.state = LoopState::Suspended;
        self.cancel_pending();
        log::debug!("Frame loop suspended");
        true
    }

    /// Suspended → Running
    pub fn resume(&mut self) -> bool {
        if self.state != LoopState::Suspended {
            return false;
        }
        self.state = LoopState::Running;
        self.request();
        log::debug!("Frame loop resumed");
        true
    }

    /// Any → Cancelled
    pub fn cancel(&mut self) {
        if self.state == LoopState::Cancelled {
            return;
        }
        self.state = LoopState::Cancelled;
        self.cancel_pending();
        log::info!("Frame loop cancelled");
    }

    fn request(&mut self) {
        self.pending = self.host.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused a frame request");
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }
}

/// Host that only records requests; the caller steps frames by hand.
/// Used by the headless runner and tests.
#[derive(Debug, Default)]
pub struct ManualHost {
    next: i32,
    outstanding: Vec<FrameHandle>,
    requested: u32,
    cancelled: u32,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame is waiting to be delivered
    pub fn has_pending(&self) -> bool {
        !self.outstanding.is_empty()
    }

    /// Remove the oldest outstanding request, as if the display refreshed
    pub fn deliver(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.outstanding.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled += 1;
        self.outstanding.retain(|h| *h != handle);
    }
}
