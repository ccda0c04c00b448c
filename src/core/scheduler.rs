// Animation loop state.
//
// The scheduler only decides; the caller owns the actual frame request
// (`requestAnimationFrame` on the web) and applies the returned
// [`LoopAction`].

/// What the frame driver should do after a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    RequestFrame,
    CancelFrame,
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    /// Started, but the page is hidden.
    Suspended,
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: LoopState,
    hidden: bool,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            hidden: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) -> LoopAction {
        match self.state {
            LoopState::Stopped if self.hidden => {
                self.state = LoopState::Suspended;
                LoopAction::Nothing
            }
            LoopState::Stopped => {
                self.state = LoopState::Running;
                LoopAction::RequestFrame
            }
            LoopState::Running | LoopState::Suspended => LoopAction::Nothing,
        }
    }

    /// Stop the loop. Page visibility is forgotten; it is not tracked while
    /// stopped and must be reported again before the next start.
    pub fn stop(&mut self) -> LoopAction {
        self.hidden = false;
        let was = std::mem::replace(&mut self.state, LoopState::Stopped);
        if was == LoopState::Running {
            LoopAction::CancelFrame
        } else {
            LoopAction::Nothing
        }
    }

    /// Page visibility changed. Hidden pages suspend the loop; visible pages
    /// resume it with a fresh frame.
    pub fn set_hidden(&mut self, hidden: bool) -> LoopAction {
        self.hidden = hidden;
        match (self.state, hidden) {
            (LoopState::Running, true) => {
                self.state = LoopState::Suspended;
                log::debug!("[scheduler] page hidden; pausing");
                LoopAction::CancelFrame
            }
            (LoopState::Suspended, false) => {
                self.state = LoopState::Running;
                log::debug!("[scheduler] page visible; resuming");
                LoopAction::RequestFrame
            }
            _ => LoopAction::Nothing,
        }
    }

    /// Called at the start of every frame callback. Returns whether the
    /// frame should run and another one be requested.
    pub fn tick(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
