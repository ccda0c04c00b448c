use crate::core::LoopAction;
use crate::session::Session;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` driver for the session's [`FrameScheduler`].
///
/// The callback holds only weak references, so dropping the session ends the
/// loop without a reference cycle.
///
/// [`FrameScheduler`]: crate::core::FrameScheduler
pub struct FrameLoop {
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameLoop {
    pub fn new(session: &Rc<RefCell<Session>>) -> Rc<Self> {
        let frame = Rc::new(Self {
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak_frame: Weak<FrameLoop> = Rc::downgrade(&frame);
        let weak_session = Rc::downgrade(session);
        *frame.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let (Some(frame), Some(session)) = (weak_frame.upgrade(), weak_session.upgrade())
            else {
                return;
            };
            frame.raf_id.set(None);
            let keep_going = match session.try_borrow_mut() {
                Ok(mut s) => s.frame(),
                Err(_) => {
                    log::warn!("[frame] session busy; skipping frame");
                    true
                }
            };
            if keep_going {
                frame.request();
            }
        }) as Box<dyn FnMut()>));
        frame
    }

    pub fn apply(&self, action: LoopAction) {
        match action {
            LoopAction::RequestFrame => self.request(),
            LoopAction::CancelFrame => self.cancel(),
            LoopAction::Nothing => {}
        }
    }

    fn request(&self) {
        if self.raf_id.get().is_some() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
