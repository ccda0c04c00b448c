use crate::dom::Listener;
use crate::frame::FrameLoop;
use crate::session::Session;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewport-intersection watcher shared by all surfaces.
pub struct ViewObserver {
    observer: web::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl ViewObserver {
    pub fn new(session: Weak<RefCell<Session>>) -> Result<Self, wasm_bindgen::JsValue> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                let Some(session) = session.upgrade() else {
                    return;
                };
                let Ok(mut s) = session.try_borrow_mut() else {
                    log::warn!("[events] session busy; dropping intersection update");
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    s.set_in_view(&entry.target(), entry.is_intersecting());
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let observer = web::IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, el: &web::Element) {
        self.observer.observe(el);
    }

    pub fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Window and document listeners feeding the session: pointer movement,
/// resize and page visibility. They are removed when the returned guards
/// are dropped.
pub fn wire_global_listeners(
    session: &Rc<RefCell<Session>>,
    frame: &Rc<FrameLoop>,
    document: &web::Document,
) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let Some(window) = web::window() else {
        return listeners;
    };

    let weak = Rc::downgrade(session);
    listeners.push(Listener::new(&window, "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Ok(mut s) = session.try_borrow_mut() else {
            return;
        };
        s.pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
    }));

    let weak = Rc::downgrade(session);
    listeners.push(Listener::new(&window, "resize", move |_| {
        let Some(session) = weak.upgrade() else {
            return;
        };
        let Ok(mut s) = session.try_borrow_mut() else {
            log::warn!("[events] session busy; dropping resize");
            return;
        };
        s.resize();
    }));

    let weak = Rc::downgrade(session);
    let weak_frame = Rc::downgrade(frame);
    listeners.push(Listener::new(document, "visibilitychange", move |_| {
        let (Some(session), Some(frame)) = (weak.upgrade(), weak_frame.upgrade()) else {
            return;
        };
        let action = match session.try_borrow_mut() {
            Ok(mut s) => s.page_visibility_changed(),
            Err(_) => return,
        };
        frame.apply(action);
    }));

    listeners
}
