//! Browser bindings: animation frames and DOM input listeners

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, Window};

use super::driver::{Driver, FrameScheduler};
use super::input::KeyDir;
use crate::game::Game;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` backed scheduler
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn schedule(&mut self) -> Option<i32> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// A running animation-frame loop
///
/// Dropping it cancels the pending frame and releases the JS callback.
pub struct AnimationLoop {
    driver: Rc<RefCell<Driver<RafScheduler>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    /// Start calling `on_step(dt_ms)` every animation frame
    pub fn start(mut on_step: impl FnMut(f32) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let driver = Rc::new(RefCell::new(Driver::new(RafScheduler {
            window,
            callback: callback.clone(),
        })));

        let weak = Rc::downgrade(&driver);
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(driver) = weak.upgrade() {
                driver.borrow_mut().on_frame(time, &mut on_step);
            }
        }));

        driver.borrow_mut().start();
        Ok(Self { driver, callback })
    }

    pub fn is_running(&self) -> bool {
        self.driver.borrow().is_running()
    }

    pub fn stop(&self) {
        self.driver.borrow_mut().stop();
    }

    /// Re-arm a stopped loop; the first frame back only re-syncs the clock
    pub fn resume(&self) {
        self.driver.borrow_mut().start();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}

/// Route arrow/WASD keys into the game's input capture
pub fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().input.key(&event.key(), pressed) {
                // Arrow keys would otherwise scroll the page
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyups never arrive once focus is gone
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
        game.borrow_mut().input.clear();
    });
    window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Wire an on-screen direction button (touch and mouse)
pub fn setup_touch_button(
    document: &Document,
    element_id: &str,
    dir: KeyDir,
    game: Rc<RefCell<Game>>,
) -> Result<(), JsValue> {
    let Some(button) = document.get_element_by_id(element_id) else {
        log::warn!("No #{} button, touch controls disabled", element_id);
        return Ok(());
    };

    let events = [
        ("touchstart", true),
        ("touchend", false),
        ("touchcancel", false),
        ("mousedown", true),
        ("mouseup", false),
        ("mouseleave", false),
    ];
    for (event_name, pressed) in events {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if event_name.starts_with("touch") {
                event.prevent_default();
            }
            game.borrow_mut().input.touch(dir, pressed);
        });
        button.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Run `action` on the game whenever `event_name` fires on `element_id`
pub fn on_event(
    document: &Document,
    element_id: &str,
    event_name: &str,
    game: Rc<RefCell<Game>>,
    action: fn(&mut Game),
) -> Result<(), JsValue> {
    let Some(element) = document.get_element_by_id(element_id) else {
        log::warn!("No #{} element", element_id);
        return Ok(());
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        action(&mut game.borrow_mut());
    });
    element.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
