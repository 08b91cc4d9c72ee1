use std::future::{Future, ready};
use std::pin::Pin;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_time::Duration;

pub type PauseFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Source of the computer's artificial thinking delay.
pub trait Pause {
    fn pause(&self, duration: Duration) -> PauseFuture;
}

/// Resolves at once. Used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Pause for Immediate {
    fn pause(&self, _duration: Duration) -> PauseFuture {
        Box::pin(ready(()))
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &js_sys::Function, timeout: i32) -> JsValue;
}

/// Waits on the browser's `setTimeout`. Only usable from wasm.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsTimeout;

impl Pause for JsTimeout {
    fn pause(&self, duration: Duration) -> PauseFuture {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            set_timeout(&resolve, millis);
        });
        Box::pin(async move {
            // A timer promise never rejects.
            let _ = JsFuture::from(promise).await;
        })
    }
}
