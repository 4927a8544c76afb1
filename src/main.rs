//! Cache Bridge entry point
//!
//! Wires the counter demo to LocalStorage and a service worker on the web,
//! or to a JSON file and stdin natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use wasm_bindgen::prelude::*;
    use web_sys::MouseEvent;

    use cache_bridge::counter::{Counter, Model, Msg};
    use cache_bridge::storage::LocalStorage;
    use cache_bridge::worker::ServiceWorkerRegistrar;
    use cache_bridge::{Settings, bootstrap};

    /// Write the count into the mount element
    fn render(node: &str, model: &Model) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(node) {
            el.set_text_content(Some(&model.count.to_string()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Cache Bridge starting...");

        let settings = Settings::default();
        let store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let (counter, handle) = Counter::new();
        let counter = counter.with_view(render);
        let registrar = ServiceWorkerRegistrar::new(settings.worker_script.clone());

        let _started = bootstrap(store, counter, &settings, &registrar)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        if let Some(el) = document.get_element_by_id(&settings.node) {
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
                handle.update(Msg::Increment);
            });
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        log::info!("Cache Bridge running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cache Bridge (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::path::Path;

    use cache_bridge::consts::{NATIVE_SETTINGS_FILE, NATIVE_STORE_FILE};
    use cache_bridge::counter::{Counter, Model, Msg};
    use cache_bridge::{BridgeError, FileStore, NoopRegistrar, Settings, bootstrap};

    fn render(node: &str, model: &Model) {
        println!("[{}] count = {}", node, model.count);
    }

    pub fn run() -> Result<(), BridgeError> {
        let settings = Settings::load(Path::new(NATIVE_SETTINGS_FILE));
        let (counter, handle) = Counter::new();
        let counter = counter.with_view(render);

        let store = FileStore::new(NATIVE_STORE_FILE);
        log::info!("Persisting state to {}", store.path().display());

        let _started = bootstrap(
            store,
            counter,
            &settings,
            &NoopRegistrar,
        )?;

        println!("Commands: + (increment), - (decrement), reset, quit");
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                break;
            }
            match Msg::parse(line) {
                Some(msg) => handle.update(msg),
                None if line.is_empty() => {}
                None => println!("Unknown command: {}", line),
            }
            let _ = io::stdout().flush();
        }

        log::info!("Exiting with count {}", handle.model().count);
        Ok(())
    }
}
