//! Offline worker registration
//!
//! Registration is fire-and-forget: bootstrap calls `register` once and moves
//! on. Outcomes are only logged.

/// Something that installs the offline-caching worker
pub trait WorkerRegistrar {
    fn register(&self);
}

/// Registrar for hosts without an offline worker (native, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegistrar;

impl WorkerRegistrar for NoopRegistrar {
    fn register(&self) {
        log::debug!("No offline worker on this platform");
    }
}

/// What a freshly installed worker means for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// First install; the page now works offline
    Cached,
    /// A previous worker still controls the page; new content waits for reload
    UpdateWaiting,
}

impl InstallOutcome {
    /// Decided once the installing worker reaches `installed`
    pub fn from_controller(has_controller: bool) -> Self {
        if has_controller {
            InstallOutcome::UpdateWaiting
        } else {
            InstallOutcome::Cached
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            InstallOutcome::Cached => "Content is cached for offline use.",
            InstallOutcome::UpdateWaiting => "New content is available; please refresh.",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::ServiceWorkerRegistrar;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{ServiceWorkerContainer, ServiceWorkerRegistration, ServiceWorkerState};

    use super::{InstallOutcome, WorkerRegistrar};

    /// Registers a service worker script with the browser
    #[derive(Debug, Clone)]
    pub struct ServiceWorkerRegistrar {
        script_url: String,
    }

    impl ServiceWorkerRegistrar {
        pub fn new(script_url: impl Into<String>) -> Self {
            Self {
                script_url: script_url.into(),
            }
        }
    }

    impl WorkerRegistrar for ServiceWorkerRegistrar {
        fn register(&self) {
            let Some(container) = container() else {
                log::info!("Service workers not supported, skipping offline cache");
                return;
            };
            let promise = container.register(&self.script_url);
            let script_url = self.script_url.clone();

            spawn_local(async move {
                let registration = JsFuture::from(promise)
                    .await
                    .and_then(|r| r.dyn_into::<ServiceWorkerRegistration>());
                match registration {
                    Ok(registration) => {
                        log::info!("Service worker registered ({})", script_url);
                        watch_install(&registration);
                    }
                    Err(e) => log::error!("Service worker registration failed: {:?}", e),
                }
            });
        }
    }

    /// Log the outcome once a new worker finishes installing
    fn watch_install(registration: &ServiceWorkerRegistration) {
        let reg = registration.clone();
        let on_update_found = Closure::<dyn FnMut()>::new(move || {
            let Some(installing) = reg.installing() else {
                return;
            };
            let worker = installing.clone();
            let on_state_change = Closure::<dyn FnMut()>::new(move || {
                if worker.state() != ServiceWorkerState::Installed {
                    return;
                }
                let has_controller = container().is_some_and(|c| c.controller().is_some());
                log::info!("{}", InstallOutcome::from_controller(has_controller).message());
            });
            installing.set_onstatechange(Some(on_state_change.as_ref().unchecked_ref()));
            on_state_change.forget();
        });
        registration.set_onupdatefound(Some(on_update_found.as_ref().unchecked_ref()));
        on_update_found.forget();
    }

    fn container() -> Option<ServiceWorkerContainer> {
        let navigator = web_sys::window()?.navigator();
        let has_support = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
            .unwrap_or(false);
        has_support.then(|| navigator.service_worker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting<'a>(&'a Cell<u32>);

    impl WorkerRegistrar for Counting<'_> {
        fn register(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_registrar_is_object_safe() {
        let calls = Cell::new(0);
        let registrars: Vec<Box<dyn WorkerRegistrar + '_>> =
            vec![Box::new(NoopRegistrar), Box::new(Counting(&calls))];
        for r in &registrars {
            r.register();
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_first_install_is_cached() {
        let outcome = InstallOutcome::from_controller(false);
        assert_eq!(outcome, InstallOutcome::Cached);
        assert_eq!(outcome.message(), "Content is cached for offline use.");
    }

    #[test]
    fn test_install_under_controller_waits_for_refresh() {
        let outcome = InstallOutcome::from_controller(true);
        assert_eq!(outcome, InstallOutcome::UpdateWaiting);
        assert!(outcome.message().contains("please refresh"));
    }
}
