//! Demo program: a persisted click counter
//!
//! Model is `{"count": n}`. Flags that are missing or don't decode start the
//! count at zero.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::port::Port;
use crate::program::{App, Ports, Program, ProgramConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Model {
    pub count: i64,
}

impl Model {
    pub fn decode(flags: Option<&str>) -> Self {
        let Some(json) = flags else {
            return Self::default();
        };
        match serde_json::from_str(json) {
            Ok(model) => model,
            Err(e) => {
                log::warn!("Discarding unreadable saved state: {}", e);
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Increment,
    Decrement,
    Reset,
}

impl Msg {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "+" | "inc" | "increment" => Some(Msg::Increment),
            "-" | "dec" | "decrement" => Some(Msg::Decrement),
            "0" | "reset" => Some(Msg::Reset),
            _ => None,
        }
    }
}

type View = Box<dyn FnMut(&str, &Model)>;

struct Shared {
    model: Model,
    node: String,
    view: Option<View>,
}

impl Shared {
    fn render(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view(&self.node, &self.model);
        }
    }
}

/// Program half, consumed by `init`
pub struct Counter {
    shared: Rc<RefCell<Shared>>,
    store: Port<String>,
}

/// Input half, kept by whoever drives the UI
#[derive(Clone)]
pub struct CounterHandle {
    shared: Rc<RefCell<Shared>>,
    store: Port<String>,
}

impl Counter {
    pub fn new() -> (Self, CounterHandle) {
        let shared = Rc::new(RefCell::new(Shared {
            model: Model::default(),
            node: String::new(),
            view: None,
        }));
        let store = Port::new();
        let handle = CounterHandle {
            shared: Rc::clone(&shared),
            store: store.clone(),
        };
        (Self { shared, store }, handle)
    }

    /// Called with the mount target and model after every change
    pub fn with_view(self, view: impl FnMut(&str, &Model) + 'static) -> Self {
        self.shared.borrow_mut().view = Some(Box::new(view));
        self
    }
}

impl Program for Counter {
    fn init(self, config: ProgramConfig) -> App {
        {
            let mut shared = self.shared.borrow_mut();
            shared.model = Model::decode(config.flags.as_deref());
            shared.node = config.node;
            shared.render();
        }
        App {
            ports: Ports { store: self.store },
        }
    }
}

impl CounterHandle {
    pub fn model(&self) -> Model {
        self.shared.borrow().model
    }

    /// Apply `msg`, re-render and publish the new model for saving
    pub fn update(&self, msg: Msg) {
        let encoded = {
            let mut shared = self.shared.borrow_mut();
            shared.model.count = match msg {
                Msg::Increment => shared.model.count.saturating_add(1),
                Msg::Decrement => shared.model.count.saturating_sub(1),
                Msg::Reset => 0,
            };
            shared.render();
            shared.model.encode()
        };
        if let Some(json) = encoded {
            self.store.send(json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(flags: Option<&str>) -> ProgramConfig {
        ProgramConfig {
            node: "root".to_string(),
            flags: flags.map(str::to_string),
        }
    }

    #[test]
    fn test_decode_flags() {
        assert_eq!(Model::decode(None), Model { count: 0 });
        assert_eq!(Model::decode(Some("{\"count\":4}")), Model { count: 4 });
        assert_eq!(Model::decode(Some("garbage")), Model { count: 0 });
    }

    #[test]
    fn test_update_publishes_model() {
        let (counter, handle) = Counter::new();
        let app = counter.init(config(None));
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        app.ports.store.subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));

        handle.update(Msg::Increment);
        handle.update(Msg::Increment);
        handle.update(Msg::Decrement);
        assert_eq!(handle.model().count, 1);
        assert_eq!(
            *sent.borrow(),
            vec!["{\"count\":1}", "{\"count\":2}", "{\"count\":1}"]
        );
    }

    #[test]
    fn test_view_sees_initial_and_updates() {
        let rendered = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&rendered);
        let (counter, handle) = Counter::new();
        let counter = counter.with_view(move |node, model| {
            sink.borrow_mut().push(format!("{}={}", node, model.count))
        });
        counter.init(config(Some("{\"count\":9}")));
        handle.update(Msg::Reset);
        assert_eq!(*rendered.borrow(), vec!["root=9", "root=0"]);
    }

    #[test]
    fn test_parse_msg() {
        assert_eq!(Msg::parse(" + "), Some(Msg::Increment));
        assert_eq!(Msg::parse("DEC"), Some(Msg::Decrement));
        assert_eq!(Msg::parse("reset"), Some(Msg::Reset));
        assert_eq!(Msg::parse("quit"), None);
    }
}
