//! Outbound event channel
//!
//! A `Port` carries values from a program to whoever subscribed. Delivery is
//! synchronous: `send` returns after every subscriber has seen the value.
//! Values sent while a delivery is already running (a subscriber that sends
//! again) are queued and delivered afterwards, so subscribers always observe
//! values in emission order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type Handler<T> = Box<dyn FnMut(&T)>;

struct PortInner<T> {
    subscribers: RefCell<Vec<Handler<T>>>,
    /// Handlers registered mid-delivery, merged once the current value is done
    joining: RefCell<Vec<Handler<T>>>,
    pending: RefCell<VecDeque<T>>,
    delivering: Cell<bool>,
}

/// Clears the delivering flag even if a handler unwinds
struct Delivering<'a>(&'a Cell<bool>);

impl Drop for Delivering<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Cloneable handle to one outbound channel. All clones share subscribers.
pub struct Port<T> {
    inner: Rc<PortInner<T>>,
}

impl<T> Clone for Port<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Port<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Port<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(PortInner {
                subscribers: RefCell::new(Vec::new()),
                joining: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
            }),
        }
    }

    /// Register a handler for every future value. There is no unsubscribe.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) {
        let handler: Handler<T> = Box::new(handler);
        match self.inner.subscribers.try_borrow_mut() {
            Ok(mut subscribers) => subscribers.push(handler),
            Err(_) => self.inner.joining.borrow_mut().push(handler),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        let active = self.inner.subscribers.try_borrow().map_or(0, |s| s.len());
        active + self.inner.joining.borrow().len()
    }

    /// Deliver `value` to all subscribers, in subscription order.
    pub fn send(&self, value: T) {
        self.inner.pending.borrow_mut().push_back(value);
        if self.inner.delivering.replace(true) {
            // Outer send drains the queue
            return;
        }
        let _guard = Delivering(&self.inner.delivering);

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };

            {
                let mut subscribers = self.inner.subscribers.borrow_mut();
                for handler in subscribers.iter_mut() {
                    handler(&value);
                }
            }

            let joined: Vec<_> = self.inner.joining.borrow_mut().drain(..).collect();
            self.inner.subscribers.borrow_mut().extend(joined);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>(port: &Port<T>) -> Rc<RefCell<Vec<T>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        port.subscribe(move |v: &T| sink.borrow_mut().push(v.clone()));
        seen
    }

    #[test]
    fn test_send_without_subscribers() {
        let port: Port<String> = Port::new();
        port.send("dropped".to_string());
        assert_eq!(port.subscriber_count(), 0);
    }

    #[test]
    fn test_delivers_in_order() {
        let port = Port::new();
        let seen = recorder(&port);
        for i in 0..5 {
            port.send(i);
        }
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let port = Port::new();
        let sender = port.clone();
        let seen = recorder(&port);
        sender.send("x");
        assert_eq!(*seen.borrow(), vec!["x"]);
    }

    #[test]
    fn test_all_subscribers_see_each_value() {
        let port = Port::new();
        let a = recorder(&port);
        let b = recorder(&port);
        port.send(7);
        port.send(8);
        assert_eq!(*a.borrow(), vec![7, 8]);
        assert_eq!(*b.borrow(), vec![7, 8]);
    }

    #[test]
    fn test_reentrant_send_is_queued() {
        let port = Port::new();
        let echo = port.clone();
        port.subscribe(move |v: &u32| {
            if *v == 1 {
                echo.send(2);
            }
        });
        let seen = recorder(&port);

        port.send(1);
        port.send(3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_delivery_resumes_after_handler_panic() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let port = Port::new();
        port.subscribe(|v: &u32| {
            if *v == 1 {
                panic!("handler failed");
            }
        });
        let seen = recorder(&port);

        let result = catch_unwind(AssertUnwindSafe(|| port.send(1)));
        assert!(result.is_err());

        port.send(2);
        port.send(3);
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_subscribe_during_delivery() {
        let port = Port::new();
        let late = Rc::new(RefCell::new(Vec::new()));
        let hook = port.clone();
        let sink = Rc::clone(&late);
        let mut armed = true;
        port.subscribe(move |_: &u32| {
            if armed {
                armed = false;
                let sink = Rc::clone(&sink);
                hook.subscribe(move |v: &u32| sink.borrow_mut().push(*v));
            }
        });

        port.send(1);
        port.send(2);
        assert_eq!(*late.borrow(), vec![2]);
        assert_eq!(port.subscriber_count(), 2);
    }
}
