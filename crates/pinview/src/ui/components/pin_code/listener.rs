//! Completion callback surface exposed to host applications.

use std::rc::{Rc, Weak};

/// Receives the assembled code whenever the last digit cell is filled.
///
/// The control only keeps a [`Weak`] reference to the listener, so the host
/// decides how long it lives. A listener that has been dropped is skipped.
pub trait CompletionListener {
    /// Called with every cell's text concatenated in index order.
    fn on_entered(&self, code: &str);
}

impl<F> CompletionListener for F
where
    F: Fn(&str),
{
    fn on_entered(&self, code: &str) {
        self(code)
    }
}

/// Downgrade a host-owned listener into the weak handle stored by the control.
pub fn weak_listener<L>(listener: &Rc<L>) -> Weak<dyn CompletionListener>
where
    L: CompletionListener + 'static,
{
    let listener: Rc<dyn CompletionListener> = listener.clone();
    Rc::downgrade(&listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_act_as_listeners() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = seen.clone();
        let listener = Rc::new(move |code: &str| sink.borrow_mut().push(code.to_string()));
        let weak = weak_listener(&listener);

        weak.upgrade().expect("listener alive").on_entered("1234");
        assert_eq!(seen.borrow().as_slice(), ["1234".to_string()]);

        drop(listener);
        assert!(weak.upgrade().is_none());
    }
}
