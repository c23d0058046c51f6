//! Global 401 handler
//!
//! The HTTP client has no access to the component tree, so a 401 is reported
//! through a thread-local callback that the session provider installs.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static UNAUTHORIZED_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

pub fn set_unauthorized_callback(callback: Rc<dyn Fn()>) {
    UNAUTHORIZED_CALLBACK.with(|slot| {
        *slot.borrow_mut() = Some(callback);
    });
}

pub fn clear_unauthorized_callback() {
    UNAUTHORIZED_CALLBACK.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// Run the installed callback, if any
pub fn trigger_unauthorized() {
    // Clone out first so the callback may replace itself
    let callback = UNAUTHORIZED_CALLBACK.with(|slot| slot.borrow().clone());
    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn trigger_runs_installed_callback_until_cleared() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        set_unauthorized_callback(Rc::new(move || counter.set(counter.get() + 1)));

        trigger_unauthorized();
        trigger_unauthorized();
        assert_eq!(hits.get(), 2);

        clear_unauthorized_callback();
        trigger_unauthorized();
        assert_eq!(hits.get(), 2);
    }
}
