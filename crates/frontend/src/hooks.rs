//! Shared hooks

use midart_core::RequestSlot;
use std::rc::Rc;
use yew::prelude::*;

/// A [`RequestSlot`] owned by the calling component and retired on unmount.
///
/// Effects that refetch take a ticket with `begin()` and apply their result
/// only through `settle`, so a slow response for old dependencies is dropped.
#[hook]
pub fn use_request_slot() -> Rc<RequestSlot> {
    let slot = use_memo((), |()| RequestSlot::new());
    {
        let slot = slot.clone();
        use_effect_with((), move |()| move || slot.teardown());
    }
    slot
}
