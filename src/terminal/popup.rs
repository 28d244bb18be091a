use std::cell::RefCell;
use std::rc::Rc;

use crate::library::PopupHandle;
use crate::poi::LatLng;

use super::map::{PopupView, TerminalMap};

#[derive(Default)]
struct PopupState {
    content: Option<String>,
    /// Map and anchor while open
    shown: Option<(TerminalMap, LatLng)>,
}

/// The single information popup. Its view lives on the map it is open on,
/// so opening it elsewhere first removes it from the previous map.
#[derive(Clone, Default)]
pub struct TerminalPopup(Rc<RefCell<PopupState>>);

impl PopupHandle<TerminalMap> for TerminalPopup {
    fn close(&self) {
        if let Some((map, _)) = self.0.borrow_mut().shown.take() {
            map.set_popup(None);
        }
    }

    fn set_content(&self, content: &str) {
        let mut state = self.0.borrow_mut();
        state.content = Some(content.to_string());
        if let Some((map, anchor)) = &state.shown {
            map.set_popup(Some(PopupView {
                content: content.to_string(),
                anchor: *anchor,
            }));
        }
    }

    fn open(&self, map: &TerminalMap, anchor: LatLng) {
        self.close();
        let mut state = self.0.borrow_mut();
        map.set_popup(Some(PopupView {
            content: state.content.clone().unwrap_or_default(),
            anchor,
        }));
        state.shown = Some((map.clone(), anchor));
    }

    fn is_open(&self) -> bool {
        self.0.borrow().shown.is_some()
    }

    fn content(&self) -> Option<String> {
        self.0.borrow().content.clone()
    }
}
