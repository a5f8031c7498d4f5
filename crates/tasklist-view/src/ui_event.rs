//! User input delivered by the host page, and the selectors it arrives on.

use tasklist_core::ItemId;

pub const ENTER_KEY: u32 = 13;
pub const ESC_KEY: u32 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(u32),
}

impl Key {
    /// Classify a legacy `which` key code.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            ENTER_KEY => Self::Enter,
            ESC_KEY => Self::Escape,
            other => Self::Other(other),
        }
    }
}

/// A DOM event type and the selector it is delegated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub event: &'static str,
    pub selector: &'static str,
}

const fn bind(event: &'static str, selector: &'static str) -> Binding {
    Binding { event, selector }
}

/// Page-level bindings.
pub const APP_BINDINGS: [Binding; 3] = [
    bind("keypress", ".new-todo"),
    bind("click", ".todo-clear button"),
    bind("click", ".toggle-all"),
];

/// Bindings inside each item row.
pub const ITEM_BINDINGS: [Binding; 7] = [
    bind("click", ".check"),
    bind("dblclick", "label.todo-content"),
    bind("click", "button.destroy"),
    bind("input", ".edit"),
    bind("keypress", ".edit"),
    bind("keydown", ".edit"),
    bind("blur", ".edit"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    NewTodoKeypress { key: Key, value: String },
    ClearCompleted,
    ToggleAll,
    Check(ItemId),
    BeginEdit(ItemId),
    Destroy(ItemId),
    EditInput { id: ItemId, value: String },
    EditKeypress { id: ItemId, key: Key },
    EditKeydown { id: ItemId, key: Key },
    EditBlur(ItemId),
    /// The location fragment changed.
    Navigate(String),
}

impl UiEvent {
    /// The binding this event is delivered through; `None` for navigation,
    /// which comes from the router rather than the DOM.
    #[must_use]
    pub const fn binding(&self) -> Option<Binding> {
        Some(match self {
            Self::NewTodoKeypress { .. } => APP_BINDINGS[0],
            Self::ClearCompleted => APP_BINDINGS[1],
            Self::ToggleAll => APP_BINDINGS[2],
            Self::Check(_) => ITEM_BINDINGS[0],
            Self::BeginEdit(_) => ITEM_BINDINGS[1],
            Self::Destroy(_) => ITEM_BINDINGS[2],
            Self::EditInput { .. } => ITEM_BINDINGS[3],
            Self::EditKeypress { .. } => ITEM_BINDINGS[4],
            Self::EditKeydown { .. } => ITEM_BINDINGS[5],
            Self::EditBlur(_) => ITEM_BINDINGS[6],
            Self::Navigate(_) => return None,
        })
    }
}
