//! Keyboard bindings of the interactive view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Points moved or resized per key press.
pub const STEP: i32 = 1;
/// Step while Shift is held.
pub const FAST_STEP: i32 = 10;

/// Actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    SelectNext,
    SelectPrev,

    // Editing the selected region
    Move { dx: i32, dy: i32 },
    Resize { dw: i32, dh: i32 },
    OrderEarlier,
    OrderLater,
    AddRegion,
    DeleteRegion,

    // Page and document
    Redetect,
    MarkPageEmpty,
    MarkAllEmpty,
    SaveRegions,
    LoadRegions,
    OpenPdf,
    Export,
    PreviewText,
    ToggleConcat,

    // Application
    Help,
    Quit,
}

/// Map a key press to an action.
pub fn map_key(event: KeyEvent) -> Option<Action> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let step = if modifiers.contains(KeyModifiers::SHIFT) {
        FAST_STEP
    } else {
        STEP
    };

    if ctrl {
        return match event.code {
            KeyCode::Left => Some(Action::Resize { dw: -step, dh: 0 }),
            KeyCode::Right => Some(Action::Resize { dw: step, dh: 0 }),
            KeyCode::Up => Some(Action::Resize { dw: 0, dh: -step }),
            KeyCode::Down => Some(Action::Resize { dw: 0, dh: step }),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::PageDown | KeyCode::Char('n') => Some(Action::NextPage),
        KeyCode::PageUp | KeyCode::Char('p') => Some(Action::PrevPage),
        KeyCode::Home => Some(Action::FirstPage),
        KeyCode::End => Some(Action::LastPage),
        KeyCode::Tab => Some(Action::SelectNext),
        KeyCode::BackTab => Some(Action::SelectPrev),

        KeyCode::Left => Some(Action::Move { dx: -step, dy: 0 }),
        KeyCode::Right => Some(Action::Move { dx: step, dy: 0 }),
        KeyCode::Up => Some(Action::Move { dx: 0, dy: -step }),
        KeyCode::Down => Some(Action::Move { dx: 0, dy: step }),
        KeyCode::Char('H') => Some(Action::Resize { dw: -STEP, dh: 0 }),
        KeyCode::Char('L') => Some(Action::Resize { dw: STEP, dh: 0 }),
        KeyCode::Char('K') => Some(Action::Resize { dw: 0, dh: -STEP }),
        KeyCode::Char('J') => Some(Action::Resize { dw: 0, dh: STEP }),
        KeyCode::Char('[') => Some(Action::OrderEarlier),
        KeyCode::Char(']') => Some(Action::OrderLater),
        KeyCode::Char('a') => Some(Action::AddRegion),
        KeyCode::Delete | KeyCode::Char('x') => Some(Action::DeleteRegion),

        KeyCode::Char('d') => Some(Action::Redetect),
        KeyCode::Char('c') => Some(Action::MarkPageEmpty),
        KeyCode::Char('C') => Some(Action::MarkAllEmpty),
        KeyCode::Char('s') => Some(Action::SaveRegions),
        KeyCode::Char('o') => Some(Action::LoadRegions),
        KeyCode::Char('O') => Some(Action::OpenPdf),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('t') => Some(Action::PreviewText),
        KeyCode::Char('P') => Some(Action::ToggleConcat),

        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key and description pairs for the help popup. An empty description
/// starts a section.
pub const HELP: &[(&str, &str)] = &[
    ("Pages:", ""),
    ("PgDn / n", "Next page"),
    ("PgUp / p", "Previous page"),
    ("Home / End", "First / last page"),
    ("", ""),
    ("Regions:", ""),
    ("Tab / Shift+Tab", "Select next / previous region"),
    ("click", "Select region under cursor"),
    ("drag", "Draw a new region, or move the selected one"),
    ("right-drag", "Resize the selected region"),
    ("arrows", "Move region (Shift: x10)"),
    ("Ctrl+arrows / HJKL", "Resize region"),
    ("[ / ]", "Move region earlier / later in order"),
    ("a", "Add a region"),
    ("Del / x", "Delete region"),
    ("", ""),
    ("Document:", ""),
    ("d", "Detect regions of this page again"),
    ("c / C", "Mark page / all pages empty"),
    ("s / o", "Save / load regions file"),
    ("O", "Open another PDF"),
    ("e", "Export document text"),
    ("t", "Preview text of the selected region"),
    ("P", "Toggle paragraph concatenation"),
    ("", ""),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];
