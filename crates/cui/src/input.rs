use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    NextFocus,
    PrevFocus,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Activate,
    EditOptions,
    Generate,
    Draw,
    Reset,
    CycleLanguage,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::None,
        KeyCode::Tab => InputAction::NextFocus,
        KeyCode::BackTab => InputAction::PrevFocus,
        KeyCode::Left => InputAction::MoveLeft,
        KeyCode::Right => InputAction::MoveRight,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::Activate,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Generate
        }
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('h') => InputAction::MoveLeft,
        KeyCode::Char('l') => InputAction::CycleLanguage,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('e') => InputAction::EditOptions,
        KeyCode::Char('g') => InputAction::Generate,
        KeyCode::Char('d') => InputAction::Draw,
        KeyCode::Char('r') => InputAction::Reset,
        _ => InputAction::None,
    }
}
