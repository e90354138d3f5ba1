use crate::app::{App, FocusPane, TICKET_COLUMNS};
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {
            app.show_help = false;
        }
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveLeft => app.move_cursor(-1),
        InputAction::MoveRight => app.move_cursor(1),
        InputAction::MoveUp => app.move_cursor(-(TICKET_COLUMNS as isize)),
        InputAction::MoveDown => app.move_cursor(TICKET_COLUMNS as isize),
        InputAction::Activate => app.activate_primary(),
        InputAction::EditOptions => app.focus = FocusPane::Options,
        InputAction::Generate => app.generate(),
        InputAction::Draw => app.draw(),
        InputAction::Reset => app.reset(),
        InputAction::CycleLanguage => app.cycle_language(),
    }
}
