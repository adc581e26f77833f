use ratatui::DefaultTerminal;

/// Enter the alternate screen in raw mode.
///
/// `ratatui::init()` also installs a panic hook that restores the terminal,
/// so a crash inside the panel does not leave the shell in raw mode.
pub fn init() -> DefaultTerminal {
    ratatui::init()
}

/// Leave the alternate screen and disable raw mode.
pub fn restore() {
    ratatui::restore();
}
