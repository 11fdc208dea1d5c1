/// Input modes for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes go into the active text field
    Insert,
}
