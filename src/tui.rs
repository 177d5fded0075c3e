//! TUI (Terminal User Interface) for the Wordle assistant
//!
//! This module renders the session with Ratatui and reads feedback key by key.
//!
//! # State Machine
//! - `MarkingFeedback` → `ConfirmingFeedback` → `MarkingFeedback` again on the next suggestion
//! - Terminal state: `GameOver` (solved or no guesses left)

use crate::candidate::WORD_LENGTH;
use crate::constraints::{Feedback, Mark};
use crate::game_state::{GameInterface, UserAction};
use crate::suggest::Suggestions;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LetterState {
    Unmarked,
    Marked(Mark),
}

impl LetterState {
    const fn colors(self) -> (Color, Color) {
        match self {
            Self::Unmarked => (Color::DarkGray, Color::White),
            Self::Marked(Mark::Green) => (Color::Green, Color::Black),
            Self::Marked(Mark::Yellow) => (Color::Yellow, Color::Black),
            Self::Marked(Mark::Gray) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn from_guess(guess: &str) -> Self {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, ch) in letters.iter_mut().zip(guess.chars()) {
            *slot = ch.to_ascii_uppercase();
        }
        Self {
            letters,
            states: [LetterState::Unmarked; WORD_LENGTH],
        }
    }

    fn feedback(&self) -> Option<Feedback> {
        let mut marks = [Mark::Gray; WORD_LENGTH];
        for (slot, state) in marks.iter_mut().zip(self.states) {
            match state {
                LetterState::Marked(mark) => *slot = mark,
                LetterState::Unmarked => return None,
            }
        }
        Some(Feedback::new(marks))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    GameOver,
}

/// Marks typed against the board, kept apart from the terminal.
#[derive(Debug)]
struct FeedbackEditor {
    guesses: Vec<GuessRow>,
    state: TuiState,
    error_message: String,
}

impl FeedbackEditor {
    const fn new() -> Self {
        Self {
            guesses: Vec::new(),
            state: TuiState::MarkingFeedback { marking_index: 0 },
            error_message: String::new(),
        }
    }

    /// Adds a row for the next guess and starts marking its first letter.
    fn push_guess(&mut self, guess: &str) {
        self.guesses.push(GuessRow::from_guess(guess));
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
    }

    fn clear(&mut self) {
        self.guesses.clear();
        self.error_message.clear();
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char('n' | 'N') => return Some(UserAction::NewGame),
            _ => {}
        }

        match self.state {
            TuiState::MarkingFeedback { marking_index } => {
                self.handle_marking_input(key, marking_index);
                None
            }
            TuiState::ConfirmingFeedback => self.handle_confirming_input(key),
            TuiState::GameOver => None,
        }
    }

    fn handle_marking_input(&mut self, key: KeyEvent, marking_index: usize) {
        self.error_message.clear();
        let Some(row) = self.guesses.last_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) => {
                if let Some(mark) = Mark::from_char(c) {
                    row.states[marking_index] = LetterState::Marked(mark);
                    self.state = if marking_index + 1 < WORD_LENGTH {
                        TuiState::MarkingFeedback {
                            marking_index: marking_index + 1,
                        }
                    } else {
                        TuiState::ConfirmingFeedback
                    };
                } else {
                    self.error_message =
                        format!("Use G (green), Y (yellow) or X (gray). ('{c}' is not valid)");
                    debug_log!("handle_marking_input() - Rejected '{}'", c);
                }
            }
            KeyCode::Backspace if marking_index > 0 => {
                row.states[marking_index - 1] = LetterState::Unmarked;
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
            }
            _ => {
                debug_log!("handle_marking_input() - Ignoring key: {:?}", key.code);
            }
        }
    }

    fn handle_confirming_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Enter => {
                let feedback = self.guesses.last().and_then(GuessRow::feedback)?;
                info_log!("handle_confirming_input() - Feedback confirmed: {}", feedback);
                Some(UserAction::Feedback(feedback))
            }
            KeyCode::Backspace => {
                if let Some(row) = self.guesses.last_mut() {
                    row.states[WORD_LENGTH - 1] = LetterState::Unmarked;
                    self.state = TuiState::MarkingFeedback {
                        marking_index: WORD_LENGTH - 1,
                    };
                }
                None
            }
            _ => None,
        }
    }
}

/// Groups what a frame needs so rendering does not borrow the terminal.
struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    state: TuiState,
    suggestions: Option<&'a Suggestions>,
    turn: usize,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen interface. Restores the terminal when dropped.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    editor: FeedbackEditor,
    suggestions: Option<Suggestions>,
    turn: usize,
    message: String,
    status: String,
}

impl TuiInterface {
    /// Switches the terminal to raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            editor: FeedbackEditor::new(),
            suggestions: None,
            turn: 1,
            message: String::new(),
            status: "Loading".to_string(),
        })
    }

    /// Leaves raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be restored.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.editor.guesses,
            state: self.editor.state,
            suggestions: self.suggestions.as_ref(),
            turn: self.turn,
            message: &self.message,
            error_message: &self.editor.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board
                Constraint::Min(8),     // Suggestions
                Constraint::Length(3),  // Status
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.guesses, ctx.state);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE ASSISTANT")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, guesses: &[GuessRow], state: TuiState) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Keep the most recent rows visible
        let available_rows = (inner.height / ROW_SPACING) as usize;
        let skip_count = guesses.len().saturating_sub(available_rows);
        let last_index = guesses.len().saturating_sub(1);

        let rows = guesses.iter().enumerate().skip(skip_count);
        for (display_index, (index, guess)) in rows.enumerate() {
            let marking = match state {
                TuiState::MarkingFeedback { marking_index } if index == last_index => {
                    Some(marking_index)
                }
                _ => None,
            };
            Self::render_guess_row(f, guess, display_index, inner, marking);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        guess: &GuessRow,
        row_index: usize,
        area: Rect,
        marking: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (i, (letter, state)) in guess.letters.iter().zip(guess.states).enumerate() {
            let (bg_color, fg_color) = state.colors();
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if marking == Some(i) {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        if let Some(index) = marking {
            spans.push(Span::raw(format!(
                " <- Marking letter {} (G/Y/X)",
                index + 1
            )));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(suggestions) = ctx.suggestions {
            if let Some(best) = suggestions.best() {
                lines.push(Line::from(vec![Span::styled(
                    format!("Turn {}: guess '{}'", ctx.turn, best),
                    SUCCESS_STYLE,
                )]));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![Span::styled(
                format!("Possible candidates ({}):", suggestions.remaining),
                INFO_STYLE,
            )]));
            for word in suggestions.words.iter().skip(1) {
                lines.push(Line::from(format!("  {word}")));
            }
            if suggestions.remaining > suggestions.words.len() {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    suggestions.remaining - suggestions.words.len()
                )));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Suggestions").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::MarkingFeedback { .. } => {
                "G: Green | Y: Yellow | X or .: Gray | BACKSPACE: Go back | N: New game | ESC: Quit"
            }
            TuiState::ConfirmingFeedback => {
                "ENTER: Confirm feedback | BACKSPACE: Go back and edit | ESC: Quit"
            }
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits for one key press. `Ok(None)` when nothing relevant arrived.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            // Only Press, so Release and Repeat do not double the input
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn finish(&mut self, message: String, status: String) {
        self.editor.state = TuiState::GameOver;
        self.message = message;
        self.status = status;
        self.draw_or_log();

        loop {
            match Self::next_key() {
                Ok(Some(_)) => break,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("finish() - Input error: {}", e);
                    break;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_suggestions(&mut self, turn: usize, suggestions: &Suggestions) {
        self.turn = turn;
        self.suggestions = Some(suggestions.clone());
        if let Some(best) = suggestions.best() {
            self.editor.push_guess(best);
            self.status = format!("Play '{best}', then mark the feedback");
        }
        self.draw_or_log();
    }

    fn read_action(&mut self, guess: &str) -> io::Result<Option<UserAction>> {
        info_log!("read_action() - Waiting for feedback on '{}'", guess);
        loop {
            if self.editor.state == TuiState::ConfirmingFeedback {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            self.draw()?;

            if let Some(key) = Self::next_key()? {
                if let Some(action) = self.editor.handle_key(key) {
                    return Ok(Some(action));
                }
            }
        }
    }

    fn display_win(&mut self, word: &str, turns: usize) {
        self.finish(
            format!("✓ Solved: {} in {turns} turns", word.to_ascii_uppercase()),
            "Game over".to_string(),
        );
    }

    fn display_exhausted(&mut self) {
        self.finish(
            "No valid guesses remain. Check the feedback you entered.".to_string(),
            "Error: no candidates left".to_string(),
        );
    }

    fn display_new_game(&mut self, word_count: usize) {
        self.editor.clear();
        self.suggestions = None;
        self.message = format!("New game started. {word_count} candidate words.");
        self.draw_or_log();
    }

    fn display_exit(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_row_uppercases_letters() {
        let row = GuessRow::from_guess("crane");
        assert_eq!(row.letters, ['C', 'R', 'A', 'N', 'E']);
        assert!(row.states.iter().all(|s| *s == LetterState::Unmarked));
    }

    #[test]
    fn test_guess_row_feedback_requires_all_marks() {
        let mut row = GuessRow::from_guess("crane");
        assert_eq!(row.feedback(), None);

        row.states = [LetterState::Marked(Mark::Green); WORD_LENGTH];
        row.states[2] = LetterState::Marked(Mark::Yellow);
        assert_eq!(row.feedback(), Some("ggygg".parse().unwrap()));

        row.states[4] = LetterState::Unmarked;
        assert_eq!(row.feedback(), None);
    }

    #[test]
    fn test_letter_colors() {
        assert_eq!(LetterState::Marked(Mark::Green).colors().0, Color::Green);
        assert_eq!(LetterState::Marked(Mark::Yellow).colors().0, Color::Yellow);
        assert_eq!(LetterState::Marked(Mark::Gray).colors().0, Color::Gray);
        assert_eq!(LetterState::Unmarked.colors().0, Color::DarkGray);
    }

    fn press(editor: &mut FeedbackEditor, code: KeyCode) -> Option<UserAction> {
        editor.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_marks(editor: &mut FeedbackEditor, marks: &str) {
        for c in marks.chars() {
            assert_eq!(press(editor, KeyCode::Char(c)), None);
        }
    }

    fn editor_for(guess: &str) -> FeedbackEditor {
        let mut editor = FeedbackEditor::new();
        editor.push_guess(guess);
        editor
    }

    #[test]
    fn test_five_marks_then_enter_confirms() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "gy.x");
        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 4 });

        type_marks(&mut editor, "G");
        assert_eq!(editor.state, TuiState::ConfirmingFeedback);

        assert_eq!(
            press(&mut editor, KeyCode::Enter),
            Some(UserAction::Feedback("gy..g".parse().unwrap()))
        );
    }

    #[test]
    fn test_enter_while_marking_does_nothing() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "gg");
        assert_eq!(press(&mut editor, KeyCode::Enter), None);
        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 2 });
    }

    #[test]
    fn test_backspace_while_confirming_reopens_last_letter() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "ggggy");
        assert_eq!(press(&mut editor, KeyCode::Backspace), None);

        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 4 });
        let row = editor.guesses.last().unwrap();
        assert_eq!(row.states[4], LetterState::Unmarked);
        assert_eq!(row.states[3], LetterState::Marked(Mark::Green));
        assert_eq!(row.feedback(), None);
    }

    #[test]
    fn test_backspace_while_marking_steps_back() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "gy");
        press(&mut editor, KeyCode::Backspace);

        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 1 });
        let row = editor.guesses.last().unwrap();
        assert_eq!(row.states[0], LetterState::Marked(Mark::Green));
        assert_eq!(row.states[1], LetterState::Unmarked);
    }

    #[test]
    fn test_backspace_at_first_letter_is_ignored() {
        let mut editor = editor_for("crane");
        assert_eq!(press(&mut editor, KeyCode::Backspace), None);
        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 0 });
        assert!(editor.guesses[0].states.iter().all(|s| *s == LetterState::Unmarked));
    }

    #[test]
    fn test_invalid_mark_reports_error_without_advancing() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "g");
        assert_eq!(press(&mut editor, KeyCode::Char('q')), None);

        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 1 });
        assert!(editor.error_message.contains("'q' is not valid"));
        assert_eq!(editor.guesses[0].states[1], LetterState::Unmarked);

        // the next accepted mark clears the error
        type_marks(&mut editor, "y");
        assert!(editor.error_message.is_empty());
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let mut editor = editor_for("crane");
        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        let alt_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT);

        assert_eq!(editor.handle_key(ctrl_g), None);
        assert_eq!(editor.handle_key(alt_n), None);
        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 0 });
        assert_eq!(editor.guesses[0].states[0], LetterState::Unmarked);
    }

    #[test]
    fn test_new_game_and_exit_keys() {
        let mut editor = editor_for("crane");
        assert_eq!(press(&mut editor, KeyCode::Char('n')), Some(UserAction::NewGame));
        assert_eq!(press(&mut editor, KeyCode::Char('N')), Some(UserAction::NewGame));
        assert_eq!(press(&mut editor, KeyCode::Esc), Some(UserAction::Exit));

        type_marks(&mut editor, "ggggg");
        assert_eq!(press(&mut editor, KeyCode::Esc), Some(UserAction::Exit));
    }

    #[test]
    fn test_game_over_ignores_marks() {
        let mut editor = editor_for("crane");
        editor.state = TuiState::GameOver;
        assert_eq!(press(&mut editor, KeyCode::Char('g')), None);
        assert_eq!(editor.guesses[0].states[0], LetterState::Unmarked);
    }

    #[test]
    fn test_next_guess_and_clear() {
        let mut editor = editor_for("crane");
        type_marks(&mut editor, "ggggy");
        editor.push_guess("slate");
        assert_eq!(editor.guesses.len(), 2);
        assert_eq!(editor.state, TuiState::MarkingFeedback { marking_index: 0 });

        press(&mut editor, KeyCode::Char('z'));
        editor.clear();
        assert!(editor.guesses.is_empty());
        assert!(editor.error_message.is_empty());
    }
}
