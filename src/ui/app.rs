use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use super::help::HelpDialog;
use super::keybindings::{action_for_key, Action};
use super::terminal_guard::{install_panic_hook, TerminalGuard};
use super::view::GuideView;
use crate::config::Config;
use crate::content::PageContent;
use crate::selector::StepSelector;

/// Interactive terminal viewer.
///
/// The view subscribes to the step selector: every `select` marks the screen
/// dirty and the next loop iteration redraws it.
pub struct App {
    content: PageContent,
    selector: StepSelector,
    view: GuideView,
    help: HelpDialog,
    dirty: Rc<Cell<bool>>,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(content: PageContent, config: &Config) -> Self {
        let mut selector = StepSelector::new(&content.steps);

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        selector.subscribe(move |change| {
            tracing::info!(step = %change.current, "Step shown");
            flag.set(true);
        });

        Self {
            content,
            selector,
            view: GuideView::new(config.ui.nav_width),
            help: HelpDialog::new(),
            dirty,
            should_quit: false,
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        tracing::info!(steps = self.content.steps.len(), "Viewer started");

        while !self.should_quit {
            if self.dirty.replace(false) {
                terminal.draw(|f| self.draw(f))?;
            }

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Resize(..) => self.dirty.set(true),
                    _ => {}
                }
            }
        }

        tracing::info!("Viewer closed");
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.view.render(frame, &self.content, &self.selector);
        self.help.render(frame);
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        // Any key closes help
        if self.help.visible {
            self.help.toggle();
            self.dirty.set(true);
            return;
        }

        let Some(action) = action_for_key(code) else {
            return;
        };

        let len = self.content.steps.len();
        match action {
            Action::CursorDown => {
                self.view.cursor_down(len);
                self.dirty.set(true);
            }
            Action::CursorUp => {
                self.view.cursor_up(len);
                self.dirty.set(true);
            }
            Action::Activate => self.activate(self.view.cursor()),
            Action::SelectNth(index) => {
                if index < len {
                    self.view.set_cursor(index);
                    self.activate(index);
                }
            }
            Action::NextPanel => {
                self.view.info_panel = self.view.info_panel.next();
                self.dirty.set(true);
            }
            Action::PrevPanel => {
                self.view.info_panel = self.view.info_panel.prev();
                self.dirty.set(true);
            }
            Action::ToggleHelp => {
                self.help.toggle();
                self.dirty.set(true);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Fire the select trigger of the step at `index`
    fn activate(&mut self, index: usize) {
        if let Some(step) = self.content.steps.get_index(index) {
            self.selector.select(step.title.clone());
        }
    }

    pub fn selector(&self) -> &StepSelector {
        &self.selector
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn view(&self) -> &GuideView {
        &self.view
    }

    pub fn help_visible(&self) -> bool {
        self.help.visible
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether a redraw is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectionPhase;
    use crate::ui::view::InfoPanel;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(PageContent::builtin().unwrap(), &Config::default())
    }

    fn active_title(app: &App) -> String {
        app.selector()
            .active_step(&app.content().steps)
            .title
            .clone()
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_on_first_step() {
        let app = app();
        assert_eq!(active_title(&app), "Set Your Foundation");
        assert_eq!(app.selector().phase(), SelectionPhase::Default);
        assert!(app.is_dirty());
    }

    #[test]
    fn test_digit_selects_step() {
        let mut app = app();
        app.dirty.set(false);

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(active_title(&app), "Lift the Hips");
        assert_eq!(app.view().cursor(), 2);
        assert!(app.is_dirty());
    }

    #[test]
    fn test_digit_beyond_catalog_ignored() {
        let mut app = app();
        app.dirty.set(false);

        app.handle_key(KeyCode::Char('9'));
        assert_eq!(active_title(&app), "Set Your Foundation");
        assert_eq!(app.selector().phase(), SelectionPhase::Default);
        assert!(!app.is_dirty());
    }

    #[test]
    fn test_cursor_moves_without_selecting() {
        let mut app = app();

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.view().cursor(), 2);
        assert_eq!(active_title(&app), "Set Your Foundation");

        app.handle_key(KeyCode::Enter);
        assert_eq!(active_title(&app), "Lift the Hips");
    }

    #[test]
    fn test_redraw_flag_set_by_subscription() {
        let mut app = app();
        app.dirty.set(false);

        // Re-selecting the shown step still requests a redraw
        app.handle_key(KeyCode::Enter);
        assert!(app.is_dirty());
        assert_eq!(app.selector().phase(), SelectionPhase::UserSelected);
    }

    #[test]
    fn test_panels_and_help() {
        let mut app = app();

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.view().info_panel, InfoPanel::Safety);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.view().info_panel, InfoPanel::CoolDown);

        app.handle_key(KeyCode::Char('?'));
        assert!(app.help_visible());

        // Closing help swallows the key
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.help_visible());
        assert!(!app.should_quit());

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_draw_shows_active_step() {
        let mut app = app();
        app.handle_key(KeyCode::Char('4'));

        let screen = screen_text(&mut app);
        assert!(screen.contains("Engage and Hold"));
        assert!(screen.contains("Interlace your fingers"));
        assert!(screen.contains("Step 4/5"));
        assert!(screen.contains("Benefits"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?'));

        let screen = screen_text(&mut app);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("Show step by number"));
    }
}
