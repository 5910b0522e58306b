//! Terminal rendering of the pose guide

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::content::PageContent;
use crate::selector::{SelectionPhase, StepSelector};

/// Content shown in the lower info panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoPanel {
    Benefits,
    Safety,
    Breathing,
    CoolDown,
}

impl InfoPanel {
    pub fn all() -> &'static [InfoPanel] {
        &[
            InfoPanel::Benefits,
            InfoPanel::Safety,
            InfoPanel::Breathing,
            InfoPanel::CoolDown,
        ]
    }

    pub fn next(self) -> Self {
        match self {
            InfoPanel::Benefits => InfoPanel::Safety,
            InfoPanel::Safety => InfoPanel::Breathing,
            InfoPanel::Breathing => InfoPanel::CoolDown,
            InfoPanel::CoolDown => InfoPanel::Benefits,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            InfoPanel::Benefits => InfoPanel::CoolDown,
            InfoPanel::Safety => InfoPanel::Benefits,
            InfoPanel::Breathing => InfoPanel::Safety,
            InfoPanel::CoolDown => InfoPanel::Breathing,
        }
    }

    fn index(self) -> usize {
        match self {
            InfoPanel::Benefits => 0,
            InfoPanel::Safety => 1,
            InfoPanel::Breathing => 2,
            InfoPanel::CoolDown => 3,
        }
    }

    /// Section heading from the page content
    pub fn heading(self, content: &PageContent) -> &str {
        match self {
            InfoPanel::Benefits => &content.benefits.heading,
            InfoPanel::Safety => &content.safety.heading,
            InfoPanel::Breathing => &content.breathing.heading,
            InfoPanel::CoolDown => &content.cool_down.heading,
        }
    }

    fn body(self, content: &PageContent) -> Text<'_> {
        match self {
            InfoPanel::Benefits => bullet_list(&content.benefits.items),
            InfoPanel::Safety => bullet_list(&content.safety.items),
            InfoPanel::Breathing => content
                .breathing
                .phases
                .iter()
                .map(|phase| {
                    Line::from(vec![
                        Span::styled(
                            format!("{}: ", phase.title),
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(phase.text.as_str()),
                    ])
                })
                .collect::<Vec<_>>()
                .into(),
            InfoPanel::CoolDown => Text::from(content.cool_down.text.as_str()),
        }
    }
}

fn bullet_list(items: &[String]) -> Text<'static> {
    items
        .iter()
        .map(|item| Line::from(format!("• {item}")))
        .collect::<Vec<_>>()
        .into()
}

/// Main viewer screen: header, step navigation, step detail, info panel
/// and status bar.
pub struct GuideView {
    /// Cursor in the navigation list (not the selection)
    pub nav_state: ListState,
    pub info_panel: InfoPanel,
    nav_width: u16,
}

impl GuideView {
    pub fn new(nav_width: u16) -> Self {
        let mut nav_state = ListState::default();
        nav_state.select(Some(0));
        Self {
            nav_state,
            info_panel: InfoPanel::Benefits,
            nav_width,
        }
    }

    pub fn cursor(&self) -> usize {
        self.nav_state.selected().unwrap_or(0)
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.nav_state.select(Some(index));
    }

    /// Move the cursor down, wrapping at the end
    pub fn cursor_down(&mut self, len: usize) {
        if len > 0 {
            let i = self.cursor();
            self.set_cursor(if i >= len - 1 { 0 } else { i + 1 });
        }
    }

    /// Move the cursor up, wrapping at the start
    pub fn cursor_up(&mut self, len: usize) {
        if len > 0 {
            let i = self.cursor();
            self.set_cursor(if i == 0 { len - 1 } else { i - 1 });
        }
    }

    pub fn render(&mut self, frame: &mut Frame, content: &PageContent, selector: &StepSelector) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header
                Constraint::Min(8),    // Steps
                Constraint::Length(9), // Info panel
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        render_header(frame, chunks[0], content);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.nav_width), Constraint::Min(20)])
            .split(chunks[1]);

        self.render_nav(frame, body[0], content, selector);
        render_detail(frame, body[1], content, selector);
        self.render_info(frame, chunks[2], content);
        render_status(frame, chunks[3], content, selector);
    }

    fn render_nav(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        content: &PageContent,
        selector: &StepSelector,
    ) {
        let catalog = &content.steps;
        let items: Vec<ListItem> = catalog
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let active = selector.is_active(step, catalog);
                let (marker, style) = if active {
                    (
                        "● ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("{}. {}", i + 1, step.title), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Steps ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut self.nav_state);
    }

    fn render_info(&self, frame: &mut Frame, area: Rect, content: &PageContent) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let titles: Vec<&str> = InfoPanel::all()
            .iter()
            .map(|panel| panel.heading(content))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.info_panel.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, rows[0]);

        let body = Paragraph::new(self.info_panel.body(content)).wrap(Wrap { trim: true });
        frame.render_widget(body, rows[1]);
    }
}

fn render_header(frame: &mut Frame, area: Rect, content: &PageContent) {
    let hero = &content.hero;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", hero.badge.to_uppercase()),
                Style::default().fg(Color::Black).bg(Color::White),
            ),
            Span::raw("  "),
            Span::styled(
                hero.heading.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            content.pose_card.name.as_str(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            hero.intro.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_detail(frame: &mut Frame, area: Rect, content: &PageContent, selector: &StepSelector) {
    let step = selector.active_step(&content.steps);
    let text = vec![
        Line::from(Span::styled(
            step.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(step.detail.as_str()),
    ];

    let detail = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", content.timeline.heading))
            .borders(Borders::ALL),
    );
    frame.render_widget(detail, area);
}

fn render_status(frame: &mut Frame, area: Rect, content: &PageContent, selector: &StepSelector) {
    let catalog = &content.steps;
    let phase = match selector.phase() {
        SelectionPhase::Default => "default",
        SelectionPhase::UserSelected => "selected",
    };

    let status = Line::from(vec![
        Span::styled(
            format!(
                " Step {}/{} ",
                selector.active_index(catalog) + 1,
                catalog.len()
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("({phase})"), Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::styled(" help  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_panel_cycles() {
        let mut panel = InfoPanel::Benefits;
        for _ in 0..InfoPanel::all().len() {
            panel = panel.next();
        }
        assert_eq!(panel, InfoPanel::Benefits);
        assert_eq!(InfoPanel::Benefits.prev(), InfoPanel::CoolDown);
        assert_eq!(InfoPanel::Breathing.prev().next(), InfoPanel::Breathing);
    }

    #[test]
    fn test_info_panel_headings_from_content() {
        let content = PageContent::builtin().unwrap();
        assert_eq!(InfoPanel::Safety.heading(&content), "Safety & Alignment");
        assert_eq!(InfoPanel::Breathing.heading(&content), "Breath Pattern");
    }

    #[test]
    fn test_cursor_wraps() {
        let mut view = GuideView::new(30);
        assert_eq!(view.cursor(), 0);

        view.cursor_up(5);
        assert_eq!(view.cursor(), 4);
        view.cursor_down(5);
        assert_eq!(view.cursor(), 0);
        view.cursor_down(5);
        assert_eq!(view.cursor(), 1);
    }
}
