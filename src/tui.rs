//! Interactive tabbed shell over the catalog and advice sections.
//!
//! One logical thread owns all state: gateway calls run on worker threads
//! and deliver their result over a channel, tagged with the slot and the
//! sequence token issued at request time. The event loop applies them
//! through the shell reducer, which drops stale responses. A call in flight
//! cannot be cancelled; its reply is simply ignored if outdated.

use crate::catalog::{self, DebloatItem, WindowsVersion};
use crate::gateway::AdviceGateway;
use crate::segment::{segment, Segment};
use crate::shell::{Section, ShellEvent, ShellState, SlotKey};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const FOOTER_LEGEND: &str =
    "[tab section] [1-7 jump] [o os] [a advice] [enter submit/analyze] [esc dismiss] [q quit]";

/// A resolved gateway call on its way back to the event loop.
struct GatewayReply {
    key: SlotKey,
    seq: u64,
    text: String,
}

struct App {
    state: ShellState,
    gateway: Option<Arc<AdviceGateway>>,
    replies: mpsc::Sender<GatewayReply>,
    optimizer_input: String,
    storage_input: String,
    problem_input: String,
    debloat_selected: usize,
    quit: bool,
}

impl App {
    fn new(
        gateway: Option<Arc<AdviceGateway>>,
        version: WindowsVersion,
        advice_enabled: bool,
        replies: mpsc::Sender<GatewayReply>,
    ) -> Self {
        Self {
            state: ShellState::new(version, advice_enabled),
            gateway,
            replies,
            optimizer_input: String::new(),
            storage_input: String::new(),
            problem_input: String::new(),
            debloat_selected: 0,
            quit: false,
        }
    }

    fn debloat_items(&self) -> Vec<&'static DebloatItem> {
        catalog::debloat_for(self.state.version()).collect()
    }

    fn selected_debloat(&self) -> Option<&'static DebloatItem> {
        self.debloat_items().get(self.debloat_selected).copied()
    }

    /// Issue one gateway call on a worker thread, tagged with its token.
    fn spawn_request<F>(&mut self, key: SlotKey, call: F)
    where
        F: FnOnce(&AdviceGateway) -> String + Send + 'static,
    {
        let Some(gateway) = self.gateway.clone() else {
            return;
        };
        let seq = self.state.issue_request(key);
        let tx = self.replies.clone();
        thread::spawn(move || {
            let text = call(&gateway);
            // The receiver may be gone if the user quit; nothing to do then.
            let _ = tx.send(GatewayReply { key, seq, text });
        });
    }

    fn submit(&mut self) {
        let version = self.state.version();
        match self.state.effective_section() {
            Section::Debloat => {
                if !self.state.advice_enabled() {
                    return;
                }
                if let Some(item) = self.selected_debloat() {
                    let key = SlotKey::Item(item.id);
                    if self.state.is_loading(key) {
                        return;
                    }
                    let (title, description) = (item.title, item.description);
                    self.spawn_request(key, move |gateway| {
                        gateway.explain_bloatware(title, description, version)
                    });
                }
            }
            Section::Storage => {
                if !self.state.advice_enabled() {
                    return;
                }
                // Storage context is optional; an empty audit is still valid.
                let details = self.storage_input.clone();
                self.spawn_request(SlotKey::StorageAudit, move |gateway| {
                    let details = (!details.trim().is_empty()).then_some(details.as_str());
                    gateway.storage_audit(version, details)
                });
            }
            Section::Troubleshoot => {
                let problem = self.problem_input.clone();
                if problem.trim().is_empty() {
                    return;
                }
                self.spawn_request(SlotKey::Troubleshoot, move |gateway| {
                    gateway.troubleshoot(&problem, version)
                });
            }
            Section::AiOptimizer => {
                let query = self.optimizer_input.clone();
                if query.trim().is_empty() {
                    return;
                }
                self.spawn_request(SlotKey::Optimizer, move |gateway| {
                    gateway.optimization_advice(&query, version)
                });
            }
            Section::Fixes | Section::Tldr | Section::Apps => {}
        }
    }

    fn dismiss(&mut self) {
        let key = match self.state.effective_section() {
            Section::Debloat => self.selected_debloat().map(|item| SlotKey::Item(item.id)),
            Section::Storage => Some(SlotKey::StorageAudit),
            Section::Troubleshoot => Some(SlotKey::Troubleshoot),
            Section::AiOptimizer => Some(SlotKey::Optimizer),
            _ => None,
        };
        if let Some(key) = key {
            self.state.reduce(ShellEvent::DismissResult(key));
        }
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match self.state.effective_section() {
            Section::Storage => Some(&mut self.storage_input),
            Section::Troubleshoot => Some(&mut self.problem_input),
            Section::AiOptimizer => Some(&mut self.optimizer_input),
            _ => None,
        }
    }

    fn cycle_section(&mut self, forward: bool) {
        let visible = self.state.visible_sections();
        let current = self.state.effective_section();
        let idx = visible
            .iter()
            .position(|section| *section == current)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % visible.len()
        } else {
            (idx + visible.len() - 1) % visible.len()
        };
        self.state.reduce(ShellEvent::SelectSection(visible[next]));
    }

    fn jump_section(&mut self, digit: usize) {
        let visible = self.state.visible_sections();
        if let Some(section) = digit.checked_sub(1).and_then(|idx| visible.get(idx)) {
            self.state.reduce(ShellEvent::SelectSection(*section));
        }
    }

    fn move_selection(&mut self, down: bool) {
        if self.state.effective_section() != Section::Debloat {
            return;
        }
        let len = self.debloat_items().len();
        if len == 0 {
            return;
        }
        if down {
            self.debloat_selected = (self.debloat_selected + 1).min(len - 1);
        } else {
            self.debloat_selected = self.debloat_selected.saturating_sub(1);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit = true,
                KeyCode::Char('u') => {
                    if let Some(input) = self.input_mut() {
                        input.clear();
                    }
                }
                _ => {}
            }
            return;
        }

        let editing = self.input_mut().is_some();
        match key.code {
            KeyCode::Tab => self.cycle_section(true),
            KeyCode::BackTab => self.cycle_section(false),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.dismiss(),
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Backspace => {
                if let Some(input) = self.input_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(ch) if editing => {
                if let Some(input) = self.input_mut() {
                    input.push(ch);
                }
            }
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('o') => {
                let toggled = self.state.version().toggled();
                self.state.reduce(ShellEvent::SetVersion(toggled));
                let len = self.debloat_items().len();
                self.debloat_selected = self.debloat_selected.min(len.saturating_sub(1));
            }
            KeyCode::Char('a') => {
                if self.gateway.is_some() {
                    self.state.reduce(ShellEvent::ToggleAdvice);
                }
            }
            KeyCode::Char(ch @ '1'..='7') => {
                self.jump_section(ch as usize - '0' as usize);
            }
            _ => {}
        }
    }
}

/// Run the interactive shell until the user quits.
pub fn run(
    gateway: Option<Arc<AdviceGateway>>,
    version: WindowsVersion,
    advice_enabled: bool,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let (tx, rx) = mpsc::channel();
    let app = App::new(gateway, version, advice_enabled, tx);
    let result = run_loop(&mut terminal, app, &rx);

    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    replies: &mpsc::Receiver<GatewayReply>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(POLL_INTERVAL).context("poll input")? {
            if let Event::Key(key) = event::read().context("read input")? {
                app.handle_key(key);
            }
        }

        // Apply any resolved gateway calls; stale ones are dropped by the
        // reducer's sequence check.
        while let Ok(reply) = replies.try_recv() {
            app.state.reduce(ShellEvent::ResponseArrived {
                key: reply.key,
                seq: reply.seq,
                text: reply.text,
            });
        }

        if app.quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    match app.state.effective_section() {
        Section::Debloat => draw_debloat(frame, app, chunks[1]),
        Section::Storage => draw_storage(frame, app, chunks[1]),
        Section::Fixes => draw_fixes(frame, chunks[1]),
        Section::Tldr => draw_tldr(frame, app, chunks[1]),
        Section::Troubleshoot => draw_troubleshoot(frame, app, chunks[1]),
        Section::Apps => draw_apps(frame, chunks[1]),
        Section::AiOptimizer => draw_optimizer(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.state.visible_sections();
    let selected = visible
        .iter()
        .position(|section| *section == app.state.effective_section())
        .unwrap_or(0);
    let titles: Vec<Line> = visible
        .iter()
        .map(|section| Line::from(section.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("WinBuster"));
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let advice = if app.state.advice_enabled() {
        "AI insight enabled"
    } else {
        "AI insight off"
    };
    let footer = Line::from(vec![
        Span::styled(
            format!(" {} profile ", app.state.version()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("| "),
        Span::raw(advice),
        Span::raw(" | "),
        Span::styled(FOOTER_LEGEND, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}

fn draw_debloat(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = app
        .debloat_items()
        .iter()
        .map(|item| {
            let impact = Span::styled(
                format!("[{}] ", item.impact),
                match item.impact {
                    catalog::Impact::High => Style::default().fg(Color::Red),
                    catalog::Impact::Medium => Style::default().fg(Color::Yellow),
                    catalog::Impact::Low => Style::default().fg(Color::Green),
                },
            );
            ListItem::new(Line::from(vec![impact, Span::raw(item.title)]))
        })
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(app.debloat_selected));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Debloat ({})", app.state.version())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, columns[0], &mut list_state);

    let detail = debloat_detail(app);
    let paragraph = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(paragraph, columns[1]);
}

fn debloat_detail(app: &App) -> Text<'static> {
    let Some(item) = app.selected_debloat() else {
        return Text::raw("No items for this Windows release.");
    };
    let mut lines = vec![
        Line::styled(
            item.title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!(
            "{} impact | {} | applies to {:?}",
            item.impact, item.category, item.applies_to
        )),
        Line::raw(""),
        Line::raw(item.description.to_string()),
    ];
    if let Some(command) = item.command {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Instructions (PowerShell, administrator mode):",
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::styled(
            command.to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    let key = SlotKey::Item(item.id);
    if app.state.is_loading(key) {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Analyzing...",
            Style::default().fg(Color::Blue),
        ));
    } else if let Some(text) = app.state.slot(key).and_then(|slot| slot.text.clone()) {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "AI Deep Analysis",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ));
        lines.extend(advice_lines(&text));
    } else if app.state.advice_enabled() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press Enter for an AI trade-off analysis.",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Text::from(lines)
}

fn draw_storage(frame: &mut Frame, app: &App, area: Rect) {
    draw_query_section(
        frame,
        area,
        QuerySection {
            title: "Storage Reclaimer",
            hint: "Describe your disk situation (optional), then press Enter to audit.",
            input: &app.storage_input,
            slot: SlotKey::StorageAudit,
            result_title: "Storage audit",
            empty_text: "Ready for your storage audit.",
        },
        app,
    );
}

fn draw_troubleshoot(frame: &mut Frame, app: &App, area: Rect) {
    draw_query_section(
        frame,
        area,
        QuerySection {
            title: "Problem Solver",
            hint: "Describe exactly what is bothering you, then press Enter.",
            input: &app.problem_input,
            slot: SlotKey::Troubleshoot,
            result_title: "Proposed action plan",
            empty_text: "Describe a problem to get a diagnosis.",
        },
        app,
    );
}

fn draw_optimizer(frame: &mut Frame, app: &App, area: Rect) {
    draw_query_section(
        frame,
        area,
        QuerySection {
            title: "AI Optimization Strategy",
            hint: "Describe your system specs or issues, then press Enter.",
            input: &app.optimizer_input,
            slot: SlotKey::Optimizer,
            result_title: "Personalized optimization guide",
            empty_text: "No plan yet.",
        },
        app,
    );
}

struct QuerySection<'a> {
    title: &'static str,
    hint: &'static str,
    input: &'a str,
    slot: SlotKey,
    result_title: &'static str,
    empty_text: &'static str,
}

fn draw_query_section(frame: &mut Frame, area: Rect, section: QuerySection, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let input = Paragraph::new(format!("{}_", section.input))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} - {}", section.title, section.hint)),
        );
    frame.render_widget(input, rows[0]);

    let body = if app.state.is_loading(section.slot) {
        Text::styled("Working on it...", Style::default().fg(Color::Blue))
    } else if let Some(text) = app
        .state
        .slot(section.slot)
        .and_then(|slot| slot.text.clone())
    {
        Text::from(advice_lines(&text))
    } else {
        Text::styled(section.empty_text, Style::default().fg(Color::DarkGray))
    };
    let result = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(section.result_title),
        );
    frame.render_widget(result, rows[1]);
}

fn draw_fixes(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for fix in catalog::quick_fixes() {
        lines.push(Line::styled(
            fix.title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(fix.description.to_string()));
        lines.push(Line::raw(format!("The Fix: {}", fix.solution)));
        if let Some(code) = fix.code {
            lines.push(Line::styled(
                code.to_string(),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::raw(""));
    }
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Critical System Fixes"),
        );
    frame.render_widget(paragraph, area);
}

fn draw_apps(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for app in catalog::essential_apps() {
        lines.push(Line::from(vec![
            Span::styled(
                app.name,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", app.category),
                Style::default().fg(Color::Blue),
            ),
        ]));
        lines.push(Line::raw(app.description));
        lines.push(Line::styled(
            app.winget,
            Style::default().fg(Color::Green),
        ));
        lines.push(Line::styled(
            app.url,
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::raw(""));
    }
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Open-Source Essentials"),
        );
    frame.render_widget(paragraph, area);
}

fn draw_tldr(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::raw("Biggest wins for reclaiming space and performance:"),
        Line::raw(""),
    ];
    for item in app.debloat_items() {
        if item.impact == catalog::Impact::High {
            lines.push(Line::from(vec![
                Span::styled("* ", Style::default().fg(Color::Red)),
                Span::raw(item.title),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(
        "Open the Debloat tab for commands, or the Storage tab for a full audit.",
    ));
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("TL;DR"));
    frame.render_widget(paragraph, area);
}

/// Advice text as styled lines: narrative plain, code green and indented.
fn advice_lines(raw: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for piece in segment(raw) {
        match piece {
            Segment::Narrative(text) => {
                for line in text.lines() {
                    lines.push(Line::raw(line.to_string()));
                }
            }
            Segment::Code(text) => {
                for line in text.trim_matches('\n').lines() {
                    lines.push(Line::styled(
                        format!("  {line}"),
                        Style::default().fg(Color::Green),
                    ));
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_lines_style_code_separately() {
        let lines = advice_lines("Step one.\n```powershell\nGet-Item\n```\nDone.");
        let rendered: Vec<String> = lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.clone().into_owned())
                    .collect()
            })
            .collect();
        assert!(rendered.contains(&"Step one.".to_string()));
        assert!(rendered.contains(&"  Get-Item".to_string()));
        assert!(rendered.contains(&"Done.".to_string()));
    }

    #[test]
    fn cycle_skips_hidden_sections() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(None, WindowsVersion::Win11, false, tx);
        for _ in 0..Section::ALL.len() {
            app.cycle_section(true);
            let section = app.state.effective_section();
            assert!(!section.requires_advice());
        }
    }

    #[test]
    fn submit_without_gateway_is_inert() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(None, WindowsVersion::Win11, true, tx);
        app.state.reduce(ShellEvent::SelectSection(Section::AiOptimizer));
        app.optimizer_input = "why slow".to_string();
        app.submit();
        assert!(rx.try_recv().is_err());
        assert!(!app.state.is_loading(SlotKey::Optimizer));
    }

    #[test]
    fn whitespace_query_does_not_issue_request() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(None, WindowsVersion::Win11, true, tx);
        app.state.reduce(ShellEvent::SelectSection(Section::Troubleshoot));
        app.problem_input = "   ".to_string();
        app.submit();
        assert!(!app.state.is_loading(SlotKey::Troubleshoot));
    }

    #[test]
    fn os_toggle_clamps_debloat_selection() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(None, WindowsVersion::Win11, true, tx);
        app.debloat_selected = app.debloat_items().len() - 1;
        app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE));
        assert!(app.debloat_selected < app.debloat_items().len());
    }
}
