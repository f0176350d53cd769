pub mod layout;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{chain_name, App, ChainStatus, Focus, InputMode, StatusLevel};
use crate::campaign::Field;
use crate::core::{link_form, LinkForm, NavLink, Page};
use crate::probe::ProbeState;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_sidebar(f, areas.sidebar, app);
    draw_page(f, areas.page, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let (dot, probe_style) = match &app.probe {
        ProbeState::Succeeded(_) => ("●", Style::default().fg(Color::Green)),
        ProbeState::Failed(_) => ("●", Style::default().fg(Color::Red)),
        ProbeState::Idle | ProbeState::Pending => ("○", Style::default().fg(Color::Yellow)),
    };
    let chain = match app.chain {
        ChainStatus::Unknown => Span::styled("chain ?", Style::default().fg(Color::DarkGray)),
        ChainStatus::Expected(id) => Span::raw(chain_name(id)),
        ChainStatus::Mismatch { actual, .. } => Span::styled(
            format!("{} (unexpected)", chain_name(actual)),
            Style::default().fg(Color::Yellow),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            "◆ crowdfund",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(dot, probe_style),
        Span::raw(" "),
        Span::raw(app.probe.to_string()),
        Span::raw("  │  "),
        chain,
        Span::raw("  │  "),
        Span::styled(app.endpoint.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn link_item<'a>(link: &'a NavLink, active: &str) -> ListItem<'a> {
    let style = if link.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    match link_form(link, active) {
        LinkForm::Expanded => ListItem::new(Line::from(vec![
            Span::raw(" "),
            Span::raw(link.icon.glyph()),
            Span::raw("  "),
            Span::styled(link.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .style(style.fg(Color::LightGreen)),
        LinkForm::IconOnly => {
            ListItem::new(Line::from(format!(" {}", link.icon.glyph()))).style(style)
        }
    }
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = app
        .nav
        .links()
        .iter()
        .map(|link| link_item(link, app.nav.active()))
        .collect();

    let highlight = if app.focus == Focus::Sidebar {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(highlight);

    let rows = layout::rect_inner(area).height as usize;
    let mut state =
        ListState::default().with_offset(layout::sidebar_offset(app.nav.cursor(), rows));
    if !app.nav.links().is_empty() {
        state.select(Some(app.nav.cursor()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_page(f: &mut Frame, area: Rect, app: &App) {
    let page = app.page();
    let border_style = if app.focus == Focus::Page {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let lines = match &page {
        Page::Home => home_lines(app),
        Page::CreateCampaign => campaign_form_lines(app),
        Page::Profile => profile_lines(app),
        Page::NotFound(path) => vec![
            Line::from(format!("Nothing lives at {}", path)),
            Line::from(""),
            Line::from(Span::styled(
                ":back to return",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", page.title()))
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn home_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!("Node: {}", app.probe))];
    if app.drafts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No campaigns yet. Start one from the sidebar.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(""));
        for draft in &app.drafts {
            lines.push(Line::from(vec![
                Span::styled(draft.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  goal {} ETH  ends {}", draft.target_eth(), draft.deadline)),
            ]));
        }
    }
    lines
}

fn campaign_form_lines(app: &App) -> Vec<Line<'static>> {
    let focused = app.form.focused();
    let mut lines = Vec::new();
    for field in Field::ALL {
        let value = app.form.value(field);
        let is_focused = app.focus == Focus::Page && field == focused;
        let label_style = if is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value_span = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        };
        let mut spans = vec![
            Span::styled(format!("{:<16}", field.label()), label_style),
            value_span,
        ];
        if is_focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field · Enter on the last field saves the draft · Esc sidebar",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn profile_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("Endpoint: {}", app.endpoint)),
        Line::from(format!("Expected chain: {}", chain_name(app.expected_chain_id))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Your drafts ({})", app.drafts.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for draft in &app.drafts {
        lines.push(Line::from(format!(
            "  {} by {}: {} ETH by {}",
            draft.title,
            draft.name,
            draft.target_eth(),
            draft.deadline
        )));
    }
    lines
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            format!("{}  ·  ? help", app.router.current()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Cyan)),
            Span::raw(app.command_input.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
        InputMode::Normal => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, size: Rect) {
    let width = size.width.min(56);
    let height = size.height.min(16);
    let area = Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    };
    let lines = vec![
        Line::from("j/k ↑/↓   move in sidebar"),
        Line::from("Enter     open highlighted link"),
        Line::from("click     open link under the mouse"),
        Line::from("Tab       switch sidebar/page"),
        Line::from("b         back"),
        Line::from(":         command line"),
        Line::from("q         quit"),
        Line::from(""),
        Line::from(":home :create :profile :link <name>"),
        Line::from(":go <path> :back :copy :quit"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(" Help ")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::Icon;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &App) -> Vec<String> {
        render_sized(app, 80, 20)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn sidebar_rows(screen: &[String]) -> Vec<String> {
        screen[4..8]
            .iter()
            .map(|row| row.chars().take(layout::SIDEBAR_WIDTH as usize).collect())
            .collect()
    }

    #[test]
    fn test_only_active_link_shows_label() {
        let mut app = App::new(&Config::default());
        let rows = sidebar_rows(&render(&app));
        assert!(rows[0].contains("Home"));
        assert!(!rows[1].contains("Start campaign"));
        assert!(!rows[3].contains("Profile"));

        app.select_link(3);
        let screen = render(&app);
        let rows = sidebar_rows(&screen);
        assert!(!rows[0].contains("Home"));
        assert!(rows[3].contains("Profile"));
        assert!(screen.iter().any(|row| row.contains("Your drafts (0)")));
    }

    #[test]
    fn test_click_on_scrolled_sidebar_selects_visible_link() {
        let mut app = App::new(&Config::default());
        for _ in 0..3 {
            app.nav.move_cursor(true);
        }

        // three sidebar rows fit; the cursor on the last link scrolls by one
        let screen = render_sized(&app, 60, 10);
        let rows: Vec<String> = screen[4..7]
            .iter()
            .map(|row| row.chars().take(layout::SIDEBAR_WIDTH as usize).collect())
            .collect();
        assert!(rows[0].contains(Icon::CreateCampaign.glyph()));
        assert!(rows[2].contains(Icon::Profile.glyph()));

        let areas = layout::areas(Rect::new(0, 0, 60, 10));
        let index = layout::sidebar_row_at(&areas, 2, 4, app.nav.cursor()).unwrap();
        assert_eq!(index, 1);

        app.select_link(index);
        assert_eq!(app.nav.active(), "Start campaign");
    }
}
