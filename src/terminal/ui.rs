use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::terminal::state::{AppState, Focus};

pub fn render(f: &mut Frame, state: &mut AppState) {
    let [main, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .margin(1)
            .areas(main);

    let border = |focus: Focus| {
        if state.focus == focus {
            Color::Yellow
        } else {
            Color::DarkGray
        }
    };
    let list_border = border(Focus::List);
    let summary_border = border(Focus::Summary);

    // LEFT: inbox
    let list_block = Block::default()
        .title(format!(" Inbox ({} loaded) ", state.feed.emails().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(list_border));

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let items: Vec<ListItem> = state
        .feed
        .emails()
        .iter()
        .map(|e| {
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled("From: ", bold),
                    Span::raw(e.from().unwrap_or_default().to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Subject: ", bold),
                    Span::raw(e.subject().unwrap_or_default().to_string()),
                ]),
                Line::from(Span::styled(e.snippet.clone(), Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    e.display_date(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    f.render_stateful_widget(list, left, &mut state.list_state);

    // RIGHT: digest
    let summary_block = Block::default()
        .title(" Summary of Top Emails ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(summary_border));

    let summary_text = if state.digest.is_summarizing() {
        "Summarizing...".to_string()
    } else {
        state
            .digest
            .summary()
            .map(str::to_string)
            .unwrap_or_else(|| "Press s to summarize the loaded emails.".to_string())
    };

    let p = Paragraph::new(summary_text)
        .block(summary_block)
        .wrap(Wrap { trim: false })
        .scroll((state.summary_scroll, 0));
    f.render_widget(p, right);

    f.render_widget(Paragraph::new(status_line(state)), footer);
}

fn status_line(state: &AppState) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));

    let status = if state.feed.is_loading() {
        Span::styled(
            format!("Loading page {}...  ", state.feed.page()),
            Style::default().fg(Color::Cyan),
        )
    } else if let Some(err) = state.feed.last_error().or(state.digest.last_error()) {
        Span::styled(format!("{err}  "), Style::default().fg(Color::Red))
    } else if state.feed.is_exhausted() {
        Span::styled(
            "You've reached the end of your inbox  ",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw("")
    };

    Line::from(vec![
        status,
        key("j/k"),
        Span::raw(" move  "),
        key("Tab"),
        Span::raw(" focus  "),
        key("s"),
        Span::raw(" summarize  "),
        key("r"),
        Span::raw(" reload  "),
        key("q"),
        Span::raw(" quit"),
    ])
}
