pub mod events;
pub mod state;
pub mod ui;

use std::time::Duration;

use anyhow::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use crate::feed::client::InboxClient;
use crate::feed::state::FeedEvent;
use crate::terminal::state::{Action, AppMessage, AppState};

const TICK: Duration = Duration::from_millis(100);

pub async fn run_tui(client: InboxClient) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, client).await;
    ratatui::restore();
    result
}

async fn run(terminal: &mut DefaultTerminal, client: InboxClient) -> Result<()> {
    let (tx, mut rx) = unbounded_channel::<AppMessage>();
    let mut state = AppState::new();

    if client.has_session()
        && let Some(action) = state.apply_feed(FeedEvent::SessionReady)
    {
        dispatch(action, &client, &tx);
    }

    loop {
        terminal.draw(|f| ui::render(f, &mut state))?;

        while let Ok(msg) = rx.try_recv() {
            state.on_message(msg);
        }

        if let Some(action) = state.poll_sentinel() {
            dispatch(action, &client, &tx);
        }

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match events::handle_key(key, &mut state) {
                Some(Action::Quit) => break,
                Some(action) => dispatch(action, &client, &tx),
                None => {}
            }
        }
    }

    // In-flight requests may still finish; their results are dropped.
    state.apply_feed(FeedEvent::Detached);
    Ok(())
}

fn dispatch(action: Action, client: &InboxClient, tx: &UnboundedSender<AppMessage>) {
    let client = client.clone();
    let tx = tx.clone();
    match action {
        Action::Fetch(page) => {
            tokio::spawn(async move {
                let result = client.fetch_page(page).await;
                let _ = tx.send(AppMessage::Page { page, result });
            });
        }
        Action::Summarize(emails) => {
            tokio::spawn(async move {
                let result = client.summarize(&emails).await;
                let _ = tx.send(AppMessage::Summary(result));
            });
        }
        Action::Quit => {}
    }
}
