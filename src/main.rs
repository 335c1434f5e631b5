//! The Scent TUI - Terminal client for a remote perfume catalog.
//!
//! Main entry point and event loop for the application.

mod app;
mod catalog;
mod config;
mod ui;

use app::{App, UiMode};
use catalog::CatalogClient;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
};
use std::io;
use std::time::Duration;
use ui::list::LINES_PER_RECORD;

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, builds the catalog client, performs the initial
/// load, and runs the event loop inside an alternate-screen terminal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load(None)?;

    if config.base_url.trim().is_empty() {
        eprintln!("Error: catalog base URL is required.");
        eprintln!(
            "Please set it in the config file at: {}",
            Config::default_config_path()?.display()
        );
        return Err(anyhow::anyhow!("Base URL not configured"));
    }

    // Create catalog client
    let client = CatalogClient::new(&config)?;

    // Create application state and load the collection
    let mut app = App::new();
    app.set_status("Loading perfumes...".to_string());
    app.refresh(&client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out and renders the search bar, form, record list, and status bar.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = layout_chunks(f.area());

    // Render search bar
    ui::render_search(app, chunks[0], f.buffer_mut());

    // Render add/edit form
    ui::render_form(app, chunks[1], f.buffer_mut());

    // Render record list
    ui::render_list(app, chunks[2], f.buffer_mut());

    // Render status bar
    let status_text = if app.busy {
        "Working..."
    } else {
        app.status_message
            .as_deref()
            .unwrap_or("Press 'q' to quit, '/' to search, 'a' to add, 'e' to edit, 'd' to delete, 'r' to reload")
    };
    let status = ratatui::widgets::Paragraph::new(ratatui::text::Line::from(status_text));
    f.render_widget(status, chunks[3]);
}

/// Split the terminal area into the fixed vertical layout.
fn layout_chunks(area: ratatui::layout::Rect) -> std::rc::Rc<[ratatui::layout::Rect]> {
    ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            ratatui::layout::Constraint::Length(3), // Search bar
            ratatui::layout::Constraint::Length(6), // Add/edit form
            ratatui::layout::Constraint::Min(0),    // Record list
            ratatui::layout::Constraint::Length(1), // Status bar
        ])
        .split(area)
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `client` - Catalog client
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Handles keyboard and mouse events, dispatches catalog operations, and
/// renders the UI. Operations are awaited one at a time; there is no
/// request queuing or cancellation.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &CatalogClient,
) -> anyhow::Result<()> {
    // Record list area boundaries (updated on each render, for mouse clicks)
    let mut list_area = ratatui::layout::Rect::default();

    loop {
        terminal.draw(|f| {
            list_area = layout_chunks(f.area())[2];
            render_ui(f, app);
        })?;

        // Use non-blocking event polling with timeout to keep UI responsive
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    match app.mode {
                        UiMode::List => match key.code {
                            KeyCode::Char('q') => break,
                            KeyCode::Char('Q') => break,
                            KeyCode::Esc => break,
                            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                            KeyCode::Char('/') => {
                                app.mode = UiMode::Search;
                            }
                            KeyCode::Char('a') => {
                                app.open_add_form();
                            }
                            KeyCode::Char('e') => {
                                app.open_edit_form();
                            }
                            KeyCode::Char('d') | KeyCode::Delete => {
                                app.delete_selected(client).await;
                            }
                            KeyCode::Char('r') => {
                                // Reset: clear the query and reload everything
                                app.query.clear();
                                app.refresh(client).await;
                            }
                            KeyCode::Char('c')
                                if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                            {
                                break;
                            }
                            _ => {}
                        },
                        UiMode::Search => match key.code {
                            KeyCode::Enter => {
                                app.mode = UiMode::List;
                                app.run_search(client).await;
                            }
                            KeyCode::Esc => {
                                app.mode = UiMode::List;
                            }
                            KeyCode::Backspace => {
                                app.remove_query_char();
                            }
                            KeyCode::Char(c) => {
                                app.add_query_char(c);
                            }
                            _ => {}
                        },
                        UiMode::Form => match key.code {
                            KeyCode::Esc => {
                                app.close_form();
                            }
                            KeyCode::Enter => {
                                app.submit_draft(client).await;
                            }
                            KeyCode::Tab | KeyCode::Down => {
                                app.focus = app.focus.next();
                            }
                            KeyCode::BackTab | KeyCode::Up => {
                                app.focus = app.focus.prev();
                            }
                            KeyCode::Backspace => {
                                app.remove_draft_char();
                            }
                            KeyCode::Char(c) => {
                                app.add_draft_char(c);
                            }
                            _ => {}
                        },
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, app, list_area);
                }
                _ => {}
            }
        }
        // If no event, continue loop to redraw UI (keeps it responsive)
    }

    Ok(())
}

/// Handle mouse events (scroll and click).
///
/// # Arguments
/// * `mouse` - Mouse event
/// * `app` - Application state
/// * `list_area` - Area of the record list widget
///
/// # Details
/// Scroll moves the selection; a left click inside the list selects the
/// clicked record.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, list_area: ratatui::layout::Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if app.mode == UiMode::List {
                app.move_up();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.mode == UiMode::List {
                app.move_down();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            // Check if click is within the record list area
            // Account for the list widget's top border (1 line)
            if app.mode == UiMode::List
                && mouse.column >= list_area.x
                && mouse.column < list_area.x + list_area.width
                && mouse.row > list_area.y // Skip top border
                && mouse.row < list_area.y + list_area.height
            {
                // Each record card occupies a fixed number of rows
                let click_y = mouse.row - list_area.y - 1; // Subtract border
                let record_index = (click_y / LINES_PER_RECORD) as usize;

                if record_index < app.records.len() {
                    app.selected_index = record_index;
                }
            }
        }
        _ => {}
    }
}
