use color_eyre::eyre::{
    Result,
    eyre,
};
use crossterm::{
    event::{
        self,
        Event,
        KeyCode,
        KeyEvent,
        KeyEventKind,
        KeyModifiers,
        MouseButton,
        MouseEventKind,
    },
    terminal::{
        disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{
            Canvas,
            Circle,
            Context,
        },
        *,
    },
};
use six_chamber::{
    AppSnapshot,
    Phase,
    layout::{
        self,
        CHAMBER_RADIUS,
        ChamberFill,
        ChamberSprite,
        SURFACE_EXTENT,
    },
};
use std::io::stdout;
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserEvent {
    Quit,
    Start,
    Fire,
    PlayAgain,
    Redraw,
}

#[derive(Debug, Default)]
pub struct UiState {
    mode: Mode,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
    // last drawn action button, for pointer hit tests
    button: Option<(Rect, UserEvent)>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
enum Mode {
    #[default]
    Normal,
    QuitModal,
}

pub type InputEventReceiver = mpsc::UnboundedReceiver<std::io::Result<Event>>;

/// crossterm reads block, so a plain thread forwards them to the async loop.
pub fn input_event_stream() -> InputEventReceiver {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            let event = event::read();
            let failed = event.is_err();
            if tx.send(event).is_err() || failed {
                break;
            }
        }
    });
    rx
}

pub async fn next_raw_event(events: &mut InputEventReceiver) -> Result<Event> {
    match events.recv().await {
        Some(event) => Ok(event?),
        None => Err(eyre!("input reader stopped")),
    }
}

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    // Create a single persistent Terminal to preserve buffers across draws
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit(state: &mut UiState) -> Result<()> {
    state.terminal = None;
    disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    Ok(())
}

/// Clears and repaints everything. Without an attached terminal the frame is
/// skipped; the next state change or resize paints again.
pub fn draw(state: &mut UiState, snap: &AppSnapshot) -> Result<()> {
    if let Some(mut term) = state.terminal.take() {
        let res = term.draw(|f| ui(f, state, snap)).map(|_| ());
        state.terminal = Some(term);
        res?;
    }
    Ok(())
}

pub fn interpret_event(state: &mut UiState, event: Event) -> Option<UserEvent> {
    match event {
        Event::Key(key) => interpret_key(state, key),
        Event::Mouse(mouse) => {
            if mouse.kind != MouseEventKind::Down(MouseButton::Left)
                || state.mode != Mode::Normal
            {
                return None;
            }
            let (rect, action) = state.button?;
            rect.contains(Position::new(mouse.column, mouse.row))
                .then_some(action)
        }
        Event::Resize(_, _) => Some(UserEvent::Redraw),
        _ => None,
    }
}

fn interpret_key(state: &mut UiState, key: KeyEvent) -> Option<UserEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserEvent::Quit);
    }
    match state.mode {
        Mode::QuitModal => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.mode = Mode::Normal;
                Some(UserEvent::Redraw)
            }
            _ => None,
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                state.mode = Mode::QuitModal;
                Some(UserEvent::Redraw)
            }
            KeyCode::Char('s') | KeyCode::Enter => Some(UserEvent::Start),
            KeyCode::Char('f') | KeyCode::Char(' ') => Some(UserEvent::Fire),
            KeyCode::Char('r') => Some(UserEvent::PlayAgain),
            _ => None,
        },
    }
}

fn ui(f: &mut Frame, state: &mut UiState, snap: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], snap);
    draw_cylinder(f, chunks[1], snap);
    state.button = draw_button(f, chunks[2], snap);
    draw_help(f, chunks[3]);

    if snap.phase == Phase::GameOver {
        draw_game_over(f, chunks[1]);
    }
    if state.mode == Mode::QuitModal {
        let area = centered_rect(40, 20, f.area());
        let block = Block::default().borders(Borders::ALL).title("Confirm Quit");
        let p = Paragraph::new("Quit the game? (Y/N)");
        f.render_widget(Clear, area);
        f.render_widget(block.clone(), area);
        f.render_widget(p, block.inner(area));
    }
}

fn draw_header(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(area);
    if let Some(fps) = snap.fps {
        let readout = Paragraph::new(format!("FPS: {fps:.2}"))
            .style(Style::default().fg(Color::White).bg(Color::Black));
        f.render_widget(readout, halves[0]);
    }
    let status_style = match snap.phase {
        Phase::GameOver => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Phase::Ready => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(Line::styled(snap.status.clone(), status_style))
        .alignment(Alignment::Right);
    f.render_widget(status, halves[1]);
}

fn draw_cylinder(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let surface = layout::square_fit(area);
    if surface.width == 0 || surface.height == 0 {
        return;
    }
    let sprites = layout::cylinder_sprites(&snap.game);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-SURFACE_EXTENT, SURFACE_EXTENT])
        .y_bounds([-SURFACE_EXTENT, SURFACE_EXTENT])
        .paint(move |ctx| {
            for sprite in &sprites {
                paint_chamber(ctx, sprite);
            }
            ctx.layer();
            for sprite in &sprites {
                let label = if sprite.shows_bullet {
                    Span::styled("•", Style::default().fg(Color::Yellow))
                } else {
                    Span::styled(sprite.label(), label_style(sprite.fill))
                };
                ctx.print(sprite.x, sprite.y, label);
            }
        });
    f.render_widget(canvas, surface);
}

fn paint_chamber(ctx: &mut Context<'_>, sprite: &ChamberSprite) {
    let (outline, fill) = match sprite.fill {
        ChamberFill::Neutral => (Color::Gray, None),
        ChamberFill::Safe => (Color::Green, Some(Color::LightGreen)),
        ChamberFill::Fatal => (Color::Black, Some(Color::Red)),
    };
    if let Some(color) = fill {
        let mut radius = CHAMBER_RADIUS - 2.0;
        while radius > 0.0 {
            ctx.draw(&Circle {
                x: sprite.x,
                y: sprite.y,
                radius,
                color,
            });
            radius -= 2.0;
        }
    } else {
        // translucent: a faint inner ring only
        ctx.draw(&Circle {
            x: sprite.x,
            y: sprite.y,
            radius: CHAMBER_RADIUS / 2.0,
            color: Color::DarkGray,
        });
    }
    ctx.draw(&Circle {
        x: sprite.x,
        y: sprite.y,
        radius: sprite.radius,
        color: outline,
    });
}

fn label_style(fill: ChamberFill) -> Style {
    match fill {
        ChamberFill::Neutral => Style::default().fg(Color::White),
        ChamberFill::Safe => Style::default().fg(Color::Black).bg(Color::LightGreen),
        ChamberFill::Fatal => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    }
}

fn button_for(snap: &AppSnapshot) -> (&'static str, UserEvent, Color) {
    if snap.game.is_over() {
        ("Play Again", UserEvent::PlayAgain, Color::Red)
    } else if snap.game.has_started() {
        ("Fire", UserEvent::Fire, Color::LightRed)
    } else {
        ("Start Game", UserEvent::Start, Color::Green)
    }
}

fn draw_button(f: &mut Frame, area: Rect, snap: &AppSnapshot) -> Option<(Rect, UserEvent)> {
    let (label, action, color) = button_for(snap);
    let width = (UnicodeWidthStr::width(label) as u16 + 6).min(area.width);
    if width == 0 || area.height == 0 {
        return None;
    }
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    };
    // the trigger stays visible while spinning but only acts once ready
    let armed = matches!(snap.phase, Phase::Idle | Phase::Ready | Phase::GameOver);
    let style = if armed {
        Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, rect);
    Some((rect, action))
}

fn draw_game_over(f: &mut Frame, area: Rect) {
    let banner = centered_rect(30, 20, area);
    if banner.height < 3 {
        return;
    }
    let p = Paragraph::new(Line::styled(
        "Game Over!",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, banner);
    f.render_widget(p, banner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new("s/Enter start | f/Space fire | r play again | click the button | q/Esc quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h_percent) / 2),
            Constraint::Percentage(h_percent),
            Constraint::Percentage((100 - h_percent) / 2),
        ])
        .split(r);

    let vertical = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w_percent) / 2),
            Constraint::Percentage(w_percent),
            Constraint::Percentage((100 - w_percent) / 2),
        ])
        .split(popup_layout[1]);

    vertical[1]
}
