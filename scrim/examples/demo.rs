//! Overlay stack demo.
//!
//! A minimal stand-in renderer: opens sessions, drills into views, and
//! routes Escape / backdrop clicks through the dismissal router.
//!
//! Keys:
//! - `o`: open a default session
//! - `c`: open a small confirmation on top
//! - `p`: open a pinned critical session (ignores Escape and backdrop)
//! - `n`: navigate the topmost session one view deeper
//! - `b`: go back within the topmost session
//! - Esc: dismiss the topmost session (routed)
//! - left click outside the top session's area: backdrop dismissal (routed)
//! - `q`: close everything and quit

use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CtEvent, KeyCode, KeyEventKind,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use serde_json::{Map, Value};
use simplelog::{Config, LevelFilter, WriteLogger};

use scrim::{
    DismissalRouter, ModalConfig, ModalKind, ModalSize, ModalStack, Rect, modal_area, z_index,
};

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).expect("router already bound");

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = run(&stack, &router);

    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

fn run(stack: &ModalStack, router: &DismissalRouter) -> io::Result<()> {
    print_state(stack)?;

    loop {
        let raw = event::read()?;

        match &raw {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => {
                    stack.close_all();
                    return Ok(());
                }
                KeyCode::Char('o') => {
                    let id = stack.open(
                        ModalConfig::new()
                            .raw("An ordinary overlay")
                            .on_close(|| log::info!("default session closed")),
                    );
                    log::info!("opened {id}");
                }
                KeyCode::Char('c') => {
                    stack.open(
                        ModalConfig::new()
                            .kind(ModalKind::Confirmation)
                            .size(ModalSize::Sm)
                            .raw("Discard changes?"),
                    );
                }
                KeyCode::Char('p') => {
                    stack.open(
                        ModalConfig::new()
                            .kind(ModalKind::Critical)
                            .allow_escape_close(false)
                            .allow_backdrop_close(false)
                            .raw("Pinned until closed programmatically"),
                    );
                }
                KeyCode::Char('n') => {
                    if let Some(top) = stack.topmost() {
                        let mut data = Map::new();
                        data.insert("from".into(), Value::String(top.current_view.clone()));
                        stack.navigate(&top.id, "details", data);
                    }
                }
                KeyCode::Char('b') => {
                    if let Some(top) = stack.topmost() {
                        stack.go_back(&top.id);
                    }
                }
                _ => {
                    router.handle_event(&raw);
                }
            },
            CtEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    // This renderer only exposes the topmost session's
                    // backdrop; clicks outside its area land on it.
                    if let Some(top) = stack.topmost() {
                        let (width, height) = size()?;
                        let area = modal_area(Rect::from_size(width, height), &top.display);
                        if !area.contains(mouse.column, mouse.row) {
                            router.backdrop_click(&top.id);
                        }
                    }
                }
            }
            _ => {}
        }

        print_state(stack)?;
    }
}

fn print_state(stack: &ModalStack) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\r\n-- stack: {} open --\r\n", stack.len())?;
    for session in stack.sessions() {
        write!(
            out,
            "{:indent$}[z {}] {:?} view={} back={}\r\n",
            "",
            z_index(session.level, &session.kind),
            session.kind,
            session.current_view,
            session.can_go_back,
            indent = session.level * 2,
        )?;
    }
    write!(out, "o/c/p open | n/b navigate | Esc/click dismiss | q quit\r\n")?;
    out.flush()
}
