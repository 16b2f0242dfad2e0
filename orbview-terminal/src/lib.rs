//! Terminal front end: runs the core render loop against a raw-mode terminal.

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use orbview_core::{
    Frame, FrameHandler, InputEvent, Key, PointerButton, RenderLoop, SceneState, Shape,
    ShapeKind, ShadingModel, StopSignal, Viewport,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// 30 FPS target
const TARGET_FRAME_TIME: Duration = Duration::from_millis(1000 / 30);

/// Approximate pixel size of a terminal cell, so drag deltas feel like a
/// mouse moving over a canvas.
const CELL_WIDTH_PX: f32 = 8.0;
const CELL_HEIGHT_PX: f32 = 16.0;

/// Browser-style wheel delta for one scroll notch.
const WHEEL_NOTCH: f32 = 100.0;

/// What a terminal event asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Input(InputEvent),
    SelectShape(ShapeKind),
    NextShading,
    Quit,
}

/// Turns crossterm events into [`Action`]s, tracking the last pointer cell
/// to report relative motion.
#[derive(Debug, Default)]
pub struct EventMapper {
    last_pointer: Option<(u16, u16)>,
}

impl EventMapper {
    pub fn map(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent) -> Option<Action> {
        let position = (mouse.column, mouse.row);
        let event = match mouse.kind {
            MouseEventKind::Down(button) => {
                self.last_pointer = Some(position);
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Other,
                };
                InputEvent::PointerDown { button }
            }
            MouseEventKind::Drag(_) => {
                let (last_x, last_y) = self.last_pointer?;
                self.last_pointer = Some(position);
                InputEvent::PointerMove {
                    dx: (position.0 as f32 - last_x as f32) * CELL_WIDTH_PX,
                    dy: (position.1 as f32 - last_y as f32) * CELL_HEIGHT_PX,
                }
            }
            MouseEventKind::Up(_) => {
                self.last_pointer = None;
                InputEvent::PointerUp
            }
            MouseEventKind::ScrollDown => InputEvent::Wheel {
                delta_y: WHEEL_NOTCH,
            },
            MouseEventKind::ScrollUp => InputEvent::Wheel {
                delta_y: -WHEEL_NOTCH,
            },
            _ => return None,
        };
        Some(Action::Input(event))
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Up => Action::Input(InputEvent::KeyDown(Key::ArrowUp)),
        KeyCode::Down => Action::Input(InputEvent::KeyDown(Key::ArrowDown)),
        KeyCode::Left => Action::Input(InputEvent::KeyDown(Key::ArrowLeft)),
        KeyCode::Right => Action::Input(InputEvent::KeyDown(Key::ArrowRight)),
        KeyCode::Tab => Action::NextShading,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Action::SelectShape(ShapeKind::ALL[index])
        }
        KeyCode::Char(c) => Action::Input(InputEvent::KeyDown(Key::Char(c))),
        _ => return None,
    };
    Some(action)
}

fn next_shading(current: ShadingModel) -> ShadingModel {
    let all = ShadingModel::ALL;
    let index = all.iter().position(|&m| m == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    renderer: AsciiRenderer,
    events: EventMapper,
    stop: StopSignal,
    frame_start: Instant,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(stop: StopSignal) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            renderer: AsciiRenderer::new(width as usize, height as usize),
            events: EventMapper::default(),
            stop,
            frame_start: now,
            last_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Take over the terminal and run `render_loop` until it finishes.
    pub fn run(&mut self, scene: &mut SceneState, render_loop: &mut RenderLoop) -> io::Result<u64> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = render_loop.run(scene, self);

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn apply(&mut self, scene: &mut SceneState, action: Action) {
        match action {
            Action::Input(event) => {
                scene.handle_input(event);
            }
            Action::SelectShape(kind) => {
                if let Err(err) = scene.select_shape(Shape::default_for(kind)) {
                    tracing::warn!(%kind, %err, "could not select shape");
                }
            }
            Action::NextShading => {
                scene.shading = next_shading(scene.shading);
                tracing::debug!(shading = %scene.shading, "switched shading model");
            }
            Action::Quit => self.stop.stop(),
        }
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if (now - self.last_sample).as_secs() >= 1 {
            self.fps = self.frame_count as f32 / (now - self.last_sample).as_secs_f32();
            self.frame_count = 0;
            self.last_sample = now;
        }
    }
}

impl FrameHandler for TerminalApp {
    type Error = io::Error;

    fn prepare(&mut self, scene: &mut SceneState) -> io::Result<Viewport> {
        // Frame timing
        let elapsed = self.frame_start.elapsed();
        if elapsed < TARGET_FRAME_TIME {
            std::thread::sleep(TARGET_FRAME_TIME - elapsed);
        }
        self.frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                self.renderer.resize(width as usize, height as usize);
                continue;
            }
            if let Some(action) = self.events.map(&event) {
                self.apply(scene, action);
            }
        }

        // Cells are about twice as tall as they are wide
        Ok(Viewport::new(
            self.renderer.width() as u32,
            self.renderer.height() as u32 * 2,
        ))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render(frame);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "orbview | FPS: {:.1} | {} | drag=orbit right-drag=pan wheel=zoom arrows/Q/E=rotate 1-5=shape Tab=shading Esc=quit",
                self.fps, frame.shading
            )),
            ResetColor
        )?;

        stdout.flush()?;
        self.update_fps();
        Ok(())
    }
}
