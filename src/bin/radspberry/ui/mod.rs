//! TUI for radspberry
//!
//! Shows the ring fill, stream counters and mute/fade state of the running
//! player, plus a scope fed by the player's tap.

mod state;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use radspberry::Player;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;
use tracing::info;

use crate::patch::Controls;
use state::PipelineState;
use status::{render_ring, render_status, Levels};
use waveform::render_waveform;

/// Samples shown by the scope
const SCOPE_SIZE: usize = 1024;

const VOLUME_STEP: f32 = 0.05;
const MORPH_STEP: f32 = 0.1;

pub struct UiApp {
    player: Player,
    /// Rendered samples mirrored by the fill thread
    audio_rx: Consumer<f32>,
    controls: Controls,
    scope: Vec<f32>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(player: Player, audio_rx: Consumer<f32>, controls: Controls) -> Self {
        Self {
            player,
            audio_rx,
            controls,
            scope: vec![0.0; SCOPE_SIZE],
            should_quit: false,
        }
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            let state = PipelineState::capture(&self.player, &self.controls);
            terminal.draw(|frame| self.render(frame, &state))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.player.stop();
        Ok(())
    }

    fn poll_audio(&mut self) {
        let pending = self.audio_rx.slots();
        if pending == 0 {
            return;
        }

        self.scope.reserve(pending);
        while let Ok(sample) = self.audio_rx.pop() {
            self.scope.push(sample);
        }

        if self.scope.len() > SCOPE_SIZE {
            let excess = self.scope.len() - SCOPE_SIZE;
            self.scope.drain(..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('m') => self.player.mute(),
            KeyCode::Char('u') => self.player.unmute(),
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                let muted = self.player.toggle();
                info!("output {}", if muted { "muted" } else { "unmuted" });
            }
            KeyCode::Char('f') => self.player.fade_out(),
            KeyCode::Char('c') => self.player.engine().clear(),
            KeyCode::Up => nudge(&self.player.volume(), VOLUME_STEP),
            KeyCode::Down => nudge(&self.player.volume(), -VOLUME_STEP),
            KeyCode::Right => nudge(&self.controls.morph, MORPH_STEP),
            KeyCode::Left => nudge(&self.controls.morph, -MORPH_STEP),
            KeyCode::Char(']') => nudge(&self.controls.pad, VOLUME_STEP),
            KeyCode::Char('[') => nudge(&self.controls.pad, -VOLUME_STEP),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, state: &PipelineState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Length(3), // Ring gauge
                Constraint::Min(8),    // Scope
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        render_status(frame, chunks[0], state, &Levels::from_buffer(&self.scope));
        render_ring(frame, chunks[1], state);
        render_waveform(frame, chunks[2], &self.scope, state.muted);

        let help = Paragraph::new(
            " [Q] Quit  [T] Toggle mute  [M/U] Mute/Unmute  [F] Fade out  [C] Clear  \
             [↑↓] Volume  [←→] Morph  [[ ]] Pad",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

fn nudge(param: &radspberry::graph::Param, step: f32) {
    param.set((param.get() + step).clamp(0.0, 1.0));
}
