//! Status bar and ring gauge

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::state::PipelineState;

/// Peak and RMS of the scope buffer.
pub struct Levels {
    pub peak: f32,
    pub rms: f32,
}

impl Levels {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, state: &PipelineState, levels: &Levels) {
    let block = Block::default().title(" radspberry ").borders(Borders::ALL);

    let label = state.output_label();
    let label_color = match label {
        "Playing" => Color::Green,
        "Fading" => Color::Yellow,
        "Stopped" => Color::Red,
        _ => Color::DarkGray,
    };

    let line = Line::from(vec![
        Span::styled(format!(" {label}  "), Style::default().fg(label_color)),
        Span::styled(
            format!("{:.1}kHz  ", state.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "vol {:.2}  morph {:.2}  pad {:.2}  ",
                state.volume, state.morph, state.pad
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("fade {:.2}  ", state.fade_gain),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", levels.peak, levels.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_ring(frame: &mut Frame, area: Rect, state: &PipelineState) {
    let title = format!(
        " Ring  underruns {}  dropped {} ",
        state.stats.underruns, state.stats.dropped
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let label = match state.buffered {
        Some(buffered) => format!("{buffered} / {}", state.capacity.saturating_sub(1)),
        None => "inactive".to_string(),
    };

    let color = if state.stats.underruns > 0 {
        Color::Yellow
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .ratio(state.fill_ratio())
        .label(label);

    frame.render_widget(gauge, area);
}
