//! Terminal layout for the editor.

mod waveform;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the draw pass needs from the application state.
pub struct EditorView<'a> {
    pub samples: &'a [f64],
    pub frequency: f64,
    pub playing: bool,
    pub preset_name: &'a str,
    pub smooth_strength: f64,
    pub window_strength: f64,
    pub status: &'a str,
}

/// Draw the full frame. Returns the waveform plot area for mouse mapping.
pub fn draw(frame: &mut Frame, view: &EditorView) -> Rect {
    let [wave_area, status_area, help_area] = Layout::vertical([
        Constraint::Min(10),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let plot_area = waveform::render_waveform(frame, wave_area, view.samples);
    render_status(frame, status_area, view);
    render_help(frame, help_area);
    plot_area
}

fn render_status(frame: &mut Frame, area: Rect, view: &EditorView) {
    let playback = if view.playing {
        Span::styled("playing", Style::default().fg(Color::Green))
    } else {
        Span::styled("stopped", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        playback,
        Span::raw(format!(
            "  {:.0} Hz  preset: {}  smooth {:.2}  window {:.2}  ",
            view.frequency, view.preset_name, view.smooth_strength, view.window_strength
        )),
        Span::styled(view.status, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph =
        Paragraph::new(line).block(Block::default().title(" Status ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = "drag: paint  space: play/stop  [ ]: freq  s/w: smooth/window  \
                arrows: shift  m/M: mirror  i/I: invert  n: preset  e/E: export  o: open  q: quit";
    let paragraph = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
