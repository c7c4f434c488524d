//! Waveform display widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the editing buffer as a line chart. Returns the inner plot area
/// so mouse positions can be mapped back onto the grid.
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f64]) -> Rect {
    let block = Block::default().title(" Waveform ").borders(Borders::ALL);
    let inner = block.inner(area);

    // Convert samples to chart data points over x in [0, 1].
    let data: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let x = i as f64 / (samples.len() - 1) as f64;
            (x, sample)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
    inner
}
