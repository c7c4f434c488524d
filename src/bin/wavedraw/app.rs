//! Application state, audio stream wiring, and the event loop.

use std::io::stdout;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use rtrb::{Consumer, Producer, RingBuffer};

use wavedraw::dsp::oscillator::{OscCommand, WavetableOscillator};
use wavedraw::dsp::resample::resample;
use wavedraw::dsp::wave::{MirrorDir, Side, WaveBuffer};
use wavedraw::generator::{compute_wave, Preset};
use wavedraw::grid::{Grid, GridPoint};
use wavedraw::io::{load_wave_file, save_wave_file, WaveDataType, WaveFormat};
use wavedraw::{GENERATOR_SIZE, GRID_HEIGHT, WAVE_SIZE};

use crate::ui;

/// Frames rendered per callback chunk.
const MONO_BLOCK: usize = 2048;
/// Capacity of the editor-to-audio command ring.
const COMMAND_CAPACITY: usize = 64;

const DAT_FILE: &str = "wave.dat";
const TABLE_FILE: &str = "wave.h";

pub struct App {
    buffer: WaveBuffer,
    grid: Grid,
    producer: Producer<OscCommand>,
    consumer: Option<Consumer<OscCommand>>,
    playing: bool,
    frequency: f64,
    smooth_strength: f64,
    window_strength: f64,
    preset: Preset,
    status: String,
    /// Previous stroke position while the left button is held.
    stroke: Option<GridPoint>,
    /// Inner plot area of the waveform chart, refreshed every draw.
    plot_area: Rect,
}

impl App {
    pub fn new() -> Self {
        let (producer, consumer) = RingBuffer::<OscCommand>::new(COMMAND_CAPACITY);
        Self {
            buffer: WaveBuffer::new(WAVE_SIZE),
            grid: Grid::compact(WAVE_SIZE, GRID_HEIGHT),
            producer,
            consumer: Some(consumer),
            playing: false,
            frequency: 220.0,
            smooth_strength: 0.8,
            window_strength: 0.5,
            preset: Preset::Sine,
            status: String::new(),
            stroke: None,
            plot_area: Rect::default(),
        }
    }

    /// Run the application (takes over the terminal, plays audio).
    pub fn run(mut self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f64;
        let channels = config.channels() as usize;

        let mut consumer = self
            .consumer
            .take()
            .ok_or_else(|| eyre!("command channel already taken"))?;
        let mut oscillator = WavetableOscillator::new();
        let mut mono = vec![0.0f32; MONO_BLOCK];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut done = 0;

                while done < total_frames {
                    let count = (total_frames - done).min(MONO_BLOCK);
                    let block = &mut mono[..count];
                    oscillator.process_block(&mut consumer, block, sample_rate);

                    // Mono to all device channels.
                    for (i, &sample) in block.iter().enumerate() {
                        let offset = (done + i) * channels;
                        for out in &mut data[offset..offset + channels] {
                            *out = sample;
                        }
                    }
                    done += count;
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;
        stream.play()?;

        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;
        let result = self.event_loop(&mut terminal);
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        loop {
            let view = ui::EditorView {
                samples: self.buffer.samples(),
                frequency: self.frequency,
                playing: self.playing,
                preset_name: self.preset.name(),
                smooth_strength: self.smooth_strength,
                window_strength: self.window_strength,
                status: &self.status,
            };
            let mut plot_area = self.plot_area;
            terminal.draw(|frame| {
                plot_area = ui::draw(frame, &view);
            })?;
            self.plot_area = plot_area;

            if !event::poll(Duration::from_millis(33))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !self.on_key(key.code, key.modifiers) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
        }
    }

    /// Returns false when the application should exit.
    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') => return false,
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('[') => self.adjust_frequency(-10.0),
            KeyCode::Char(']') => self.adjust_frequency(10.0),
            KeyCode::Char('s') => {
                self.buffer.smooth(self.smooth_strength);
                self.after_edit("smooth");
            }
            KeyCode::Char('w') => {
                self.buffer.window(self.window_strength);
                self.after_edit("window");
            }
            KeyCode::Left => {
                let step = if modifiers.contains(KeyModifiers::SHIFT) {
                    -5
                } else {
                    -1
                };
                self.buffer.shift(step);
                self.after_edit("shift left");
            }
            KeyCode::Right => {
                let step = if modifiers.contains(KeyModifiers::SHIFT) {
                    5
                } else {
                    1
                };
                self.buffer.shift(step);
                self.after_edit("shift right");
            }
            KeyCode::Char('m') => {
                self.buffer.mirror(MirrorDir::LeftToRight);
                self.after_edit("mirror left to right");
            }
            KeyCode::Char('M') => {
                self.buffer.mirror(MirrorDir::RightToLeft);
                self.after_edit("mirror right to left");
            }
            KeyCode::Char('i') => {
                self.buffer.invert(Side::Left);
                self.after_edit("invert left");
            }
            KeyCode::Char('I') => {
                self.buffer.invert(Side::Right);
                self.after_edit("invert right");
            }
            KeyCode::Char('n') => self.generate_next_preset(),
            KeyCode::Char('e') => self.export(WaveFormat::Dat, WaveDataType::Float, DAT_FILE),
            KeyCode::Char('E') => self.export(WaveFormat::Cpp, WaveDataType::Int16, TABLE_FILE),
            KeyCode::Char('o') => self.import(WaveFormat::Dat, DAT_FILE),
            _ => {}
        }
        true
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(point) = self.grid_point_at(mouse.column, mouse.row) {
                    self.buffer.paint_dot(&self.grid, point);
                    self.stroke = Some(point);
                    self.after_edit("paint");
                } else {
                    self.stroke = None;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(point) = self.grid_point_at(mouse.column, mouse.row) else {
                    self.stroke = None;
                    return;
                };
                match self.stroke {
                    Some(previous) => self.buffer.connect_line(&self.grid, previous, point),
                    None => self.buffer.paint_dot(&self.grid, point),
                }
                self.stroke = Some(point);
                self.after_edit("paint");
            }
            MouseEventKind::Up(MouseButton::Left) => self.stroke = None,
            _ => {}
        }
    }

    /// Map a terminal cell inside the plot area onto the editing grid.
    fn grid_point_at(&self, column: u16, row: u16) -> Option<GridPoint> {
        let area = self.plot_area;
        if area.width < 2 || area.height < 2 {
            return None;
        }
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }

        let rel_x = (column - area.x) as f64 / (area.width - 1) as f64;
        let rel_y = (row - area.y) as f64 / (area.height - 1) as f64;
        let x = (rel_x * (self.grid.dots_x() - 1) as f64).round() as i32;
        // Terminal rows grow downward; grid rows grow upward.
        let y = ((1.0 - rel_y) * (self.grid.dots_y() - 1) as f64).round() as i32;
        Some(GridPoint::new(x, y))
    }

    fn toggle_playback(&mut self) {
        if self.playing {
            self.send(OscCommand::Stop);
            self.playing = false;
            self.status = "stopped".into();
        } else {
            self.send(OscCommand::SetWavetable(self.buffer.snapshot()));
            self.send(OscCommand::SetFrequency(self.frequency));
            self.send(OscCommand::Play);
            self.playing = true;
            self.status = "playing".into();
        }
    }

    fn adjust_frequency(&mut self, delta: f64) {
        self.frequency = (self.frequency + delta).clamp(10.0, 8000.0);
        self.send(OscCommand::SetFrequency(self.frequency));
    }

    fn generate_next_preset(&mut self) {
        self.preset = self.preset.next();
        let raw = compute_wave(&self.preset, GENERATOR_SIZE, 0.0);
        match resample(&raw, self.buffer.len()) {
            Ok(samples) => {
                self.buffer.replace(&samples);
                let name = self.preset.name().to_owned();
                self.after_edit(&name);
            }
            Err(err) => self.status = format!("generate failed: {err}"),
        }
    }

    fn export(&mut self, fmt: WaveFormat, ty: WaveDataType, file: &str) {
        match save_wave_file(Path::new(file), self.buffer.samples(), self.buffer.len(), fmt, ty) {
            Ok(()) => self.status = format!("saved {file}"),
            Err(err) => self.status = format!("save failed: {err}"),
        }
    }

    fn import(&mut self, fmt: WaveFormat, file: &str) {
        match load_wave_file(Path::new(file), self.buffer.len(), fmt, 0) {
            Ok((samples, ty)) => {
                self.buffer.replace(&samples);
                self.after_edit(&format!("loaded {file} ({})", ty.name()));
            }
            Err(err) => self.status = format!("load failed: {err}"),
        }
    }

    /// Record the action and, while playing, republish a snapshot so the
    /// oscillator tracks the edit.
    fn after_edit(&mut self, action: &str) {
        self.status = action.to_owned();
        if self.playing {
            self.send(OscCommand::SetWavetable(self.buffer.snapshot()));
        }
    }

    /// A full ring drops the command; the next edit republishes.
    fn send(&mut self, command: OscCommand) {
        let _ = self.producer.push(command);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
