use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Default playback frequency before any command arrives.
const DEFAULT_FREQUENCY: f64 = 220.0;

/// Control messages from the editing thread to the audio callback.
///
/// Wavetables travel as immutable snapshots: the callback swaps the whole
/// reference and can never observe a half-written table. Replaced snapshots
/// drop on the consumer side; a table is at most a few KiB and swaps happen
/// at user-interaction rate.
#[derive(Debug, Clone)]
pub enum OscCommand {
    SetWavetable(Arc<[f64]>),
    SetFrequency(f64),
    Play,
    Stop,
}

/// Pull side of the command channel, drained at the top of each audio block.
pub trait CommandReceiver {
    fn pop(&mut self) -> Option<OscCommand>;
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for Consumer<OscCommand> {
    fn pop(&mut self) -> Option<OscCommand> {
        Consumer::pop(self).ok()
    }
}

/// Looping wavetable playback engine.
///
/// Reads the table with fractional-phase linear interpolation. The index
/// scale is `len - 1` while the second tap wraps to index 0, which leaves a
/// one-sample seam at the cycle boundary; the seam is part of the
/// established sound and is kept as-is (flattening it to a true `len` scale
/// shifts the pitch audibly).
///
/// `render` is the realtime path: no allocation, no locking, no error
/// channel. With no table set, or while stopped, it produces silence.
pub struct WavetableOscillator {
    table: Option<Arc<[f64]>>,
    frequency: f64,
    phase: f64,
    sample_rate: f64,
    buffer_size: usize,
    running: bool,
}

impl WavetableOscillator {
    pub fn new() -> Self {
        Self {
            table: None,
            frequency: DEFAULT_FREQUENCY,
            phase: 0.0,
            sample_rate: 0.0,
            buffer_size: 0,
            running: false,
        }
    }

    /// Begin playback with the audio device's buffer size and sample rate.
    /// Phase restarts at zero; the frequency and table persist.
    pub fn start(&mut self, buffer_size: usize, sample_rate: f64) {
        self.phase = 0.0;
        self.buffer_size = buffer_size;
        self.sample_rate = sample_rate;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.phase = 0.0;
        self.buffer_size = 0;
        self.sample_rate = 0.0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn set_wavetable(&mut self, table: Arc<[f64]>) {
        self.table = Some(table);
    }

    pub fn clear_wavetable(&mut self) {
        self.table = None;
    }

    /// Apply one control command. The device parameters are supplied by the
    /// audio side, which alone knows them.
    pub fn handle(&mut self, command: OscCommand, buffer_size: usize, sample_rate: f64) {
        match command {
            OscCommand::SetWavetable(table) => self.set_wavetable(table),
            OscCommand::SetFrequency(freq) => self.set_frequency(freq),
            OscCommand::Play => {
                self.stop();
                self.start(buffer_size, sample_rate);
            }
            OscCommand::Stop => self.stop(),
        }
    }

    /// Drain pending commands, then fill `out` with mono frames.
    pub fn process_block<R: CommandReceiver>(
        &mut self,
        receiver: &mut R,
        out: &mut [f32],
        sample_rate: f64,
    ) {
        while let Some(command) = receiver.pop() {
            self.handle(command, out.len(), sample_rate);
        }
        self.render(out);
    }

    /// Fill `out` with one mono frame per element.
    pub fn render(&mut self, out: &mut [f32]) {
        let table = match (&self.table, self.running) {
            (Some(table), true) if !table.is_empty() => table,
            _ => {
                out.fill(0.0);
                return;
            }
        };

        let len = table.len();
        let increment = self.frequency / self.sample_rate;
        let mut phase = self.phase;

        for frame in out.iter_mut() {
            let index = phase * (len - 1) as f64;
            let i1 = index as usize;
            let i2 = (i1 + 1) % len;
            let mu = index - i1 as f64;

            *frame = (table[i1] + mu * (table[i2] - table[i1])) as f32;

            phase += increment;
            // Repeated subtraction: increments above 1.0 are legal.
            while phase > 1.0 {
                phase -= 1.0;
            }
        }

        self.phase = phase;
    }
}

impl Default for WavetableOscillator {
    fn default() -> Self {
        Self::new()
    }
}
