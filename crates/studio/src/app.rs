//! Interactive frame loop

use std::time::Duration;

use camera_capture::{FrameRead, FrameSource};
use metrics::{counter, gauge};
use storage::CaptureStore;
use tracing::{debug, error, info, warn};

use crate::config::StudioConfig;
use crate::input::{InputSource, KeyCommand, Poll, ScriptedInput, StdinInput};
use crate::pipeline::{Pipeline, RenderedFrame};
use crate::session::Session;
use crate::theme::Theme;
use crate::StudioError;

/// Consecutive empty reads tolerated before giving up on the source
const MAX_CONSECUTIVE_EMPTY: u32 = 1_000;

/// Totals reported when the loop ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub faces_detected: u64,
    pub captures: u64,
    pub capture_failures: u64,
    /// Photos written whose record the store rejected
    pub persist_failures: u64,
    pub particles_active: usize,
    pub stored_captures: usize,
    pub stored_faces: usize,
}

/// Frame source, key input and capture store around one pipeline
pub struct App {
    pipeline: Pipeline,
    session: Session,
    source: Box<dyn FrameSource>,
    input: Box<dyn InputSource>,
    store: Box<dyn CaptureStore>,
    key_timeout: Duration,
    summary: SessionSummary,
}

impl App {
    pub fn new(
        pipeline: Pipeline,
        session: Session,
        source: Box<dyn FrameSource>,
        input: Box<dyn InputSource>,
        store: Box<dyn CaptureStore>,
        key_timeout: Duration,
    ) -> Self {
        Self {
            pipeline,
            session,
            source,
            input,
            store,
            key_timeout,
            summary: SessionSummary::default(),
        }
    }

    /// Wire everything up from configuration
    pub fn from_config(config: StudioConfig) -> Result<Self, StudioError> {
        let theme = Theme::from_config(&config.theme);
        info!("Theme: {}", theme);

        let source = camera_capture::open_source(&config.source.to_source_config())?;
        let store = storage::open_store(&config.storage)?;
        let input: Box<dyn InputSource> = match &config.keys {
            Some(script) => Box::new(ScriptedInput::parse(script)),
            None => Box::new(StdinInput::spawn()),
        };

        let session = Session::new(theme.particle_kind, config.mask.nudge_step);
        let pipeline = Pipeline::from_config(&config, theme)?;

        Ok(Self::new(
            pipeline,
            session,
            source,
            input,
            store,
            Duration::from_millis(config.key_timeout_ms),
        ))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &dyn CaptureStore {
        self.store.as_ref()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Run until quit, end of input script or end of frames
    pub fn run(&mut self) -> Result<SessionSummary, StudioError> {
        if !self.source.is_available() {
            error!("Frame source not available; nothing to run");
            return Err(StudioError::SourceUnavailable);
        }

        info!(
            "Studio running: theme={} overlay={} detection={} store={}",
            self.pipeline.theme().name,
            if self.pipeline.has_overlay() { "image" } else { "default" },
            self.pipeline.detection_enabled(),
            self.store.describe()
        );
        info!("Controls: space/enter capture | w/s mask up/down | a/d left/right | r reset | i records | q/esc quit");

        let mut last: Option<RenderedFrame> = None;
        let mut empty_reads = 0u32;

        loop {
            match self.source.read() {
                Ok(FrameRead::Frame(frame)) => {
                    empty_reads = 0;
                    match self.pipeline.render(&frame, &mut self.session) {
                        Ok(rendered) => {
                            self.record_frame(&rendered);
                            last = Some(rendered);
                        }
                        Err(e) => {
                            warn!("Skipping frame {}: {}", frame.sequence, e);
                            continue;
                        }
                    }
                }
                Ok(FrameRead::Empty) => {
                    empty_reads += 1;
                    if empty_reads >= MAX_CONSECUTIVE_EMPTY {
                        warn!("{} empty reads in a row; stopping", empty_reads);
                        break;
                    }
                    debug!("Empty frame, skipping");
                    continue;
                }
                Ok(FrameRead::End) => {
                    info!("Frame source exhausted");
                    break;
                }
                Err(e) => {
                    error!("Frame read failed: {}", e);
                    break;
                }
            }

            match self.input.poll(self.key_timeout) {
                Poll::Key(key) => {
                    if let Some(command) = KeyCommand::from_key(key) {
                        if !self.handle(command, last.as_ref()) {
                            break;
                        }
                    }
                }
                Poll::Idle => {}
                Poll::Closed => {
                    info!("Input finished");
                    break;
                }
            }
        }

        Ok(self.finish())
    }

    fn record_frame(&mut self, rendered: &RenderedFrame) {
        self.summary.frames_processed += 1;
        self.summary.faces_detected += rendered.faces.len() as u64;
        counter!("studio_frames_total").increment(1);
        counter!("studio_faces_total").increment(rendered.faces.len() as u64);
        gauge!("studio_particles_active").set(self.session.particles.particle_count() as f64);
    }

    /// Apply one command; false means quit
    fn handle(&mut self, command: KeyCommand, last: Option<&RenderedFrame>) -> bool {
        match command {
            KeyCommand::Quit => {
                info!("Quit requested");
                return false;
            }
            KeyCommand::Capture => self.capture(last),
            KeyCommand::ShowRecords => self.show_records(),
            other => {
                self.session.adjust(other);
            }
        }
        true
    }

    fn capture(&mut self, last: Option<&RenderedFrame>) {
        let Some(rendered) = last else {
            warn!("No frame to capture yet");
            return;
        };
        match self.pipeline.capture(rendered, self.store.as_ref()) {
            Ok(outcome) => {
                self.summary.captures += 1;
                counter!("studio_captures_total").increment(1);
                if !outcome.persisted {
                    self.summary.persist_failures += 1;
                    counter!("studio_persist_failures_total").increment(1);
                }
            }
            Err(e) => {
                self.summary.capture_failures += 1;
                counter!("studio_capture_failures_total").increment(1);
                warn!("Capture failed: {}", e);
            }
        }
    }

    fn show_records(&self) {
        let records = match self.store.records() {
            Ok(records) => records,
            Err(e) => {
                warn!("Error reading captures: {}", e);
                return;
            }
        };
        if records.is_empty() {
            info!("No face captures found. Take some photos first!");
            return;
        }
        for (i, record) in records.iter().enumerate() {
            info!(
                "Capture #{}: file={} theme={} mask={} time={} faces={} version={}",
                i + 1,
                record.filename,
                record.theme_name,
                record.mask_file,
                record.timestamp,
                record.faces_detected,
                record.app_version
            );
        }
        info!("Total analyses: {}", records.len());
    }

    fn finish(&mut self) -> SessionSummary {
        self.summary.particles_active = self.session.particles.particle_count();
        match self.store.statistics() {
            Ok((captures, faces)) => {
                self.summary.stored_captures = captures;
                self.summary.stored_faces = faces;
            }
            Err(e) => warn!("Could not read store statistics: {}", e),
        }

        let s = &self.summary;
        info!(
            "Session summary: frames={} faces={} captures={} capture_failures={} persist_failures={} particles={} stored_captures={} stored_faces={} detection={} overlay={}",
            s.frames_processed,
            s.faces_detected,
            s.captures,
            s.capture_failures,
            s.persist_failures,
            s.particles_active,
            s.stored_captures,
            s.stored_faces,
            self.pipeline.detection_enabled(),
            self.pipeline.has_overlay()
        );
        self.summary.clone()
    }
}
