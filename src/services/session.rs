use crate::error::SessionError;
use crate::services::capture::CaptureSource;
use crate::services::controls::{Command, KeyScript};
use crate::services::output::{FrameWriter, ScreenshotWriter};
use retro_filter::{FilterMode, FilterPipeline, TextRasterizer};
use std::path::PathBuf;

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Frames captured and filtered
    pub frames: u64,
    /// Screenshot files written, in order
    pub screenshots: Vec<PathBuf>,
    /// Mode active when the session stopped
    pub final_mode: FilterMode,
    /// Stopped by a quit key rather than an exhausted source
    pub quit: bool,
}

/// The capture → filter → display loop.
///
/// Each tick first handles the keys scheduled for it, then pulls one frame
/// from the source, filters it with the current mode and hands the result
/// to the display writer. A screenshot requested on a tick captures that
/// tick's filtered frame.
pub struct Session<S, R> {
    pipeline: FilterPipeline<R>,
    source: S,
    screenshots: ScreenshotWriter,
    display: Option<FrameWriter>,
    keys: KeyScript,
}

impl<S: CaptureSource, R: TextRasterizer> Session<S, R> {
    pub fn new(pipeline: FilterPipeline<R>, source: S, screenshots: ScreenshotWriter) -> Self {
        Self {
            pipeline,
            source,
            screenshots,
            display: None,
            keys: KeyScript::default(),
        }
    }

    /// Write every filtered frame through `writer`
    pub fn with_display(mut self, writer: FrameWriter) -> Self {
        self.display = Some(writer);
        self
    }

    /// Replay `keys` during the run
    pub fn with_keys(mut self, keys: KeyScript) -> Self {
        self.keys = keys;
        self
    }

    pub fn pipeline(&self) -> &FilterPipeline<R> {
        &self.pipeline
    }

    /// Run until the source is exhausted or a quit key arrives
    pub fn run(&mut self) -> Result<SessionReport, SessionError> {
        let size = self.source.frame_spec();
        tracing::info!(
            width = size.width,
            height = size.height,
            mode = %self.pipeline.mode(),
            "Session started"
        );

        let mut frames = 0u64;
        let mut screenshots = Vec::new();
        let mut quit = false;
        let mut tick = 0u64;

        'ticks: loop {
            let mut shoot = false;
            for command in self.keys.commands_at(tick) {
                match command {
                    Command::CycleFilter => {
                        self.pipeline.cycle();
                    }
                    Command::Screenshot => shoot = true,
                    Command::Quit => {
                        tracing::info!(tick, "Quit requested");
                        quit = true;
                        break 'ticks;
                    }
                }
            }

            let Some(mut frame) = self.source.next_frame()? else {
                tracing::debug!(tick, "Capture source exhausted");
                break;
            };

            self.pipeline.process(&mut frame);

            if let Some(display) = &self.display {
                display.write(tick, &frame)?;
            }
            if shoot {
                screenshots.push(self.screenshots.save(&frame)?);
            }

            frames += 1;
            tick += 1;
        }

        let report = SessionReport {
            frames,
            screenshots,
            final_mode: self.pipeline.mode(),
            quit,
        };
        tracing::info!(
            frames = report.frames,
            screenshots = report.screenshots.len(),
            mode = %report.final_mode,
            "Session finished"
        );
        Ok(report)
    }
}
