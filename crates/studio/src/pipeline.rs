//! Per-frame rendering and photo capture

use std::path::{Path, PathBuf};

use camera_capture::VideoFrame;
use chrono::Utc;
use face_mesh::{DetectedFace, FaceAnalyzer};
use image::RgbImage;
use mask_compositor::{MaskCompositor, Overlay};
use storage::{capture_timestamp, CaptureRecord, CaptureStore};
use tracing::{debug, info, warn};

use crate::config::StudioConfig;
use crate::session::Session;
use crate::theme::Theme;
use crate::StudioError;

/// One composited frame and the faces behind it
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub image: RgbImage,
    pub faces: Vec<DetectedFace>,
}

/// Result of a capture request
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub path: PathBuf,
    pub record: CaptureRecord,
    /// The store accepted the record
    pub persisted: bool,
}

/// Frame -> faces -> mask -> particles
pub struct Pipeline {
    analyzer: FaceAnalyzer,
    compositor: MaskCompositor,
    theme: Theme,
    output_dir: PathBuf,
    photo_counter: u32,
}

impl Pipeline {
    pub fn new(analyzer: FaceAnalyzer, compositor: MaskCompositor, theme: Theme, output_dir: PathBuf) -> Self {
        Self {
            analyzer,
            compositor,
            theme,
            output_dir,
            photo_counter: 1,
        }
    }

    /// Build from configuration, falling back to the procedural mask when
    /// the theme overlay cannot be found
    pub fn from_config(config: &StudioConfig, theme: Theme) -> Result<Self, StudioError> {
        let analyzer = FaceAnalyzer::new(&config.face_mesh_config())?;

        let overlay = match Overlay::find(&theme.mask_file, &config.theme.mask_dirs) {
            Ok((overlay, path)) => {
                info!("Using mask {}", path.display());
                Some(overlay)
            }
            Err(e) => {
                warn!("{}; using the default mask instead", e);
                None
            }
        };
        let compositor = MaskCompositor::new(config.mask.clone(), overlay)?;

        Ok(Self::new(analyzer, compositor, theme, config.output_dir.clone()))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn has_overlay(&self) -> bool {
        self.compositor.has_overlay()
    }

    pub fn detection_enabled(&self) -> bool {
        self.analyzer.detection_enabled()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Analyze, composite and animate one frame
    pub fn render(&mut self, frame: &VideoFrame, session: &mut Session) -> Result<RenderedFrame, StudioError> {
        let faces = self.analyzer.analyze(frame);
        let mut image = frame.to_rgb_image()?;

        let mut mouth_open = false;
        for face in &faces {
            self.compositor.composite_in_place(&mut image, face, &session.offsets);

            let mouth = face.mouth_center;
            if mouth.x > 0.0 && mouth.y > 0.0 {
                session.particles.set_emit_position((mouth.x, mouth.y));
                mouth_open |= face.mouth_open;
            }
        }

        session.particles.set_emitting(mouth_open);
        session.particles.update();
        session.particles.draw(&mut image);

        debug!(
            "Frame {}: faces={} mouth_open={} particles={}",
            frame.sequence,
            faces.len(),
            mouth_open,
            session.particles.particle_count()
        );

        Ok(RenderedFrame { image, faces })
    }

    /// Save `rendered` to the output directory and persist its record.
    ///
    /// A failed image write is an error and nothing is stored; a failed
    /// store write is reported through `persisted`.
    pub fn capture(&mut self, rendered: &RenderedFrame, store: &dyn CaptureStore) -> Result<CaptureOutcome, StudioError> {
        let captured_at = Utc::now();
        let filename = format!(
            "facemesh_{}_{}_{}.jpg",
            self.theme.slug(),
            capture_timestamp(captured_at),
            self.photo_counter
        );
        let path = self.output_dir.join(&filename);

        std::fs::create_dir_all(&self.output_dir)?;
        rendered.image.save(&path).map_err(|source| StudioError::ImageWrite {
            path: path.clone(),
            source,
        })?;
        self.photo_counter += 1;
        info!("Photo saved: {}", path.display());

        let record = CaptureRecord::new(
            filename,
            self.theme.name.clone(),
            self.theme.mask_file.clone(),
            captured_at,
            &rendered.faces,
        );

        let persisted = match store.save(record.clone()) {
            Ok(id) => {
                info!("Face data saved ({} faces, record {})", record.faces_detected, id);
                true
            }
            Err(e) => {
                warn!("Failed to save face data: {}", e);
                false
            }
        };

        Ok(CaptureOutcome {
            path,
            record,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_mesh::{FaceDetector, FaceMeshConfig, FaceRegion};
    use mask_compositor::MaskConfig;
    use particles::{ParticleEngine, ParticleKind};
    use storage::{Repository, StorageError, Uuid};

    struct NoFaces;

    impl FaceDetector for NoFaces {
        fn detect(&mut self, _frame: &VideoFrame) -> Vec<FaceRegion> {
            Vec::new()
        }
    }

    /// Store that rejects every write
    struct FailingStore;

    impl CaptureStore for FailingStore {
        fn save(&self, _record: CaptureRecord) -> Result<Uuid, StorageError> {
            Err(StorageError::DatabaseError("offline".to_string()))
        }

        fn records(&self) -> Result<Vec<CaptureRecord>, StorageError> {
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("studio-pipeline-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn pipeline(output_dir: PathBuf) -> Pipeline {
        Pipeline::new(
            FaceAnalyzer::new(&FaceMeshConfig::default()).unwrap(),
            MaskCompositor::new(MaskConfig::default(), None).unwrap(),
            Theme::named("Mudkip"),
            output_dir,
        )
    }

    fn session() -> Session {
        Session::with_engine(ParticleEngine::with_seed(7), ParticleKind::Water, 0.05)
    }

    /// 320x240 frame whose default face region shows a dark open mouth
    fn open_mouth_frame() -> VideoFrame {
        let mut frame = VideoFrame::filled(320, 240, [200, 200, 200]);
        for y in 130..160u32 {
            for x in 130..190u32 {
                let idx = ((y * 320 + x) * 3) as usize;
                frame.data[idx..idx + 3].copy_from_slice(&[20, 20, 20]);
            }
        }
        frame
    }

    #[test]
    fn test_open_mouth_emits_particles() {
        let mut pipeline = pipeline(scratch_dir("emit"));
        let mut session = session();
        let frame = open_mouth_frame();

        let first = pipeline.render(&frame, &mut session).unwrap();
        assert_eq!(first.faces.len(), 1);
        assert!(first.faces[0].mouth_open);
        assert!(session.particles.is_emitting());

        for _ in 0..3 {
            pipeline.render(&frame, &mut session).unwrap();
        }
        assert_eq!(session.particles.particle_count(), 1);
        let mouth = first.faces[0].mouth_center;
        assert_eq!(session.particles.emit_position(), (mouth.x, mouth.y));
    }

    #[test]
    fn test_closed_mouth_keeps_particles_moving() {
        let mut pipeline = pipeline(scratch_dir("closed"));
        let mut session = session();
        let open = open_mouth_frame();
        for _ in 0..4 {
            pipeline.render(&open, &mut session).unwrap();
        }
        assert_eq!(session.particles.particle_count(), 1);

        let closed = VideoFrame::filled(320, 240, [200, 200, 200]);
        let rendered = pipeline.render(&closed, &mut session).unwrap();
        assert!(!rendered.faces[0].mouth_open);
        assert!(!session.particles.is_emitting());
        for _ in 0..100 {
            pipeline.render(&closed, &mut session).unwrap();
        }
        assert_eq!(session.particles.particle_count(), 0);
    }

    #[test]
    fn test_default_mask_drawn_without_overlay() {
        let mut pipeline = pipeline(scratch_dir("mask"));
        let mut session = session();
        let frame = VideoFrame::filled(320, 240, [10, 10, 10]);
        let rendered = pipeline.render(&frame, &mut session).unwrap();
        assert!(!pipeline.has_overlay());
        assert_ne!(rendered.image, frame.to_rgb_image().unwrap());
    }

    #[test]
    fn test_no_faces_leaves_frame_untouched() {
        let analyzer = FaceAnalyzer::with_detector(&FaceMeshConfig::default(), Box::new(NoFaces));
        let mut pipeline = Pipeline::new(
            analyzer,
            MaskCompositor::new(MaskConfig::default(), None).unwrap(),
            Theme::named("Eevee"),
            scratch_dir("none"),
        );
        let mut session = session();
        let frame = VideoFrame::filled(64, 48, [10, 20, 30]);
        let rendered = pipeline.render(&frame, &mut session).unwrap();
        assert!(rendered.faces.is_empty());
        assert_eq!(rendered.image, frame.to_rgb_image().unwrap());
    }

    #[test]
    fn test_capture_writes_photo_and_record() {
        let dir = scratch_dir("capture");
        let mut pipeline = pipeline(dir.clone());
        let mut session = session();
        let rendered = pipeline.render(&open_mouth_frame(), &mut session).unwrap();
        let store = Repository::new();

        let first = pipeline.capture(&rendered, &store).unwrap();
        let second = pipeline.capture(&rendered, &store).unwrap();
        assert!(first.path.is_file());
        assert!(first.persisted);
        assert!(first.record.filename.starts_with("facemesh_mudkip_"));
        assert!(first.record.filename.ends_with("_1.jpg"));
        assert!(second.record.filename.ends_with("_2.jpg"));
        assert_eq!(first.record.mask_file, "mudkip_mask.png");
        assert_eq!(first.record.faces_detected, 1);
        assert!(first.record.faces[0].mouth_open);
        assert_eq!(store.statistics().unwrap(), (2, 2));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_store_failure_is_not_fatal() {
        let dir = scratch_dir("store-failure");
        let mut pipeline = pipeline(dir.clone());
        let mut session = session();
        let rendered = pipeline.render(&open_mouth_frame(), &mut session).unwrap();

        let outcome = pipeline.capture(&rendered, &FailingStore).unwrap();
        assert!(!outcome.persisted);
        assert!(outcome.path.is_file());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_output_dir_fails_capture() {
        let dir = scratch_dir("unwritable");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let mut pipeline = pipeline(blocker.join("captures"));
        let mut session = session();
        let rendered = pipeline.render(&open_mouth_frame(), &mut session).unwrap();
        let store = Repository::new();

        assert!(pipeline.capture(&rendered, &store).is_err());
        assert!(store.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
