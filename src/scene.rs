//! Presentation boundary
//!
//! The scene draws whatever the session exposes and holds no game logic.
//! `SceneHost` catches scene failures: while faulted, frame callbacks are
//! suspended; `retry` rebuilds the scene and leaves the session untouched.

use thiserror::Error;

use crate::sim::FrameView;

/// Failure raised while building or drawing the scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene setup failed: {0}")]
    Build(String),
    #[error("frame draw failed: {0}")]
    Draw(String),
}

/// A visual scene driven by the frame loop
pub trait Scene {
    /// Create surfaces, contexts and any other resources
    fn build(&mut self) -> Result<(), SceneError>;
    /// Draw one frame
    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), SceneError>;
}

/// Host state
#[derive(Debug, Clone, PartialEq)]
pub enum HostStatus {
    /// Not yet built
    Pending,
    Running,
    /// Last failure; frames are skipped until `retry`
    Faulted(SceneError),
}

/// Error boundary around a `Scene`
#[derive(Debug)]
pub struct SceneHost<S: Scene> {
    scene: S,
    status: HostStatus,
    retries: u32,
}

impl<S: Scene> SceneHost<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            status: HostStatus::Pending,
            retries: 0,
        }
    }

    pub fn status(&self) -> &HostStatus {
        &self.status
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.status, HostStatus::Faulted(_))
    }

    /// Number of user-triggered rebuilds so far
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Build the scene if it hasn't been built. Faulted hosts stay faulted.
    pub fn ensure_built(&mut self) -> bool {
        match self.status {
            HostStatus::Running => true,
            HostStatus::Faulted(_) => false,
            HostStatus::Pending => self.build(),
        }
    }

    /// Whether the frame loop should run the simulation this frame
    pub fn accepts_frames(&self) -> bool {
        !self.is_faulted()
    }

    /// Draw one frame. Returns false if the host is (or just became) faulted.
    pub fn frame(&mut self, view: &FrameView<'_>) -> bool {
        if !self.ensure_built() {
            return false;
        }
        match self.scene.draw(view) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Scene fault, suspending frames: {}", e);
                self.status = HostStatus::Faulted(e);
                false
            }
        }
    }

    /// Rebuild a faulted scene. Game state is not touched.
    pub fn retry(&mut self) -> bool {
        if !self.is_faulted() {
            return matches!(self.status, HostStatus::Running);
        }
        self.retries += 1;
        log::info!("Retrying scene setup (attempt {})", self.retries);
        self.build()
    }

    fn build(&mut self) -> bool {
        match self.scene.build() {
            Ok(()) => {
                self.status = HostStatus::Running;
                true
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = HostStatus::Faulted(e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Session;

    /// Scene that fails a scripted number of builds and draws
    #[derive(Default)]
    struct FlakyScene {
        build_failures: u32,
        draw_failures: u32,
        builds: u32,
        draws: u32,
    }

    impl Scene for FlakyScene {
        fn build(&mut self) -> Result<(), SceneError> {
            self.builds += 1;
            if self.build_failures > 0 {
                self.build_failures -= 1;
                return Err(SceneError::Build("no context".into()));
            }
            Ok(())
        }

        fn draw(&mut self, _view: &FrameView<'_>) -> Result<(), SceneError> {
            if self.draw_failures > 0 {
                self.draw_failures -= 1;
                return Err(SceneError::Draw("lost".into()));
            }
            self.draws += 1;
            Ok(())
        }
    }

    #[test]
    fn test_builds_lazily_then_draws() {
        let session = Session::new(1);
        let mut host = SceneHost::new(FlakyScene::default());
        assert_eq!(host.status(), &HostStatus::Pending);
        assert!(host.frame(&session.view()));
        assert!(host.frame(&session.view()));
        assert_eq!(host.scene().builds, 1);
        assert_eq!(host.scene().draws, 2);
    }

    #[test]
    fn test_draw_fault_suspends_until_retry() {
        let session = Session::new(1);
        let mut host = SceneHost::new(FlakyScene {
            draw_failures: 1,
            ..Default::default()
        });
        assert!(!host.frame(&session.view()));
        assert!(host.is_faulted());
        assert!(!host.accepts_frames());

        // Suspended: no draw attempts while faulted
        assert!(!host.frame(&session.view()));
        assert_eq!(host.scene().draws, 0);

        assert!(host.retry());
        assert_eq!(host.retries(), 1);
        assert!(host.frame(&session.view()));
        assert_eq!(host.scene().draws, 1);
    }

    #[test]
    fn test_build_fault_then_retry() {
        let mut host = SceneHost::new(FlakyScene {
            build_failures: 2,
            ..Default::default()
        });
        assert!(!host.ensure_built());
        assert_eq!(
            host.status(),
            &HostStatus::Faulted(SceneError::Build("no context".into()))
        );
        assert!(!host.retry());
        assert!(host.retry());
        assert_eq!(host.scene().builds, 3);
    }

    #[test]
    fn test_retry_preserves_session() {
        let mut session = Session::new(3);
        session.start();
        session.tick(1.0);
        let score = session.state().score();

        let mut host = SceneHost::new(FlakyScene {
            draw_failures: 1,
            ..Default::default()
        });
        host.frame(&session.view());
        assert!(host.retry());
        assert_eq!(session.state().score(), score);
        assert_eq!(session.track().forward, 5.0);
    }
}
