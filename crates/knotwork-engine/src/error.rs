use thiserror::Error;

/// Typed failures surfaced by the engine.
///
/// Runtime plumbing wraps these in `anyhow::Error` with context; callers that
/// need to branch on the cause can `downcast_ref::<EngineError>()`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The swapchain cannot recover (commonly out of memory).
    #[error("surface failure is not recoverable: {0}")]
    SurfaceFatal(wgpu::SurfaceError),

    /// A font blob could not be parsed.
    #[error("font load error: {0}")]
    FontLoad(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        let e = EngineError::SurfaceFatal(wgpu::SurfaceError::OutOfMemory);
        assert!(e.to_string().starts_with("surface failure is not recoverable"));

        let e = EngineError::FontLoad("bad table".into());
        assert_eq!(e.to_string(), "font load error: bad table");
    }

    #[test]
    fn survives_anyhow_round_trip() {
        let err: anyhow::Error = EngineError::FontLoad("x".into()).into();
        assert!(matches!(err.downcast_ref::<EngineError>(), Some(EngineError::FontLoad(_))));
    }
}
