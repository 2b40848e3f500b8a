//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }
}

/// Project directories used for the config file and exported reports.
#[cfg(not(target_arch = "wasm32"))]
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "DecisionMate", "DecisionMate")
}

/// Run CPU-heavy work off the UI thread. On the web there is only one
/// thread, so the job runs inline.
pub async fn run_blocking<T, F>(job: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.spawn_blocking(job).await.ok(),
            Err(_) => Some(job()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        Some(job())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_tests_run_as_desktop() {
        assert_eq!(Platform::current(), Platform::Desktop);
    }

    #[test]
    fn blocking_job_runs_without_a_runtime() {
        let value = futures::executor::block_on(run_blocking(|| 21 * 2));
        assert_eq!(value, Some(42));
    }
}
